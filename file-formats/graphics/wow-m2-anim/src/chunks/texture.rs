#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Texture type as defined in the M2 format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TextureType {
    /// Texture defined in filename
    #[default]
    Hardcoded,
    /// Body + clothes
    Body,
    /// Item, capes
    Item,
    /// Weapon blade
    WeaponBlade,
    /// Weapon handle
    WeaponHandle,
    /// Environment
    Environment,
    /// Hair, beard
    Hair,
    FacialHair,
    /// Fur and other second-layer skin
    SkinExtra,
    UISkin,
    TaurenMane,
    Monster1,
    Monster2,
    Monster3,
    ItemIcon,
    /// Any value this crate has no name for
    Other(u32),
}

impl TextureType {
    pub fn from_raw(value: u32) -> Self {
        match value {
            0 => Self::Hardcoded,
            1 => Self::Body,
            2 => Self::Item,
            3 => Self::WeaponBlade,
            4 => Self::WeaponHandle,
            5 => Self::Environment,
            6 => Self::Hair,
            7 => Self::FacialHair,
            8 => Self::SkinExtra,
            9 => Self::UISkin,
            10 => Self::TaurenMane,
            11 => Self::Monster1,
            12 => Self::Monster2,
            13 => Self::Monster3,
            14 => Self::ItemIcon,
            other => Self::Other(other),
        }
    }

    pub fn to_raw(self) -> u32 {
        match self {
            Self::Hardcoded => 0,
            Self::Body => 1,
            Self::Item => 2,
            Self::WeaponBlade => 3,
            Self::WeaponHandle => 4,
            Self::Environment => 5,
            Self::Hair => 6,
            Self::FacialHair => 7,
            Self::SkinExtra => 8,
            Self::UISkin => 9,
            Self::TaurenMane => 10,
            Self::Monster1 => 11,
            Self::Monster2 => 12,
            Self::Monster3 => 13,
            Self::ItemIcon => 14,
            Self::Other(value) => value,
        }
    }

    /// Display name used in texture table listings
    pub fn name(self) -> String {
        let name = match self {
            Self::Hardcoded => "Hardcoded",
            Self::Body => "Body",
            Self::Item => "Cape",
            Self::WeaponBlade => "WeaponBlade",
            Self::WeaponHandle => "WeaponHandle",
            Self::Environment => "Environment",
            Self::Hair => "Hair",
            Self::FacialHair => "FacialHair",
            Self::SkinExtra => "Fur",
            Self::UISkin => "UISkin",
            Self::TaurenMane => "TaurenMane",
            Self::Monster1 => "Creature1",
            Self::Monster2 => "Creature2",
            Self::Monster3 => "Creature3",
            Self::ItemIcon => "ItemIcon",
            Self::Other(value) => return format!("Type{value}"),
        };
        name.to_string()
    }
}

bitflags::bitflags! {
    /// Texture flags as defined in the M2 format
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct TextureFlags: u32 {
        /// Texture is wrapped horizontally
        const WRAP_X = 0x01;
        /// Texture is wrapped vertically
        const WRAP_Y = 0x02;
        /// Texture will not be replaced by other textures
        /// (character customization texture replacement)
        const NOT_REPLACEABLE = 0x04;
    }
}

/// An entry of the model's texture table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TextureSlot {
    pub texture_type: TextureType,
    pub flags: TextureFlags,
    /// Embedded relative path, only present for hardcoded textures
    pub filename: Option<String>,
}

impl TextureSlot {
    /// A slot with an embedded file path
    pub fn hardcoded<S: Into<String>>(filename: S) -> Self {
        Self {
            texture_type: TextureType::Hardcoded,
            flags: TextureFlags::empty(),
            filename: Some(filename.into()),
        }
    }

    /// A slot resolved at runtime by its type
    pub fn replaceable(texture_type: TextureType) -> Self {
        Self {
            texture_type,
            flags: TextureFlags::empty(),
            filename: None,
        }
    }

    /// The embedded path with NUL padding and surrounding whitespace removed,
    /// `None` when nothing is left
    pub fn embedded_path(&self) -> Option<&str> {
        self.filename
            .as_deref()
            .map(|name| name.trim_matches(|c: char| c == '\0' || c.is_whitespace()))
            .filter(|name| !name.is_empty())
    }

    pub fn is_replaceable(&self) -> bool {
        self.embedded_path().is_none()
    }
}
