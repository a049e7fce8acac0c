use glam::{Quat, Vec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::animation::Track;

bitflags::bitflags! {
    /// Bone flags as defined in the M2 format
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct BoneFlags: u32 {
        /// Don't inherit parent translation
        const IGNORE_PARENT_TRANSLATE = 0x1;
        /// Don't inherit parent scale
        const IGNORE_PARENT_SCALE = 0x2;
        /// Don't inherit parent rotation
        const IGNORE_PARENT_ROTATION = 0x4;
        /// Spherical billboard
        const SPHERICAL_BILLBOARD = 0x8;
        /// Cylindrical billboard lock X
        const CYLINDRICAL_BILLBOARD_LOCK_X = 0x10;
        /// Cylindrical billboard lock Y
        const CYLINDRICAL_BILLBOARD_LOCK_Y = 0x20;
        /// Cylindrical billboard lock Z
        const CYLINDRICAL_BILLBOARD_LOCK_Z = 0x40;
        /// Transformed
        const TRANSFORMED = 0x200;
        /// Kinematic bone (requires physics)
        const KINEMATIC_BONE = 0x400;
        /// Helper bone
        const HELPER_BONE = 0x1000;
        /// Has animation
        const HAS_ANIMATION = 0x4000;
    }
}

/// A skeleton node with its animated local transform
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bone {
    /// Semantic key bone (jaw, weapon attach, ...), if any
    pub key_bone_id: Option<u32>,
    pub flags: BoneFlags,
    /// Parent bone index, `None` for a root
    pub parent: Option<u16>,
    pub submesh_id: u16,
    /// Rest-pose pivot in model space
    pub pivot: Vec3,
    pub translation: Track<Vec3>,
    pub rotation: Track<Quat>,
    pub scale: Track<Vec3>,
}

impl Bone {
    /// Create a bone without animation tracks
    pub fn new(parent: Option<u16>, pivot: Vec3) -> Self {
        Self {
            parent,
            pivot,
            ..Default::default()
        }
    }

    /// Convert the raw parent field (-1 for root bones)
    pub fn parent_from_raw(raw: i16) -> Option<u16> {
        u16::try_from(raw).ok()
    }

    /// Convert the raw key bone field (-1 for unnamed bones)
    pub fn key_bone_from_raw(raw: i32) -> Option<u32> {
        u32::try_from(raw).ok()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn parent_index(&self) -> Option<usize> {
        self.parent.map(usize::from)
    }
}
