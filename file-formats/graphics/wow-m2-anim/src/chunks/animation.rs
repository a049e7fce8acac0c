#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

bitflags::bitflags! {
    /// Animation flags as defined in the M2 format
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct AnimationFlags: u32 {
        /// Animation has translation keyframes
        const HAS_TRANSLATION = 0x1;
        /// Animation has rotation keyframes
        const HAS_ROTATION = 0x2;
        /// Animation has scaling keyframes
        const HAS_SCALING = 0x4;
        /// Animation is in world space (instead of local model space)
        const WORLD_SPACE = 0x8;
        /// Animation has billboarded rotation keyframes
        const BILLBOARD_ROTATION = 0x10;
        const PRIMARY_BONE_SEQUENCE = 0x20;
        const IS_ALIAS = 0x40;
        const BLENDED_ANIMATION = 0x80;
    }
}

/// Names of the lowest AnimationData ids
const ANIMATION_NAMES: [&str; 17] = [
    "Stand",
    "Death",
    "Spell",
    "Stop",
    "Walk",
    "Run",
    "Dead",
    "Rise",
    "StandWound",
    "CombatWound",
    "CombatCritical",
    "ShuffleLeft",
    "ShuffleRight",
    "Walkbackwards",
    "Stun",
    "HandsClosed",
    "AttackUnarmed",
];

/// An animation clip placed on the model's global timeline
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Animation {
    /// Animation type id (0 = Stand, 4 = Walk, 5 = Run, ...)
    pub id: u16,
    /// Variation index
    pub sub_id: u16,
    /// Start on the global timeline (ms)
    pub start_ms: u32,
    /// End on the global timeline (ms)
    pub end_ms: u32,
    pub move_speed: f32,
    pub flags: AnimationFlags,
}

impl Animation {
    pub fn new(id: u16, start_ms: u32, end_ms: u32) -> Self {
        Self {
            id,
            start_ms,
            end_ms,
            ..Default::default()
        }
    }

    /// Length of the clip in milliseconds
    pub fn duration(&self) -> u32 {
        self.end_ms.saturating_sub(self.start_ms)
    }

    /// Human readable name of the animation type
    pub fn name(&self) -> String {
        ANIMATION_NAMES
            .get(usize::from(self.id))
            .map_or_else(|| format!("Animation{}", self.id), |name| (*name).to_string())
    }
}
