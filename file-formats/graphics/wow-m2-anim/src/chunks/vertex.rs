use glam::{Vec2, Vec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sum of the bone weights of a fully skinned vertex
pub const FULL_WEIGHT: u8 = 255;

/// Up to four bone influences of a vertex
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoneWeights {
    /// Bone weights (0-255)
    pub weights: [u8; 4],
    /// Bone indices, meaningless where the weight is zero
    pub indices: [u8; 4],
}

impl BoneWeights {
    pub const fn new(weights: [u8; 4], indices: [u8; 4]) -> Self {
        Self { weights, indices }
    }

    /// Full weight on a single bone
    pub const fn single(bone: u8) -> Self {
        Self {
            weights: [FULL_WEIGHT, 0, 0, 0],
            indices: [bone, 0, 0, 0],
        }
    }

    pub fn total(&self) -> u32 {
        self.weights.iter().map(|&w| u32::from(w)).sum()
    }

    /// Slots with a nonzero weight as `(bone index, weight)` pairs
    pub fn influences(&self) -> impl Iterator<Item = (usize, u8)> + '_ {
        self.weights
            .iter()
            .zip(self.indices.iter())
            .filter(|&(&weight, _)| weight > 0)
            .map(|(&weight, &index)| (usize::from(index), weight))
    }

    /// Weight this vertex gives to `bone`, zero if it is not an influence
    pub fn weight_for(&self, bone: usize) -> u8 {
        self.influences()
            .filter(|&(index, _)| index == bone)
            .map(|(_, weight)| weight)
            .last()
            .unwrap_or(0)
    }
}

/// A mesh sample in its rest pose
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vertex {
    pub position: Vec3,
    pub bone_weights: BoneWeights,
    /// Normal vector
    pub normal: Vec3,
    /// Primary texture coordinates
    pub tex_coords: Vec2,
    /// Secondary texture coordinates
    pub tex_coords2: Vec2,
}

impl Vertex {
    pub fn new(position: Vec3, bone_weights: BoneWeights) -> Self {
        Self {
            position,
            bone_weights,
            normal: Vec3::Z,
            ..Default::default()
        }
    }
}
