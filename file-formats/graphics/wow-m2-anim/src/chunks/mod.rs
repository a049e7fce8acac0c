//! Strongly typed M2 model data as handed over by the asset loader

pub mod animation;
pub mod bone;
pub mod skin;
pub mod texture;
pub mod vertex;

pub use animation::{Animation, AnimationFlags};
pub use bone::{Bone, BoneFlags};
pub use skin::{Batch, Geoset, SkinProfile, Submesh, geoset_group_name};
pub use texture::{TextureFlags, TextureSlot, TextureType};
pub use vertex::{BoneWeights, FULL_WEIGHT, Vertex};
