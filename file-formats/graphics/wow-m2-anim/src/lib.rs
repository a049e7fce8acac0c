//! Skeletal animation and deformation for World of Warcraft M2 models.
//!
//! Poses the skeleton of an already parsed [`M2Model`] from its keyframe
//! tracks and skins its vertices. The texture files a model refers to are
//! located on disk by [`texture_resolver`].
//!
//! ```rust
//! use glam::Vec3;
//! use wow_m2_anim::chunks::{Bone, BoneWeights, Vertex};
//! use wow_m2_anim::{M2Model, deform_model};
//!
//! let model = M2Model {
//!     bones: vec![Bone::new(None, Vec3::ZERO)],
//!     vertices: vec![Vertex::new(Vec3::ONE, BoneWeights::single(0))],
//!     ..Default::default()
//! };
//!
//! let positions = deform_model(&model, 0, 0)?;
//! assert_eq!(positions, vec![Vec3::ONE]);
//! # Ok::<(), wow_m2_anim::AnimError>(())
//! ```

pub mod animation;
pub mod chunks;
pub mod edit;
pub mod error;
pub mod model;
pub mod skinning;
pub mod texture_resolver;
pub mod weights;

// Re-export common types
pub use animation::{AnimationCursor, Skeleton, TransformCache, evaluate, world_transform};
pub use error::{AnimError, Result};
pub use model::M2Model;
pub use skinning::{deform, deform_model};
pub use texture_resolver::{TextureKey, TextureSearchOptions, resolve_textures};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
