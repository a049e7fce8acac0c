//! M2 Animation System
//!
//! This module provides skeletal animation support for M2 models, including:
//! - Keyframe tracks whose animations share one global timeline
//! - Keyframe interpolation (step, linear, nlerp for rotations)
//! - Bone hierarchy transform computation with pivot correction
//! - A playback cursor for stepping through animations
//!
//! # Example
//!
//! ```rust
//! use glam::Vec3;
//! use wow_m2_anim::animation::{Interpolation, Skeleton, Track, evaluate};
//! use wow_m2_anim::chunks::Bone;
//!
//! let mut root = Bone::new(None, Vec3::ZERO);
//! root.translation = Track::single_animation(
//!     Interpolation::Linear,
//!     vec![0, 1000],
//!     vec![Vec3::ZERO, Vec3::new(0.0, 0.0, 2.0)],
//! );
//! assert_eq!(evaluate(&root.translation, 0, 500), Some(Vec3::new(0.0, 0.0, 1.0)));
//!
//! let bones = vec![root];
//! let skeleton = Skeleton::new(&bones)?;
//! let matrices = skeleton.pose(&bones, 0, 500)?;
//! assert_eq!(matrices.len(), 1);
//! # Ok::<(), wow_m2_anim::AnimError>(())
//! ```

mod interpolation;
mod skeleton;
mod state;
mod types;

pub use interpolation::{evaluate, find_bracketing_keyframes};
pub use skeleton::{Skeleton, TransformCache, local_transform, world_transform};
pub use state::{AnimationCursor, PlaybackOptions};
pub use types::{
    DEGENERATE_QUAT_LENGTH, Interpolation, KeyframeRange, Lerp, Track, TrackView, nlerp,
};
