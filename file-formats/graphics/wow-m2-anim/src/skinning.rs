//! Linear-blend vertex skinning for M2 models
//!
//! Every vertex carries up to four `(weight, bone index)` influences with
//! weights in `0..=255`. The deformed position is the weighted sum of the
//! rest position transformed by each influencing bone:
//!
//! ```text
//! position = sum(world[index] * rest * weight / 255)
//! ```
//!
//! Skinning is stateless: call [`deform`] again whenever the pose or the
//! vertex buffer changes.
//!
//! # Example
//!
//! ```rust
//! use glam::{Mat4, Vec3};
//! use wow_m2_anim::chunks::{BoneWeights, Vertex};
//! use wow_m2_anim::skinning::deform;
//!
//! let vertices = vec![Vertex::new(Vec3::new(1.0, 0.0, 0.0), BoneWeights::single(0))];
//! let matrices = vec![Mat4::from_translation(Vec3::Z)];
//!
//! let positions = deform(&vertices, &matrices);
//! assert_eq!(positions, vec![Vec3::new(1.0, 0.0, 1.0)]);
//! ```

use glam::{Mat4, Vec3};

use crate::animation::Skeleton;
use crate::chunks::{FULL_WEIGHT, Vertex};
use crate::error::Result;
use crate::model::M2Model;

/// Deformed position of every vertex, in input order.
///
/// Zero-weight slots are skipped without reading their bone index. A slot
/// whose bone index has no matrix in `bone_matrices` is dropped; the rest of
/// the vertex is still skinned.
pub fn deform(vertices: &[Vertex], bone_matrices: &[Mat4]) -> Vec<Vec3> {
    vertices
        .iter()
        .map(|vertex| skin_vertex(vertex, bone_matrices))
        .collect()
}

/// Deformed position of a single vertex
pub fn skin_vertex(vertex: &Vertex, bone_matrices: &[Mat4]) -> Vec3 {
    let mut position = Vec3::ZERO;
    for (bone_index, weight) in vertex.bone_weights.influences() {
        let Some(matrix) = bone_matrices.get(bone_index) else {
            log::trace!(
                "Dropping influence of bone {} ({} matrices available)",
                bone_index,
                bone_matrices.len()
            );
            continue;
        };
        let factor = f32::from(weight) / f32::from(FULL_WEIGHT);
        position += matrix.transform_point3(vertex.position) * factor;
    }
    position
}

/// Pose the model's skeleton and skin all of its vertices.
///
/// Fails when the bone hierarchy is malformed.
pub fn deform_model(
    model: &M2Model,
    animation_index: usize,
    local_time_ms: u32,
) -> Result<Vec<Vec3>> {
    let skeleton = Skeleton::new(&model.bones)?;
    let matrices = skeleton.pose(&model.bones, animation_index, local_time_ms)?;
    Ok(deform(&model.vertices, &matrices))
}

/// Weight of one bone on every vertex, scaled to `0.0..=1.0`
pub fn bone_influence(vertices: &[Vertex], bone_index: usize) -> Vec<f32> {
    vertices
        .iter()
        .map(|vertex| {
            f32::from(vertex.bone_weights.weight_for(bone_index)) / f32::from(FULL_WEIGHT)
        })
        .collect()
}
