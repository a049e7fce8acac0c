//! Bone hierarchy transform computation for M2 skeletal animation
//!
//! Each bone's local transform pivots rotation and scale about its rest-pose
//! pivot point:
//!
//! ```text
//! local = T(pivot) * T(translation) * R(rotation) * S(scale) * T(-pivot)
//! world = parent_world * local
//! ```
//!
//! Two entry points compute world matrices. [`world_transform`] resolves a
//! single bone on demand and memoizes its parent chain in a per-frame
//! [`TransformCache`]. [`Skeleton`] validates the hierarchy once, orders the
//! bones parents-first and then poses the whole skeleton every frame without
//! recursion.

use std::collections::VecDeque;

use glam::{Mat4, Quat, Vec3};

use super::interpolation::evaluate;
use crate::chunks::Bone;
use crate::error::{AnimError, Result};

/// Local transform of a bone at a point of an animation.
///
/// Tracks without a value for the animation contribute identity: zero
/// translation, no rotation, unit scale.
pub fn local_transform(bone: &Bone, animation_index: usize, local_time_ms: u32) -> Mat4 {
    let translation =
        evaluate(&bone.translation, animation_index, local_time_ms).unwrap_or(Vec3::ZERO);
    let rotation =
        evaluate(&bone.rotation, animation_index, local_time_ms).unwrap_or(Quat::IDENTITY);
    let scale = evaluate(&bone.scale, animation_index, local_time_ms).unwrap_or(Vec3::ONE);

    Mat4::from_translation(bone.pivot)
        * Mat4::from_translation(translation)
        * Mat4::from_quat(rotation)
        * Mat4::from_scale(scale)
        * Mat4::from_translation(-bone.pivot)
}

/// World matrices computed during one frame evaluation.
///
/// A cache belongs to a single `(animation, time)` query; clear it or create
/// a new one before evaluating another frame.
#[derive(Debug, Clone, Default)]
pub struct TransformCache {
    matrices: Vec<Option<Mat4>>,
}

impl TransformCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bone_count: usize) -> Self {
        Self {
            matrices: vec![None; bone_count],
        }
    }

    pub fn get(&self, bone_index: usize) -> Option<Mat4> {
        self.matrices.get(bone_index).copied().flatten()
    }

    /// Number of bones resolved so far
    pub fn len(&self) -> usize {
        self.matrices.iter().filter(|m| m.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.matrices.iter_mut().for_each(|m| *m = None);
    }

    fn insert(&mut self, bone_index: usize, matrix: Mat4) {
        if bone_index >= self.matrices.len() {
            self.matrices.resize(bone_index + 1, None);
        }
        self.matrices[bone_index] = Some(matrix);
    }
}

/// World transform of one bone, resolving its parent chain first.
///
/// Every bone on the chain is stored in `cache`, so siblings evaluated with
/// the same cache reuse their ancestors. The chain walk is bounded by the
/// bone count, which turns a corrupt parent loop into
/// [`AnimError::ParentCycle`] instead of endless recursion.
pub fn world_transform(
    bones: &[Bone],
    bone_index: usize,
    animation_index: usize,
    local_time_ms: u32,
    cache: &mut TransformCache,
) -> Result<Mat4> {
    let count = bones.len();
    if bone_index >= count {
        return Err(AnimError::BoneIndexOutOfRange {
            index: bone_index,
            count,
        });
    }

    // Walk up until a cached ancestor or a root is found
    let mut chain = Vec::new();
    let mut parent_world = Mat4::IDENTITY;
    let mut current = Some(bone_index);
    while let Some(index) = current {
        if let Some(cached) = cache.get(index) {
            parent_world = cached;
            break;
        }
        if chain.len() == count {
            return Err(AnimError::ParentCycle { bone: bone_index });
        }
        chain.push(index);

        current = match bones[index].parent_index() {
            Some(parent) if parent >= count => {
                return Err(AnimError::InvalidParent { bone: index, parent });
            }
            parent => parent,
        };
    }

    let mut world = parent_world;
    for &index in chain.iter().rev() {
        let local = local_transform(&bones[index], animation_index, local_time_ms);
        world = if bones[index].is_root() {
            local
        } else {
            world * local
        };
        cache.insert(index, world);
    }

    Ok(world)
}

/// A validated bone hierarchy with a fixed parents-first evaluation order
#[derive(Debug, Clone, Default)]
pub struct Skeleton {
    parents: Vec<Option<usize>>,
    order: Vec<usize>,
}

impl Skeleton {
    /// Validate parent links and order the bones so every parent precedes
    /// its children, whatever order the bones were declared in.
    pub fn new(bones: &[Bone]) -> Result<Self> {
        let count = bones.len();
        let mut parents = Vec::with_capacity(count);
        let mut children = vec![Vec::new(); count];

        for (index, bone) in bones.iter().enumerate() {
            let parent = bone.parent_index();
            if let Some(parent) = parent {
                if parent >= count {
                    return Err(AnimError::InvalidParent { bone: index, parent });
                }
                children[parent].push(index);
            }
            parents.push(parent);
        }

        let mut queue: VecDeque<usize> = (0..count).filter(|&i| parents[i].is_none()).collect();
        let mut order = Vec::with_capacity(count);
        while let Some(index) = queue.pop_front() {
            order.push(index);
            queue.extend(children[index].iter().copied());
        }

        if order.len() < count {
            let mut ordered = vec![false; count];
            for &index in &order {
                ordered[index] = true;
            }
            let bone = ordered.iter().position(|&done| !done).unwrap_or_default();
            return Err(AnimError::ParentCycle { bone });
        }

        log::debug!(
            "Skeleton with {} bones, {} roots",
            count,
            parents.iter().filter(|p| p.is_none()).count()
        );

        Ok(Self { parents, order })
    }

    /// Get number of bones
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// Bone indices in evaluation order
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn parent(&self, bone_index: usize) -> Option<usize> {
        self.parents.get(bone_index).copied().flatten()
    }

    /// World matrix of every bone at a point of an animation.
    ///
    /// `bones` must be the table the skeleton was built from; the hierarchy
    /// recorded at construction is used, animation tracks are read fresh.
    pub fn pose(
        &self,
        bones: &[Bone],
        animation_index: usize,
        local_time_ms: u32,
    ) -> Result<Vec<Mat4>> {
        if bones.len() != self.len() {
            return Err(AnimError::SkeletonMismatch {
                expected: self.len(),
                actual: bones.len(),
            });
        }

        let mut matrices = vec![Mat4::IDENTITY; bones.len()];
        for &index in &self.order {
            let local = local_transform(&bones[index], animation_index, local_time_ms);
            matrices[index] = match self.parents[index] {
                Some(parent) => matrices[parent] * local,
                None => local,
            };
        }
        Ok(matrices)
    }
}
