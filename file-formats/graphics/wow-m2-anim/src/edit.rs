//! Vertex position edits on the rest-pose mesh
//!
//! Edits mutate `Vertex::position` in place. Keep a copy of the positions
//! taken at load time (see [`M2Model::rest_positions`]) to find the vertices
//! that need writing back with [`changed_vertices`].
//!
//! [`M2Model::rest_positions`]: crate::model::M2Model::rest_positions

use glam::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::chunks::Vertex;
use crate::error::{AnimError, Result};

/// Mirror pairing configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MirrorOptions {
    /// Largest distance between a vertex and the Y-flipped position of its
    /// counterpart
    pub tolerance: f32,
}

impl Default for MirrorOptions {
    fn default() -> Self {
        Self { tolerance: 0.05 }
    }
}

fn check_selection(selection: &[usize], count: usize) -> Result<()> {
    match selection.iter().find(|&&index| index >= count) {
        Some(&index) => Err(AnimError::VertexIndexOutOfRange { index, count }),
        None => Ok(()),
    }
}

fn unique(selection: &[usize]) -> Vec<usize> {
    let mut indices = Vec::with_capacity(selection.len());
    for &index in selection {
        if !indices.contains(&index) {
            indices.push(index);
        }
    }
    indices
}

/// Scale selected vertices about their centroid.
///
/// Duplicate indices in `selection` are counted once.
pub fn scale_about_centroid(
    vertices: &mut [Vertex],
    selection: &[usize],
    factor: f32,
) -> Result<()> {
    check_selection(selection, vertices.len())?;
    let selection = unique(selection);
    if selection.is_empty() {
        return Ok(());
    }

    let center = selection
        .iter()
        .map(|&index| vertices[index].position)
        .sum::<Vec3>()
        / selection.len() as f32;

    for &index in &selection {
        let position = &mut vertices[index].position;
        *position = center + (*position - center) * factor;
    }
    Ok(())
}

/// Counterpart of every vertex across the `Y = 0` plane
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MirrorMap {
    counterparts: Vec<Option<usize>>,
}

impl MirrorMap {
    /// Pair each vertex with the vertex nearest to its Y-flipped position.
    ///
    /// Only the nearest candidate is considered (the first one on ties); the
    /// pair is kept when it lies strictly within `tolerance` and is not the
    /// vertex itself.
    pub fn build(positions: &[Vec3], tolerance: f32) -> Self {
        let limit = tolerance * tolerance;
        let counterparts = positions
            .iter()
            .enumerate()
            .map(|(index, position)| {
                let flipped = Vec3::new(position.x, -position.y, position.z);
                let (nearest, distance) = positions
                    .iter()
                    .map(|candidate| candidate.distance_squared(flipped))
                    .enumerate()
                    .fold((0, f32::INFINITY), |best, (j, d)| {
                        if d < best.1 { (j, d) } else { best }
                    });
                (distance < limit && nearest != index).then_some(nearest)
            })
            .collect::<Vec<_>>();

        log::debug!(
            "Mirror map: {} of {} vertices paired",
            counterparts.iter().flatten().count(),
            positions.len()
        );

        Self { counterparts }
    }

    pub fn counterpart(&self, index: usize) -> Option<usize> {
        self.counterparts.get(index).copied().flatten()
    }

    /// Number of vertices the map was built for
    pub fn len(&self) -> usize {
        self.counterparts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counterparts.is_empty()
    }
}

/// Copy selected vertices onto their counterparts outside the selection,
/// flipping Y.
///
/// Returns the `(source, destination)` pairs that were applied; an empty
/// list means no selected vertex has a counterpart outside the selection.
pub fn mirror_selection(
    vertices: &mut [Vertex],
    map: &MirrorMap,
    selection: &[usize],
) -> Result<Vec<(usize, usize)>> {
    let count = vertices.len();
    check_selection(selection, count)?;

    let selection = unique(selection);
    let mut pairs = Vec::new();
    for &source in &selection {
        match map.counterpart(source) {
            Some(destination) if destination < count && !selection.contains(&destination) => {
                pairs.push((source, destination));
            }
            _ => {}
        }
    }

    for &(source, destination) in &pairs {
        let position = vertices[source].position;
        vertices[destination].position = Vec3::new(position.x, -position.y, position.z);
    }
    Ok(pairs)
}

/// A vertex whose position differs from the one recorded at load time
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VertexChange {
    pub index: usize,
    pub before: Vec3,
    pub after: Vec3,
}

/// Vertices whose current position is not exactly the original one, in
/// index order
pub fn changed_vertices(original: &[Vec3], current: &[Vertex]) -> Vec<VertexChange> {
    original
        .iter()
        .zip(current)
        .enumerate()
        .filter(|(_, (before, vertex))| **before != vertex.position)
        .map(|(index, (&before, vertex))| VertexChange {
            index,
            before,
            after: vertex.position,
        })
        .collect()
}
