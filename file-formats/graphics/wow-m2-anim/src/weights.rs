//! Bone weight editing that keeps vertices fully skinned
//!
//! Weights of a skinned vertex must add up to [`FULL_WEIGHT`]. Changing the
//! weight of one bone rescales the other influences proportionally; the
//! rounding residue lands on whichever slot is largest afterwards.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::chunks::{BoneWeights, FULL_WEIGHT, Vertex};
use crate::error::{AnimError, Result};

/// Weight editing configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WeightEditOptions {
    /// Weight added or removed per edit
    pub delta: u8,
}

impl Default for WeightEditOptions {
    fn default() -> Self {
        Self { delta: 25 }
    }
}

/// Slot holding `bone`, preferring one that actually carries weight
fn find_slot(weights: &BoneWeights, bone: u8) -> Option<usize> {
    let mut matching = (0..4).filter(|&slot| weights.indices[slot] == bone);
    let first = matching.next()?;
    Some(
        std::iter::once(first)
            .chain(matching)
            .find(|&slot| weights.weights[slot] > 0)
            .unwrap_or(first),
    )
}

/// First slot with the smallest weight
fn smallest_slot(weights: &[u8; 4]) -> usize {
    (1..4).fold(0, |min, slot| {
        if weights[slot] < weights[min] {
            slot
        } else {
            min
        }
    })
}

/// First slot with the largest weight
fn largest_slot(weights: &[i32; 4]) -> usize {
    (1..4).fold(0, |max, slot| {
        if weights[slot] > weights[max] {
            slot
        } else {
            max
        }
    })
}

/// Raise or lower the weight of `bone` by `delta`.
///
/// A bone without a slot claims the smallest one when increasing and is left
/// alone when decreasing. A bone cannot be lowered when no other influence
/// could absorb the weight. Slots emptied by the rescale get their bone
/// index reset to 0.
///
/// Returns `true` if the weights changed; `weights` is untouched otherwise.
pub fn adjust_bone_weight(weights: &mut BoneWeights, bone: u8, increase: bool, delta: u8) -> bool {
    let mut edited = *weights;

    let slot = match find_slot(&edited, bone) {
        Some(slot) => slot,
        None if increase => {
            let slot = smallest_slot(&edited.weights);
            edited.indices[slot] = bone;
            edited.weights[slot] = 0;
            slot
        }
        None => return false,
    };

    let full = i32::from(FULL_WEIGHT);
    let delta = if increase {
        i32::from(delta)
    } else {
        -i32::from(delta)
    };
    let old = i32::from(edited.weights[slot]);
    let new = (old + delta).clamp(0, full);
    if new == old {
        return false;
    }

    let other_sum: i32 = (0..4)
        .filter(|&j| j != slot)
        .map(|j| i32::from(edited.weights[j]))
        .sum();
    if other_sum == 0 && !increase {
        return false;
    }

    let mut values = edited.weights.map(i32::from);
    values[slot] = new;
    if other_sum > 0 {
        let scale = f64::from(full - new) / f64::from(other_sum);
        for j in (0..4).filter(|&j| j != slot) {
            values[j] = (f64::from(values[j]) * scale).round_ties_even() as i32;
        }
    }

    let residue = full - values.iter().sum::<i32>();
    if residue != 0 {
        let fix = largest_slot(&values);
        values[fix] = (values[fix] + residue).max(0);
    }

    for j in 0..4 {
        edited.weights[j] = values[j].clamp(0, full) as u8;
        if edited.weights[j] == 0 && j != slot {
            edited.indices[j] = 0;
        }
    }

    *weights = edited;
    true
}

/// Apply [`adjust_bone_weight`] to every selected vertex.
///
/// The whole selection is validated before anything is modified. Returns the
/// indices of the vertices whose weights changed.
pub fn edit_selection_weights(
    vertices: &mut [Vertex],
    selection: &[usize],
    bone: u8,
    increase: bool,
    options: &WeightEditOptions,
) -> Result<Vec<usize>> {
    let count = vertices.len();
    if let Some(&index) = selection.iter().find(|&&index| index >= count) {
        return Err(AnimError::VertexIndexOutOfRange { index, count });
    }

    let mut changed = Vec::new();
    for &index in selection {
        if changed.contains(&index) {
            continue;
        }
        let weights = &mut vertices[index].bone_weights;
        if adjust_bone_weight(weights, bone, increase, options.delta) {
            log::debug!(
                "v{}: weights={:?} bones={:?}",
                index,
                weights.weights,
                weights.indices
            );
            changed.push(index);
        }
    }
    Ok(changed)
}
