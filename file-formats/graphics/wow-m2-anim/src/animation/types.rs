//! Common types for M2 animation tracks

use glam::{Quat, Vec3, Vec4};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Blended quaternions shorter than this collapse to identity
pub const DEGENERATE_QUAT_LENGTH: f32 = 1e-10;

/// Trait for types that can be interpolated between two keyframes
pub trait Lerp: Copy {
    /// Blend between self and other, `t` in `[0.0, 1.0]`
    fn lerp(&self, other: &Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for Vec3 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        *self + (*other - *self) * t
    }
}

impl Lerp for Quat {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        nlerp(*self, *other, t)
    }
}

/// Normalized linear interpolation between two quaternions.
///
/// Takes the shorter arc by negating `b` when the two quaternions point into
/// opposite hemispheres, blends component-wise and renormalizes. A blend that
/// cancels out to (nearly) zero length yields [`Quat::IDENTITY`].
pub fn nlerp(a: Quat, b: Quat, t: f32) -> Quat {
    let b = if a.dot(b) < 0.0 { -b } else { b };
    let (a, b) = (Vec4::from(a), Vec4::from(b));
    let blended = a + (b - a) * t;

    let length = blended.length();
    if length < DEGENERATE_QUAT_LENGTH {
        return Quat::IDENTITY;
    }
    Quat::from_vec4(blended / length)
}

/// How values between two keyframes are produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Interpolation {
    /// Hold the earlier keyframe until the next one is reached
    Step,
    /// Blend linearly (nlerp for rotations)
    #[default]
    Linear,
}

impl Interpolation {
    /// Convert the raw M2 interpolation type.
    ///
    /// Bezier (2) and Hermite (3) tracks are evaluated linearly, as is any
    /// unknown value.
    pub fn from_raw(value: u16) -> Self {
        match value {
            0 => Self::Step,
            _ => Self::Linear,
        }
    }
}

/// Half-open `[start, end)` range of keyframes owned by one animation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KeyframeRange {
    pub start: u32,
    pub end: u32,
}

impl KeyframeRange {
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

impl From<(u32, u32)> for KeyframeRange {
    fn from((start, end): (u32, u32)) -> Self {
        Self { start, end }
    }
}

/// An animated property sampled on the model's global timeline.
///
/// Every animation shares the same `timestamps` and `values` buffers; an
/// animation only owns the slice named by its entry in `ranges`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Track<T> {
    /// Interpolation between keyframes
    pub interpolation: Interpolation,
    /// Global sequence index, if the track loops independently of animations
    pub global_sequence: Option<u16>,
    /// Keyframe range per animation, indexed by animation
    pub ranges: Vec<KeyframeRange>,
    /// Keyframe times in milliseconds, non-decreasing
    pub timestamps: Vec<u32>,
    /// Keyframe values, one per timestamp
    pub values: Vec<T>,
}

impl<T> Track<T> {
    /// Create a track without keyframes
    pub fn empty() -> Self {
        Self {
            interpolation: Interpolation::Linear,
            global_sequence: None,
            ranges: Vec::new(),
            timestamps: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Create a track whose only animation spans every keyframe
    pub fn single_animation(
        interpolation: Interpolation,
        timestamps: Vec<u32>,
        values: Vec<T>,
    ) -> Self {
        let end = timestamps.len() as u32;
        Self {
            interpolation,
            global_sequence: None,
            ranges: vec![KeyframeRange::new(0, end)],
            timestamps,
            values,
        }
    }

    /// Convert the raw global sequence field (65535 or -1 means none)
    pub fn global_sequence_from_raw(raw: u16) -> Option<u16> {
        (raw != u16::MAX).then_some(raw)
    }

    /// Check if the track has any keyframes at all
    pub fn has_data(&self) -> bool {
        !self.values.is_empty()
    }

    /// Check if track uses a global sequence
    pub fn uses_global_sequence(&self) -> bool {
        self.global_sequence.is_some()
    }

    /// Borrow the keyframes of one animation.
    ///
    /// Returns `None` when the track is empty, the animation has no range, or
    /// the range is empty or starts past the end of the shared buffers. The
    /// end of the range is clamped to the buffers.
    pub fn view(&self, animation_index: usize) -> Option<TrackView<'_, T>> {
        if self.values.is_empty() {
            return None;
        }
        let range = *self.ranges.get(animation_index)?;
        let available = self.timestamps.len().min(self.values.len());
        let start = range.start as usize;
        let end = (range.end as usize).min(available);
        if range.is_empty() || start >= end {
            return None;
        }

        Some(TrackView {
            interpolation: self.interpolation,
            start,
            timestamps: &self.timestamps[start..end],
            values: &self.values[start..end],
        })
    }
}

impl<T> Default for Track<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Borrowed keyframes of a single animation within a shared track buffer
#[derive(Debug, Clone, Copy)]
pub struct TrackView<'a, T> {
    pub interpolation: Interpolation,
    /// Position of the first keyframe within the shared buffers
    pub start: usize,
    pub timestamps: &'a [u32],
    pub values: &'a [T],
}

impl<T> TrackView<'_, T> {
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Timestamp of the first keyframe, the origin of local time
    pub fn first_timestamp(&self) -> u32 {
        self.timestamps[0]
    }

    /// Timestamp of the last keyframe
    pub fn last_timestamp(&self) -> u32 {
        self.timestamps[self.timestamps.len() - 1]
    }
}
