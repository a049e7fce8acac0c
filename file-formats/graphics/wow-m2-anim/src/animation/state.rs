//! Animation playback position for previewing M2 models

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::chunks::Animation;

/// Playback configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlaybackOptions {
    /// Frame step in milliseconds
    pub step_ms: u32,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        // ~30 fps
        Self { step_ms: 33 }
    }
}

/// Current animation and local time within it.
///
/// Stepping wraps around the animation's duration; every method is a no-op
/// on a model without animations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AnimationCursor {
    /// Index of the current animation sequence
    pub animation_index: usize,
    /// Current time within the animation (milliseconds)
    pub time_ms: u32,
    pub options: PlaybackOptions,
}

impl AnimationCursor {
    pub fn new(options: PlaybackOptions) -> Self {
        Self {
            animation_index: 0,
            time_ms: 0,
            options,
        }
    }

    /// The animation the cursor points at
    pub fn current<'a>(&self, animations: &'a [Animation]) -> Option<&'a Animation> {
        animations.get(self.animation_index)
    }

    /// Reset the animation time to the beginning
    pub fn reset_time(&mut self) {
        self.time_ms = 0;
    }

    /// Move to the next animation, wrapping to the first
    pub fn cycle(&mut self, animations: &[Animation]) {
        if animations.is_empty() {
            return;
        }
        self.animation_index = (self.animation_index + 1) % animations.len();
        self.time_ms = 0;
    }

    pub fn step_forward(&mut self, animations: &[Animation]) {
        self.step(animations, i64::from(self.options.step_ms));
    }

    pub fn step_backward(&mut self, animations: &[Animation]) {
        self.step(animations, -i64::from(self.options.step_ms));
    }

    fn step(&mut self, animations: &[Animation], delta: i64) {
        let Some(animation) = self.current(animations) else {
            return;
        };
        let duration = i64::from(animation.duration().max(1));
        self.time_ms = (i64::from(self.time_ms) + delta).rem_euclid(duration) as u32;
    }
}
