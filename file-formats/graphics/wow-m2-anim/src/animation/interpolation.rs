//! Keyframe interpolation for M2 animation tracks

use super::types::{Interpolation, Lerp, Track};

/// Find the keyframes bracketing `time`.
///
/// Expects `timestamps[0] < time < timestamps[len - 1]`, which the caller
/// establishes by clamping first. Returns `(lo, hi)` with
/// `timestamps[lo] <= time < timestamps[hi]` and `hi == lo + 1`.
pub fn find_bracketing_keyframes(timestamps: &[u32], time: u64) -> (usize, usize) {
    let mut lo = 0;
    let mut hi = timestamps.len().saturating_sub(1);

    while lo + 1 < hi {
        let mid = (lo + hi) / 2;
        if u64::from(timestamps[mid]) <= time {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    (lo, hi)
}

/// Sample a track for one animation at a local time.
///
/// Local time is measured from the first keyframe of the animation's range,
/// not from zero on the global timeline. Times before the first or after the
/// last keyframe clamp to that keyframe.
///
/// Returns `None` when the track has no keyframes for `animation_index`; the
/// caller decides what the property defaults to.
pub fn evaluate<T: Lerp>(
    track: &Track<T>,
    animation_index: usize,
    local_time_ms: u32,
) -> Option<T> {
    let view = track.view(animation_index)?;
    let first = u64::from(view.first_timestamp());
    let global_time = first + u64::from(local_time_ms);

    if global_time <= first {
        return Some(view.values[0]);
    }
    if global_time >= u64::from(view.last_timestamp()) {
        return Some(view.values[view.len() - 1]);
    }

    let (lo, hi) = find_bracketing_keyframes(view.timestamps, global_time);
    let (time_lo, time_hi) = (view.timestamps[lo], view.timestamps[hi]);

    if view.interpolation == Interpolation::Step || time_lo == time_hi {
        return Some(view.values[lo]);
    }

    let t = (global_time - u64::from(time_lo)) as f32 / (time_hi - time_lo) as f32;
    Some(Lerp::lerp(&view.values[lo], &view.values[hi], t))
}
