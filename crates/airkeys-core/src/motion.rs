//! Per-finger motion detection between two consecutive feature sets.
//!
//! Empirically tuned thresholds; preserved as-is, no documented derivation
//! exists for them.

use crate::hand::{Finger, FingerFeature, FINGER_COUNT};
use smallvec::SmallVec;

// Base movement threshold, in normalized-coordinate units.
pub const MOVE_THRESHOLD: f32 = 0.015;

// An extension delta counts at 0.8x the base threshold.
pub const EXTENSION_WEIGHT: f32 = 0.8;

// A bend this strong overrides the palm-motion veto.
pub const VETO_OVERRIDE_WEIGHT: f32 = 1.5;

// Average tip displacement above which the whole hand counts as moving.
pub const PALM_MOTION_THRESHOLD: f32 = 0.02;

/// Moved-finger set for one frame, ascending finger order, at most 5 entries.
pub type MovedFingers = SmallVec<[Finger; FINGER_COUNT]>;

/// Average per-tip displacement between two frames.
///
/// Cheap proxy for whole-hand translation; there is no independent
/// wrist-stability signal from the tracker.
pub fn palm_displacement(
    current: &[FingerFeature; FINGER_COUNT],
    previous: &[FingerFeature; FINGER_COUNT],
) -> f32 {
    let total: f32 = (0..FINGER_COUNT)
        .map(|i| current[i].tip.distance(previous[i].tip))
        .sum();
    total / FINGER_COUNT as f32
}

/// Decide which fingers moved this frame.
///
/// A finger is a candidate if its extension changed by more than
/// `0.8 * MOVE_THRESHOLD` or its tip travelled more than `MOVE_THRESHOLD`.
/// When the palm itself is moving, candidates are vetoed unless the
/// extension change exceeds `1.5 * MOVE_THRESHOLD` (a strong deliberate
/// bend). All comparisons are strict.
pub fn moved_fingers(
    current: &[FingerFeature; FINGER_COUNT],
    previous: &[FingerFeature; FINGER_COUNT],
) -> MovedFingers {
    let mut moved = MovedFingers::new();
    let mut palm: Option<bool> = None;

    for finger in Finger::ALL {
        let i = finger.index();
        let extension_change = (current[i].extension - previous[i].extension).abs();
        let tip_movement = current[i].tip.distance(previous[i].tip);

        let candidate = extension_change > EXTENSION_WEIGHT * MOVE_THRESHOLD
            || tip_movement > MOVE_THRESHOLD;
        if !candidate {
            continue;
        }

        // Palm motion is computed lazily, once per frame.
        let palm_moving = *palm.get_or_insert_with(|| {
            palm_displacement(current, previous) > PALM_MOTION_THRESHOLD
        });
        if palm_moving && extension_change <= VETO_OVERRIDE_WEIGHT * MOVE_THRESHOLD {
            continue;
        }

        moved.push(finger);
    }
    moved
}
