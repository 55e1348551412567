//! Axis classification and release decisions.

use super::Commit;

/// Dominant axis of a gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Classify a displacement from the gesture start.
///
/// Returns `None` while both deltas are inside the dead zone. Ties go to
/// vertical so the page keeps scrolling when intent is unclear.
#[must_use]
pub fn classify(dx: f32, dy: f32, dead_zone: f32) -> Option<Axis> {
    let (ax, ay) = (dx.abs(), dy.abs());
    if ax < dead_zone && ay < dead_zone {
        return None;
    }
    if ax > ay {
        Some(Axis::Horizontal)
    } else {
        Some(Axis::Vertical)
    }
}

/// Decide what a drag of `moved_by` px commits to.
///
/// Only movement strictly beyond `threshold` steps; the boundary snaps back.
#[must_use]
pub fn decide(moved_by: f32, threshold: f32) -> Commit {
    if moved_by < -threshold {
        Commit::Advance
    } else if moved_by > threshold {
        Commit::Retreat
    } else {
        Commit::SnapBack
    }
}
