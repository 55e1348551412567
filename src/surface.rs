//! The visual contract between the engine and its host.
//!
//! Anything able to translate a track horizontally and run a timed easing
//! curve can host a carousel: a browser element with a CSS transform, a
//! terminal strip, a GPU quad. [`HeadlessSurface`] records state instead of
//! drawing and backs the test suite and text rendering.

use bitflags::bitflags;
use std::time::Duration;

bitflags! {
    /// Style flags on the track element.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct TrackClasses: u8 {
        /// A horizontal drag is in progress.
        const DRAGGING = 1 << 0;
        /// The track is padded with clones and loops.
        const LOOPING = 1 << 1;
    }
}

/// Identifies one committed transition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransitionId(pub(crate) u64);

impl TransitionId {
    /// Raw id, for hosts that tag their own transition handles with it.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Transition applied to the next offset change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Transition {
    /// Jump immediately.
    #[default]
    None,
    /// Ease to the next offset over `duration`.
    Ease { id: TransitionId, duration: Duration },
}

impl Transition {
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Ease { .. })
    }
}

/// Host rendering surface for one carousel.
pub trait TrackSurface {
    /// Translate the track horizontally to `px`.
    fn set_offset(&mut self, px: f32);

    /// Set the transition used by subsequent offset changes.
    fn set_transition(&mut self, transition: Transition);

    /// Replace the track's style flags.
    fn set_classes(&mut self, classes: TrackClasses);

    /// Create `count` inactive indicators, replacing any existing ones.
    fn create_indicators(&mut self, count: usize);

    /// Mark one indicator active or inactive.
    fn set_indicator_active(&mut self, index: usize, active: bool);
}

impl<S: TrackSurface + ?Sized> TrackSurface for Box<S> {
    fn set_offset(&mut self, px: f32) {
        (**self).set_offset(px);
    }

    fn set_transition(&mut self, transition: Transition) {
        (**self).set_transition(transition);
    }

    fn set_classes(&mut self, classes: TrackClasses) {
        (**self).set_classes(classes);
    }

    fn create_indicators(&mut self, count: usize) {
        (**self).create_indicators(count);
    }

    fn set_indicator_active(&mut self, index: usize, active: bool) {
        (**self).set_indicator_active(index, active);
    }
}

/// One recorded surface call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SurfaceOp {
    Offset(f32),
    Transition(Transition),
    Classes(TrackClasses),
    CreateIndicators(usize),
    Indicator { index: usize, active: bool },
}

/// A surface that records its state and every call made to it.
#[derive(Clone, Debug, Default)]
pub struct HeadlessSurface {
    offset: f32,
    transition: Transition,
    classes: TrackClasses,
    indicators: Vec<bool>,
    ops: Vec<SurfaceOp>,
}

impl HeadlessSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current track offset in px.
    #[must_use]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Current transition setting.
    #[must_use]
    pub fn transition(&self) -> Transition {
        self.transition
    }

    #[must_use]
    pub fn classes(&self) -> TrackClasses {
        self.classes
    }

    /// Indicator states in order.
    #[must_use]
    pub fn indicators(&self) -> &[bool] {
        &self.indicators
    }

    /// Index of the single active indicator, if any.
    #[must_use]
    pub fn active_indicator(&self) -> Option<usize> {
        self.indicators.iter().position(|active| *active)
    }

    /// Every call made so far.
    #[must_use]
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Forget recorded calls, keeping state.
    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }
}

impl TrackSurface for HeadlessSurface {
    fn set_offset(&mut self, px: f32) {
        self.offset = px;
        self.ops.push(SurfaceOp::Offset(px));
    }

    fn set_transition(&mut self, transition: Transition) {
        self.transition = transition;
        self.ops.push(SurfaceOp::Transition(transition));
    }

    fn set_classes(&mut self, classes: TrackClasses) {
        self.classes = classes;
        self.ops.push(SurfaceOp::Classes(classes));
    }

    fn create_indicators(&mut self, count: usize) {
        self.indicators = vec![false; count];
        self.ops.push(SurfaceOp::CreateIndicators(count));
    }

    fn set_indicator_active(&mut self, index: usize, active: bool) {
        if let Some(slot) = self.indicators.get_mut(index) {
            *slot = active;
        }
        self.ops.push(SurfaceOp::Indicator { index, active });
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_headless_records_state() {
        let mut surface = HeadlessSurface::new();
        surface.set_transition(Transition::Ease {
            id: TransitionId(1),
            duration: Duration::from_millis(300),
        });
        surface.set_offset(-600.0);
        surface.set_classes(TrackClasses::LOOPING);

        assert_eq!(surface.offset(), -600.0);
        assert!(surface.transition().is_enabled());
        assert!(surface.classes().contains(TrackClasses::LOOPING));
        assert_eq!(surface.ops().len(), 3);

        surface.clear_ops();
        assert!(surface.ops().is_empty());
        assert_eq!(surface.offset(), -600.0);
    }

    #[test]
    fn test_headless_indicators() {
        let mut surface = HeadlessSurface::new();
        surface.create_indicators(3);
        assert_eq!(surface.active_indicator(), None);
        surface.set_indicator_active(2, true);
        assert_eq!(surface.active_indicator(), Some(2));
        // Out-of-range updates are recorded but ignored.
        surface.set_indicator_active(9, true);
        assert_eq!(surface.indicators(), &[false, false, true]);
    }

    #[test]
    fn test_boxed_surface() {
        let mut surface: Box<HeadlessSurface> = Box::default();
        TrackSurface::set_offset(&mut surface, -10.0);
        assert_eq!(surface.offset(), -10.0);
    }
}
