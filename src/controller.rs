//! Position and wraparound control.
//!
//! The controller is the only writer of the authoritative index and track
//! offset. A committed slide marks the controller busy until it settles; if
//! the slide landed in the clone padding, settling jumps (without a
//! transition) to the real slot showing the same item, which is
//! pixel-identical, so the loop never visibly ends.

use crate::geometry::Pitch;
use crate::indicator::IndicatorRow;
use crate::surface::{TrackSurface, Transition, TransitionId};
use crate::track::PaddedSequence;
use std::time::Duration;

/// Result of a slide request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlideOutcome {
    /// A transition is in flight; the request was dropped.
    Rejected,
    /// Applied; nothing left to settle (looping disabled).
    Applied,
    /// Applied; the controller stays busy until `settle(id)`.
    Pending(TransitionId),
}

/// Result of settling a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settled {
    /// Index after normalization.
    pub index: usize,
    /// Index before normalization if the slide ended in the padding.
    pub wrapped_from: Option<usize>,
}

/// Owner of the carousel's index, offset and busy flag.
#[derive(Clone, Debug)]
pub struct PositionController {
    index: usize,
    offset: f32,
    pitch: Pitch,
    real_len: usize,
    clones: usize,
    max_static_index: usize,
    duration: Duration,
    in_flight: Option<TransitionId>,
    next_id: u64,
    indicators: Option<IndicatorRow>,
}

impl PositionController {
    /// Create a controller for a built sequence.
    #[must_use]
    pub fn new<T>(
        sequence: &PaddedSequence<T>,
        cards_to_show: usize,
        pitch: Pitch,
        duration: Duration,
    ) -> Self {
        let looping = sequence.is_looping();
        Self {
            index: sequence.real_start(),
            offset: 0.0,
            pitch,
            real_len: sequence.real_len(),
            clones: sequence.clone_count(),
            max_static_index: sequence.real_len().saturating_sub(cards_to_show),
            duration,
            in_flight: None,
            next_id: 0,
            indicators: looping.then(|| IndicatorRow::new(sequence.real_len())),
        }
    }

    /// Drop the indicator row when the host has nowhere to show it.
    #[must_use]
    pub fn with_indicators(mut self, enabled: bool) -> Self {
        if !enabled {
            self.indicators = None;
        }
        self
    }

    /// Current padded index.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Current track offset in px.
    #[must_use]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    #[must_use]
    pub fn pitch(&self) -> Pitch {
        self.pitch
    }

    /// Whether a committed transition has not settled yet.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Id of the transition in flight.
    #[must_use]
    pub fn in_flight(&self) -> Option<TransitionId> {
        self.in_flight
    }

    #[must_use]
    pub fn is_looping(&self) -> bool {
        self.clones > 0
    }

    #[must_use]
    pub fn clone_count(&self) -> usize {
        self.clones
    }

    #[must_use]
    pub fn real_len(&self) -> usize {
        self.real_len
    }

    /// Real item at the viewport origin.
    #[must_use]
    pub fn real_index(&self) -> Option<usize> {
        crate::indicator::real_index(self.index, self.clones, self.real_len)
    }

    /// Indicator row (absent when looping is disabled).
    #[must_use]
    pub fn indicators(&self) -> Option<&IndicatorRow> {
        self.indicators.as_ref()
    }

    /// First-frame setup: create indicators and show the real start without
    /// a transition.
    pub fn initialize<S: TrackSurface + ?Sized>(&mut self, surface: &mut S) {
        if let Some(row) = &self.indicators {
            surface.create_indicators(row.len());
            if let Some(active) = row.active() {
                surface.set_indicator_active(active, true);
            }
        }
        self.index = self.real_start();
        surface.set_transition(Transition::None);
        self.apply_offset(self.pitch.offset_for(self.index), surface);
        self.sync_indicators(surface);
    }

    fn real_start(&self) -> usize {
        self.clones
    }

    fn clamp(&self, target: usize) -> usize {
        if self.is_looping() {
            target.min(self.real_len + 2 * self.clones - 1)
        } else {
            target.min(self.max_static_index)
        }
    }

    fn allocate_id(&mut self) -> TransitionId {
        self.next_id += 1;
        TransitionId(self.next_id)
    }

    fn apply_offset<S: TrackSurface + ?Sized>(&mut self, px: f32, surface: &mut S) {
        self.offset = px;
        surface.set_offset(px);
    }

    fn sync_indicators<S: TrackSurface + ?Sized>(&mut self, surface: &mut S) {
        let Some(row) = self.indicators.as_mut() else {
            return;
        };
        if let Some(previous) = row.sync(self.index, self.clones) {
            if let Some(previous) = previous {
                surface.set_indicator_active(previous, false);
            }
            if let Some(active) = row.active() {
                surface.set_indicator_active(active, true);
            }
        }
    }

    /// Move to padded index `target`.
    ///
    /// Dropped while a transition is in flight. With looping enabled the
    /// controller stays busy until [`settle`](Self::settle) is called with the
    /// returned id.
    pub fn slide_to<S: TrackSurface + ?Sized>(
        &mut self,
        target: usize,
        animate: bool,
        surface: &mut S,
    ) -> SlideOutcome {
        if self.in_flight.is_some() {
            return SlideOutcome::Rejected;
        }

        let id = self.allocate_id();
        if animate {
            surface.set_transition(Transition::Ease {
                id,
                duration: self.duration,
            });
        } else {
            surface.set_transition(Transition::None);
        }

        self.index = self.clamp(target);
        self.apply_offset(self.pitch.offset_for(self.index), surface);
        self.sync_indicators(surface);

        if !self.is_looping() {
            return SlideOutcome::Applied;
        }
        self.in_flight = Some(id);
        SlideOutcome::Pending(id)
    }

    /// Step forward one item.
    pub fn advance<S: TrackSurface + ?Sized>(&mut self, surface: &mut S) -> SlideOutcome {
        if self.in_flight.is_some() {
            return SlideOutcome::Rejected;
        }
        self.slide_to(self.index + 1, true, surface)
    }

    /// Step back one item.
    pub fn retreat<S: TrackSurface + ?Sized>(&mut self, surface: &mut S) -> SlideOutcome {
        if self.in_flight.is_some() {
            return SlideOutcome::Rejected;
        }
        self.slide_to(self.index.saturating_sub(1), true, surface)
    }

    /// Move so real item `real` is at the origin.
    pub fn slide_to_real<S: TrackSurface + ?Sized>(
        &mut self,
        real: usize,
        surface: &mut S,
    ) -> SlideOutcome {
        self.slide_to(real + self.clones, true, surface)
    }

    /// Finish transition `id`, normalizing out of the clone padding.
    ///
    /// Returns `None` when `id` is not the transition in flight (already
    /// settled, or stale).
    pub fn settle<S: TrackSurface + ?Sized>(
        &mut self,
        id: TransitionId,
        surface: &mut S,
    ) -> Option<Settled> {
        if self.in_flight != Some(id) {
            return None;
        }

        let before = self.index;
        if self.index < self.clones {
            self.index += self.real_len;
        } else if self.index >= self.real_len + self.clones {
            self.index -= self.real_len;
        }

        let wrapped_from = (self.index != before).then_some(before);
        if wrapped_from.is_some() {
            surface.set_transition(Transition::None);
            self.apply_offset(self.pitch.offset_for(self.index), surface);
        }
        self.in_flight = None;

        Some(Settled {
            index: self.index,
            wrapped_from,
        })
    }

    /// Show a live drag offset immediately.
    pub fn track_live<S: TrackSurface + ?Sized>(&mut self, px: f32, surface: &mut S) {
        self.apply_offset(px, surface);
    }

    /// Adopt a new pitch and re-project the current index without a
    /// transition. Does not touch the busy flag.
    pub fn reposition<S: TrackSurface + ?Sized>(&mut self, pitch: Pitch, surface: &mut S) {
        self.pitch = pitch;
        surface.set_transition(Transition::None);
        self.apply_offset(pitch.offset_for(self.index), surface);
    }
}
