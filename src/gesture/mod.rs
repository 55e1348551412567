//! Drag gesture tracking.
//!
//! A gesture moves through `Idle -> Pending -> (Dragging | Idle) -> Idle`.
//! While pending, nothing is decided until the pointer leaves the dead zone;
//! the dominant axis then either locks a horizontal drag or hands the gesture
//! back to the page so it can scroll.
//!
//! The tracker is pure state: it never touches the surface or the index. The
//! carousel feeds it pointer positions and applies what it reports.

mod axis;

pub use axis::{Axis, classify, decide};

use crate::geometry::Pitch;
use crate::input::PointerKind;

/// What a release commits the carousel to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Commit {
    /// Step forward one item (dragged left past the threshold).
    Advance,
    /// Step back one item (dragged right past the threshold).
    Retreat,
    /// Return to the current index.
    SnapBack,
}

/// Observable gesture phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    Pending,
    Dragging,
}

/// Result of feeding a move to the tracker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Motion {
    /// No gesture in progress.
    Ignored,
    /// Still inside the dead zone (or the grace window); nothing decided.
    Undecided,
    /// Horizontal axis just locked; the drag starts at `offset`.
    Locked { offset: f32 },
    /// Drag continues at `offset`.
    Tracking { offset: f32 },
    /// Vertical movement won; the gesture is dropped so the page can scroll.
    Released,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum State {
    Idle,
    Pending {
        kind: PointerKind,
        start: (f32, f32),
        baseline: f32,
    },
    Dragging {
        kind: PointerKind,
        start: (f32, f32),
        baseline: f32,
        live: f32,
    },
}

/// Per-widget gesture state machine.
#[derive(Clone, Debug)]
pub struct GestureTracker {
    dead_zone: f32,
    state: State,
    grace: bool,
    grace_token: u64,
}

impl GestureTracker {
    /// Create a tracker with the given dead zone in px.
    #[must_use]
    pub fn new(dead_zone: f32) -> Self {
        Self {
            dead_zone,
            state: State::Idle,
            grace: false,
            grace_token: 0,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        match self.state {
            State::Idle => GesturePhase::Idle,
            State::Pending { .. } => GesturePhase::Pending,
            State::Dragging { .. } => GesturePhase::Dragging,
        }
    }

    /// Whether a gesture (pending or dragging) is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state != State::Idle
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, State::Dragging { .. })
    }

    /// Pointer kind of the gesture in progress.
    #[must_use]
    pub fn pointer_kind(&self) -> Option<PointerKind> {
        match self.state {
            State::Idle => None,
            State::Pending { kind, .. } | State::Dragging { kind, .. } => Some(kind),
        }
    }

    /// Live track offset while dragging.
    #[must_use]
    pub fn live_offset(&self) -> Option<f32> {
        match self.state {
            State::Dragging { live, .. } => Some(live),
            _ => None,
        }
    }

    /// Whether the post-gesture grace window is open.
    #[must_use]
    pub fn in_grace(&self) -> bool {
        self.grace
    }

    /// Token identifying the grace window opened by the last release.
    #[must_use]
    pub fn grace_token(&self) -> u64 {
        self.grace_token
    }

    /// Start a gesture at `(x, y)` with the track currently at `baseline`.
    ///
    /// A gesture already in progress is discarded.
    pub fn begin(&mut self, kind: PointerKind, x: f32, y: f32, baseline: f32) {
        self.state = State::Pending {
            kind,
            start: (x, y),
            baseline,
        };
    }

    /// Feed a pointer move.
    pub fn motion(&mut self, x: f32, y: f32) -> Motion {
        match self.state {
            State::Idle => Motion::Ignored,
            State::Pending {
                kind,
                start,
                baseline,
            } => {
                if self.grace {
                    return Motion::Undecided;
                }
                let dx = x - start.0;
                match classify(dx, y - start.1, self.dead_zone) {
                    None => Motion::Undecided,
                    Some(Axis::Vertical) => {
                        self.state = State::Idle;
                        Motion::Released
                    }
                    Some(Axis::Horizontal) => {
                        let live = baseline + dx;
                        self.state = State::Dragging {
                            kind,
                            start,
                            baseline,
                            live,
                        };
                        Motion::Locked { offset: live }
                    }
                }
            }
            State::Dragging {
                kind,
                start,
                baseline,
                ..
            } => {
                let live = baseline + (x - start.0);
                self.state = State::Dragging {
                    kind,
                    start,
                    baseline,
                    live,
                };
                Motion::Tracking { offset: live }
            }
        }
    }

    /// End the gesture and open the grace window.
    ///
    /// Returns the commit decision if the gesture was a horizontal drag.
    pub fn end(&mut self, pitch: Pitch) -> Option<Commit> {
        let commit = match self.state {
            State::Dragging { baseline, live, .. } => {
                Some(decide(live - baseline, pitch.swipe_threshold()))
            }
            _ => None,
        };
        self.state = State::Idle;
        self.grace = true;
        self.grace_token = self.grace_token.wrapping_add(1);
        commit
    }

    /// Close the grace window opened by the release identified by `token`.
    ///
    /// Returns false for a stale token.
    pub fn close_grace(&mut self, token: u64) -> bool {
        if token != self.grace_token {
            return false;
        }
        self.grace = false;
        true
    }

    /// Forcibly drop any gesture and grace window.
    ///
    /// Returns true if a gesture was in progress.
    pub fn reset(&mut self) -> bool {
        let was_active = self.is_active();
        self.state = State::Idle;
        self.grace = false;
        was_active
    }
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_DEAD_ZONE)
    }
}
