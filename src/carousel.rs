//! The card carousel widget.
//!
//! [`CardCarousel`] wires the clone buffer, geometry, gesture tracker,
//! position controller and indicators to a host [`TrackSurface`]. Hosts feed
//! it input with [`handle`](CardCarousel::handle) and the clock with
//! [`tick`](CardCarousel::tick); both take the host's current time so timers
//! that came due fire before the event is processed.
//!
//! Nothing here returns an error. A container without a track mounts as an
//! inert widget, short content disables looping, and input that arrives while
//! a transition is in flight is dropped.
//!
//! # Examples
//!
//! ```
//! use card_carousel::{CardCarousel, CarouselOptions, Container, HeadlessSurface, ItemMetrics, Track};
//! use std::time::Duration;
//!
//! let track = Track::new((0..10).collect::<Vec<u32>>(), ItemMetrics::new(100.0));
//! let mut carousel = CardCarousel::mount(
//!     Container::with_all(track, 600.0),
//!     CarouselOptions::new(6),
//!     HeadlessSurface::new(),
//!     Duration::ZERO,
//! );
//! assert_eq!(carousel.index(), Some(6));
//!
//! carousel.retreat(Duration::ZERO);
//! carousel.tick(Duration::from_millis(300));
//! assert_eq!(carousel.index(), Some(15));
//! assert_eq!(carousel.real_index(), Some(9));
//! ```

use crate::config::{CarouselOptions, CompletionMode};
use crate::controller::{PositionController, SlideOutcome};
use crate::event::{LogLevel, emit_event, emit_log};
use crate::geometry::{Geometry, Pitch};
use crate::gesture::{Commit, GesturePhase, GestureTracker, Motion};
use crate::input::{Control, InputEvent, PointerEvent, PointerKind, PointerPhase, Response};
use crate::mount::{Container, Layout};
use crate::reset::{ResetBus, ResetSubscription, SubscriberId};
use crate::surface::{TrackClasses, TrackSurface, Transition, TransitionId};
use crate::timer::{TimerId, TimerQueue};
use crate::track::PaddedSequence;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Task {
    Settle(TransitionId),
    CloseGrace(u64),
    AutoSlide,
}

struct Live<T> {
    options: CarouselOptions,
    sequence: PaddedSequence<T>,
    geometry: Geometry,
    layout: Layout,
    controller: PositionController,
    gesture: GestureTracker,
    timers: TimerQueue<Task>,
    settle_timer: Option<TimerId>,
    auto_slide: Option<TimerId>,
    reset: Option<ResetSubscription>,
    classes: TrackClasses,
    now: Duration,
}

/// An infinitely looping, draggable card strip.
pub struct CardCarousel<T, S: TrackSurface> {
    live: Option<Live<T>>,
    surface: S,
}

impl<T: Clone, S: TrackSurface> CardCarousel<T, S> {
    /// Mount on `container` and position the first frame at real item 0.
    #[must_use]
    pub fn mount(
        container: Container<T>,
        options: CarouselOptions,
        surface: S,
        now: Duration,
    ) -> Self {
        Self::mount_inner(container, options, surface, None, now)
    }

    /// Mount and subscribe to a page's gesture-reset bus.
    #[must_use]
    pub fn mount_on(
        container: Container<T>,
        options: CarouselOptions,
        surface: S,
        bus: &ResetBus,
        now: Duration,
    ) -> Self {
        Self::mount_inner(container, options, surface, Some(bus.subscribe()), now)
    }

    fn mount_inner(
        container: Container<T>,
        options: CarouselOptions,
        mut surface: S,
        reset: Option<ResetSubscription>,
        now: Duration,
    ) -> Self {
        let mut options = match options.validate() {
            Ok(()) => options,
            Err(err) => {
                emit_log(LogLevel::Warn, &format!("carousel options: {err}; using defaults"));
                options.sanitized()
            }
        };

        let (track, layout) = match container.into_track() {
            Ok(parts) => parts,
            Err(err) => {
                emit_log(LogLevel::Warn, &format!("carousel inert: {err}"));
                return Self {
                    live: None,
                    surface,
                };
            }
        };

        let (items, metrics) = track.into_parts();
        let geometry = Geometry::new(metrics, layout.viewport_width).unwrap_or_else(|err| {
            emit_log(LogLevel::Warn, &format!("carousel geometry: {err}; pitch is zero"));
            Geometry::default()
        });

        let sequence = PaddedSequence::build(items, options.cards_to_show, options.loop_enabled);
        options.loop_enabled = sequence.is_looping();

        let mut controller = PositionController::new(
            &sequence,
            options.cards_to_show,
            geometry.pitch(),
            options.transition_duration,
        )
        .with_indicators(layout.has_dots);
        controller.initialize(&mut surface);

        let classes = if sequence.is_looping() {
            TrackClasses::LOOPING
        } else {
            TrackClasses::empty()
        };
        surface.set_classes(classes);

        emit_event(
            "carousel.mount",
            &format!(
                "items={} clones={} index={} pitch={}",
                sequence.real_len(),
                sequence.clone_count(),
                controller.index(),
                geometry.pitch().px()
            ),
        );

        let mut live = Live {
            options,
            sequence,
            geometry,
            layout,
            controller,
            gesture: GestureTracker::new(options.dead_zone),
            timers: TimerQueue::new(),
            settle_timer: None,
            auto_slide: None,
            reset,
            classes,
            now,
        };
        if options.auto_slide {
            live.start_auto_slide();
        }

        Self {
            live: Some(live),
            surface,
        }
    }
}

impl<T, S: TrackSurface> CardCarousel<T, S> {
    /// Whether the carousel mounted without a track (or was torn down) and
    /// ignores everything.
    #[must_use]
    pub fn is_inert(&self) -> bool {
        self.live.is_none()
    }

    /// Current padded index.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.live.as_ref().map(|live| live.controller.index())
    }

    /// Real item at the viewport origin.
    #[must_use]
    pub fn real_index(&self) -> Option<usize> {
        self.live.as_ref().and_then(|live| live.controller.real_index())
    }

    /// Active indicator, if indicators are shown.
    #[must_use]
    pub fn active_indicator(&self) -> Option<usize> {
        self.live
            .as_ref()
            .and_then(|live| live.controller.indicators())
            .and_then(crate::indicator::IndicatorRow::active)
    }

    /// Current track offset in px.
    #[must_use]
    pub fn offset(&self) -> Option<f32> {
        self.live.as_ref().map(|live| live.controller.offset())
    }

    #[must_use]
    pub fn pitch(&self) -> Option<Pitch> {
        self.live.as_ref().map(|live| live.geometry.pitch())
    }

    /// Whether a committed transition has not settled yet.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.live
            .as_ref()
            .is_some_and(|live| live.controller.is_animating())
    }

    /// Whether the track loops.
    #[must_use]
    pub fn is_looping(&self) -> bool {
        self.live
            .as_ref()
            .is_some_and(|live| live.controller.is_looping())
    }

    /// Effective options (loop forced off for short content).
    #[must_use]
    pub fn options(&self) -> Option<&CarouselOptions> {
        self.live.as_ref().map(|live| &live.options)
    }

    /// Gesture phase.
    #[must_use]
    pub fn gesture_phase(&self) -> GesturePhase {
        self.live
            .as_ref()
            .map_or(GesturePhase::Idle, |live| live.gesture.phase())
    }

    /// The padded sequence.
    #[must_use]
    pub fn sequence(&self) -> Option<&PaddedSequence<T>> {
        self.live.as_ref().map(|live| &live.sequence)
    }

    /// Mutable access to the padded sequence's slots.
    pub fn sequence_mut(&mut self) -> Option<&mut PaddedSequence<T>> {
        self.live.as_mut().map(|live| &mut live.sequence)
    }

    /// Viewport width in px.
    #[must_use]
    pub fn viewport_width(&self) -> Option<f32> {
        self.live.as_ref().map(|live| live.geometry.viewport_width())
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// This carousel's identity on its reset bus.
    #[must_use]
    pub fn subscriber(&self) -> Option<SubscriberId> {
        self.live
            .as_ref()
            .and_then(|live| live.reset.as_ref())
            .map(ResetSubscription::id)
    }

    /// Time of the next pending timer, for hosts that sleep between ticks.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.live.as_ref().and_then(|live| live.timers.next_due())
    }

    /// Whether auto-slide is running.
    #[must_use]
    pub fn is_auto_sliding(&self) -> bool {
        self.live
            .as_ref()
            .is_some_and(|live| live.auto_slide.is_some())
    }

    /// Advance the clock and run every timer due by `now`.
    pub fn tick(&mut self, now: Duration) {
        if let Some(live) = self.live.as_mut() {
            live.tick(now, &mut self.surface);
        }
    }

    /// Handle one input event at time `now`.
    pub fn handle(&mut self, event: &InputEvent, now: Duration) -> Response {
        let Some(live) = self.live.as_mut() else {
            return Response::empty();
        };
        live.tick(now, &mut self.surface);
        match event {
            InputEvent::Pointer(pointer) => live.handle_pointer(pointer, &mut self.surface),
            InputEvent::Activate(control) => live.activate(*control, &mut self.surface),
            InputEvent::Key { key, focus } => {
                if key.activates() {
                    live.activate(*focus, &mut self.surface) | Response::PREVENT_DEFAULT
                } else {
                    Response::empty()
                }
            }
            InputEvent::Resize(resize) => {
                live.resize(resize.viewport_width, resize.metrics, &mut self.surface)
            }
        }
    }

    /// Move to padded index `target` at time `now`. Dropped while animating.
    pub fn slide_to(&mut self, target: usize, animate: bool, now: Duration) -> bool {
        self.with_live(now, |live, surface| {
            live.interrupt_gesture(surface);
            let outcome = live.controller.slide_to(target, animate, surface);
            live.committed(outcome, animate)
        })
    }

    /// Step forward one item. Dropped while animating.
    pub fn advance(&mut self, now: Duration) -> bool {
        self.with_live(now, |live, surface| live.step(Commit::Advance, surface))
    }

    /// Step back one item. Dropped while animating.
    pub fn retreat(&mut self, now: Duration) -> bool {
        self.with_live(now, |live, surface| live.step(Commit::Retreat, surface))
    }

    /// Jump to real item `real` (dot click). Dropped while animating.
    pub fn slide_to_real(&mut self, real: usize, now: Duration) -> bool {
        self.with_live(now, |live, surface| live.slide_to_real(real, surface))
    }

    /// The host observed transition `id` finish.
    ///
    /// Settles immediately if `id` is the transition in flight; stale or
    /// repeated notifications are ignored.
    pub fn transition_finished(&mut self, id: TransitionId, now: Duration) -> bool {
        self.with_live(now, |live, surface| live.settle(id, surface))
    }

    /// Forcibly drop any gesture in progress.
    pub fn reset_gesture(&mut self, now: Duration) -> bool {
        self.with_live(now, |live, surface| live.force_reset(surface))
    }

    /// Start periodic auto-advance (restarting the period if running).
    pub fn start_auto_slide(&mut self, now: Duration) {
        if let Some(live) = self.live.as_mut() {
            live.tick(now, &mut self.surface);
            live.start_auto_slide();
        }
    }

    /// Stop periodic auto-advance.
    pub fn stop_auto_slide(&mut self) {
        if let Some(live) = self.live.as_mut() {
            live.stop_auto_slide();
        }
    }

    /// Stop every timer, leave the reset bus and turn inert.
    pub fn teardown(&mut self) {
        if let Some(mut live) = self.live.take() {
            live.stop_auto_slide();
            live.timers.clear();
            emit_event(
                "carousel.teardown",
                &format!("index={}", live.controller.index()),
            );
        }
    }

    /// Catch up with the host clock, then run `f`.
    fn with_live(&mut self, now: Duration, f: impl FnOnce(&mut Live<T>, &mut S) -> bool) -> bool {
        match self.live.as_mut() {
            Some(live) => {
                live.tick(now, &mut self.surface);
                f(live, &mut self.surface)
            }
            None => false,
        }
    }
}

impl<T, S: TrackSurface + std::fmt::Debug> std::fmt::Debug for CardCarousel<T, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardCarousel")
            .field("inert", &self.is_inert())
            .field("index", &self.index())
            .field("animating", &self.is_animating())
            .field("surface", &self.surface)
            .finish()
    }
}

impl<T> Live<T> {
    fn tick<S: TrackSurface>(&mut self, now: Duration, surface: &mut S) {
        self.now = self.now.max(now);
        self.poll_reset(surface);
        while let Some((id, task)) = self.timers.poll(self.now) {
            match task {
                Task::Settle(transition) => {
                    if self.settle_timer == Some(id) {
                        self.settle_timer = None;
                    }
                    self.settle(transition, surface);
                }
                Task::CloseGrace(token) => {
                    self.gesture.close_grace(token);
                }
                Task::AutoSlide => {
                    if self.controller.is_animating() || self.gesture.is_active() {
                        continue;
                    }
                    self.step(Commit::Advance, surface);
                }
            }
        }
    }

    fn poll_reset<S: TrackSurface>(&mut self, surface: &mut S) {
        let signalled = self.reset.as_mut().is_some_and(ResetSubscription::take);
        if signalled {
            self.force_reset(surface);
        }
    }

    fn set_dragging<S: TrackSurface>(&mut self, dragging: bool, surface: &mut S) {
        if self.classes.contains(TrackClasses::DRAGGING) == dragging {
            return;
        }
        self.classes.set(TrackClasses::DRAGGING, dragging);
        surface.set_classes(self.classes);
    }

    /// Drop the gesture; a drag in progress snaps back onto the grid.
    fn force_reset<S: TrackSurface>(&mut self, surface: &mut S) -> bool {
        let was_dragging = self.gesture.is_dragging();
        if !self.gesture.reset() {
            return false;
        }
        self.set_dragging(false, surface);
        emit_event("carousel.reset", &format!("dragging={was_dragging}"));
        if was_dragging {
            let index = self.controller.index();
            let outcome = self.controller.slide_to(index, true, surface);
            self.committed(outcome, true);
        }
        true
    }

    /// Drop the gesture without restoring the offset; a slide follows.
    fn interrupt_gesture<S: TrackSurface>(&mut self, surface: &mut S) {
        if self.controller.is_animating() || !self.gesture.is_active() {
            return;
        }
        self.gesture.reset();
        self.set_dragging(false, surface);
    }

    fn committed(&mut self, outcome: SlideOutcome, animate: bool) -> bool {
        match outcome {
            SlideOutcome::Rejected => {
                emit_log(LogLevel::Debug, "carousel slide dropped: transition in flight");
                return false;
            }
            SlideOutcome::Applied => {}
            SlideOutcome::Pending(id) => {
                let delay = if animate && self.options.completion == CompletionMode::Notify {
                    self.options.settle_delay()
                } else {
                    self.options.transition_duration
                };
                self.settle_timer = Some(self.timers.schedule_once(
                    self.now,
                    delay,
                    Task::Settle(id),
                ));
            }
        }
        emit_event(
            "carousel.slide",
            &format!(
                "index={} real={} animate={animate}",
                self.controller.index(),
                self.controller
                    .real_index()
                    .map_or_else(|| "-".to_string(), |r| r.to_string())
            ),
        );
        true
    }

    fn step<S: TrackSurface>(&mut self, commit: Commit, surface: &mut S) -> bool {
        if self.controller.is_animating() {
            emit_log(LogLevel::Debug, "carousel step dropped: transition in flight");
            return false;
        }
        self.interrupt_gesture(surface);
        let outcome = match commit {
            Commit::Advance => self.controller.advance(surface),
            Commit::Retreat => self.controller.retreat(surface),
            Commit::SnapBack => {
                let index = self.controller.index();
                self.controller.slide_to(index, true, surface)
            }
        };
        self.committed(outcome, true)
    }

    fn slide_to_real<S: TrackSurface>(&mut self, real: usize, surface: &mut S) -> bool {
        let target = match self.sequence.checked_padded_index(real) {
            Ok(target) => target,
            Err(err) => {
                emit_log(LogLevel::Debug, &format!("carousel slide dropped: {err}"));
                return false;
            }
        };
        self.interrupt_gesture(surface);
        let outcome = self.controller.slide_to(target, true, surface);
        self.committed(outcome, true)
    }

    fn settle<S: TrackSurface>(&mut self, id: TransitionId, surface: &mut S) -> bool {
        let Some(settled) = self.controller.settle(id, surface) else {
            return false;
        };
        if let Some(timer) = self.settle_timer.take() {
            self.timers.cancel(timer);
        }
        if let Some(from) = settled.wrapped_from {
            emit_event(
                "carousel.wrap",
                &format!("from={from} to={}", settled.index),
            );
        }
        emit_event("carousel.settle", &format!("index={}", settled.index));
        true
    }

    fn handle_pointer<S: TrackSurface>(&mut self, event: &PointerEvent, surface: &mut S) -> Response {
        match event.phase {
            PointerPhase::Down => self.pointer_down(event, surface),
            PointerPhase::Move => self.pointer_move(event, surface),
            PointerPhase::Up => self.pointer_up(surface),
            PointerPhase::Cancel => {
                if self.force_reset(surface) {
                    Response::HANDLED
                } else {
                    Response::empty()
                }
            }
        }
    }

    fn pointer_down<S: TrackSurface>(&mut self, event: &PointerEvent, surface: &mut S) -> Response {
        if event.on_interactive || self.controller.is_animating() {
            return Response::empty();
        }
        if let Some(reset) = &self.reset {
            reset.announce();
        }
        if self.gesture.is_dragging() {
            self.set_dragging(false, surface);
        }
        self.gesture
            .begin(event.kind, event.x, event.y, self.controller.offset());

        // Mouse presses would otherwise start text selection or image drags.
        match event.kind {
            PointerKind::Mouse => Response::HANDLED | Response::PREVENT_DEFAULT,
            PointerKind::Touch => Response::HANDLED,
        }
    }

    fn pointer_move<S: TrackSurface>(&mut self, event: &PointerEvent, surface: &mut S) -> Response {
        if self.controller.is_animating() {
            return Response::empty();
        }
        match self.gesture.motion(event.x, event.y) {
            Motion::Ignored | Motion::Released | Motion::Undecided => Response::empty(),
            Motion::Locked { offset } => {
                self.set_dragging(true, surface);
                surface.set_transition(Transition::None);
                self.controller.track_live(offset, surface);
                Response::HANDLED | Response::PREVENT_DEFAULT
            }
            Motion::Tracking { offset } => {
                self.controller.track_live(offset, surface);
                Response::HANDLED | Response::PREVENT_DEFAULT
            }
        }
    }

    fn pointer_up<S: TrackSurface>(&mut self, surface: &mut S) -> Response {
        if !self.gesture.is_active() {
            return Response::empty();
        }
        let commit = self.gesture.end(self.geometry.pitch());
        self.timers.schedule_once(
            self.now,
            self.options.gesture_grace,
            Task::CloseGrace(self.gesture.grace_token()),
        );
        let Some(commit) = commit else {
            return Response::empty();
        };
        self.set_dragging(false, surface);
        self.step(commit, surface);
        Response::HANDLED
    }

    fn activate<S: TrackSurface>(&mut self, control: Control, surface: &mut S) -> Response {
        if !self.layout.has_control(control) {
            return Response::empty();
        }
        let acted = match control {
            Control::Prev => self.step(Commit::Retreat, surface),
            Control::Next => self.step(Commit::Advance, surface),
            Control::Dot(real) => {
                self.controller.indicators().is_some() && self.slide_to_real(real, surface)
            }
        };
        if acted {
            Response::HANDLED
        } else {
            Response::empty()
        }
    }

    fn resize<S: TrackSurface>(
        &mut self,
        viewport_width: f32,
        metrics: crate::geometry::ItemMetrics,
        surface: &mut S,
    ) -> Response {
        match self.geometry.remeasure(metrics, viewport_width) {
            Ok(pitch) => {
                if self.gesture.reset() {
                    self.set_dragging(false, surface);
                }
                self.controller.reposition(pitch, surface);
                Response::HANDLED
            }
            Err(err) => {
                emit_log(LogLevel::Warn, &format!("carousel resize ignored: {err}"));
                Response::empty()
            }
        }
    }

    fn start_auto_slide(&mut self) {
        self.stop_auto_slide();
        self.auto_slide = Some(self.timers.schedule_interval(
            self.now,
            self.options.slide_interval,
            Task::AutoSlide,
        ));
    }

    fn stop_auto_slide(&mut self) {
        if let Some(id) = self.auto_slide.take() {
            self.timers.cancel(id);
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::geometry::ItemMetrics;
    use crate::input::{NavKey, ResizeEvent};
    use crate::surface::HeadlessSurface;
    use crate::track::Track;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn carousel(n: u32, show: usize) -> CardCarousel<u32, HeadlessSurface> {
        let track = Track::new((0..n).collect(), ItemMetrics::new(100.0));
        CardCarousel::mount(
            Container::with_all(track, 100.0 * show as f32),
            CarouselOptions::new(show),
            HeadlessSurface::new(),
            Duration::ZERO,
        )
    }

    fn drag(c: &mut CardCarousel<u32, HeadlessSurface>, dx: f32, at: Duration) {
        c.handle(&PointerEvent::touch_start(500.0, 50.0).into(), at);
        c.handle(&PointerEvent::touch_move(500.0 + dx, 50.0).into(), at);
        c.handle(&PointerEvent::touch_end(500.0 + dx, 50.0).into(), at);
    }

    // ============================================
    // Mount
    // ============================================

    #[test]
    fn test_mount_positions_at_real_start() {
        let c = carousel(10, 6);
        assert_eq!(c.index(), Some(6));
        assert_eq!(c.real_index(), Some(0));
        assert_eq!(c.surface().offset(), -600.0);
        assert_eq!(c.surface().transition(), Transition::None);
        assert!(!c.is_animating());
        assert!(c.is_looping());
        assert!(c.surface().classes().contains(TrackClasses::LOOPING));
    }

    #[test]
    fn test_mount_without_track_is_inert() {
        let mut c: CardCarousel<u32, HeadlessSurface> = CardCarousel::mount(
            Container::new().with_arrows(),
            CarouselOptions::default(),
            HeadlessSurface::new(),
            Duration::ZERO,
        );
        assert!(c.is_inert());
        assert!(!c.advance(ms(0)));
        assert_eq!(
            c.handle(&PointerEvent::touch_start(0.0, 0.0).into(), ms(1)),
            Response::empty()
        );
        assert!(c.surface().ops().is_empty());
    }

    #[test]
    fn test_short_content_static() {
        let mut c = carousel(3, 6);
        assert!(!c.is_looping());
        assert_eq!(c.index(), Some(0));
        assert!(c.surface().indicators().is_empty());
        assert!(c.advance(ms(0)));
        assert_eq!(c.index(), Some(0));
        assert!(!c.is_animating());
    }

    #[test]
    fn test_invalid_options_fall_back() {
        let track = Track::new((0..4).collect::<Vec<u32>>(), ItemMetrics::new(50.0));
        let c = CardCarousel::mount(
            Container::new().with_track(track),
            CarouselOptions::new(0),
            HeadlessSurface::new(),
            Duration::ZERO,
        );
        assert_eq!(c.options().map(|o| o.cards_to_show), Some(1));
        assert_eq!(c.index(), Some(1));
    }

    #[test]
    fn test_no_dots_container_omits_indicators() {
        let track = Track::new((0..10).collect::<Vec<u32>>(), ItemMetrics::new(50.0));
        let mut c = CardCarousel::mount(
            Container::new().with_track(track).with_arrows(),
            CarouselOptions::new(3),
            HeadlessSurface::new(),
            Duration::ZERO,
        );
        assert!(c.surface().indicators().is_empty());
        assert_eq!(c.active_indicator(), None);
        assert_eq!(
            c.handle(&InputEvent::Activate(Control::Dot(2)), ms(0)),
            Response::empty()
        );
    }

    // ============================================
    // Slides and settling
    // ============================================

    #[test]
    fn test_advance_twice_within_window_moves_once() {
        let mut c = carousel(10, 6);
        assert!(c.advance(ms(0)));
        assert!(!c.advance(ms(150)));
        assert_eq!(c.index(), Some(7));
        c.tick(ms(300));
        assert!(!c.is_animating());
        assert!(c.advance(ms(300)));
        assert_eq!(c.index(), Some(8));
    }

    #[test]
    fn test_slide_after_idle_gap_uses_call_time() {
        let mut c = carousel(10, 6);
        // No ticks while idle: the carousel last saw the clock at mount.
        assert_eq!(c.next_deadline(), None);

        assert!(c.retreat(ms(10_000)));
        assert_eq!(c.next_deadline(), Some(ms(10_300)));

        c.tick(ms(10_016));
        assert!(c.is_animating());
        assert_eq!(c.index(), Some(5));
        assert!(c.surface().transition().is_enabled());
        assert!(!c.retreat(ms(10_050)));
        assert_eq!(c.index(), Some(5));

        c.tick(ms(10_300));
        assert_eq!(c.index(), Some(15));
        assert!(c.retreat(ms(10_300)));
        assert_eq!(c.index(), Some(14));
    }

    #[test]
    fn test_auto_slide_started_late_counts_from_start() {
        let mut c = carousel(10, 6);
        c.start_auto_slide(ms(8_000));
        assert_eq!(c.next_deadline(), Some(ms(13_000)));
    }

    #[test]
    fn test_retreat_from_real_start_wraps() {
        let mut c = carousel(10, 6);
        c.retreat(ms(0));
        assert_eq!(c.index(), Some(5));
        c.tick(ms(299));
        assert_eq!(c.index(), Some(5));
        c.tick(ms(300));
        assert_eq!(c.index(), Some(15));
        assert_eq!(c.real_index(), Some(9));
        assert_eq!(c.active_indicator(), Some(9));
        assert_eq!(c.surface().offset(), -1500.0);
    }

    #[test]
    fn test_notify_mode_settles_on_notification() {
        let track = Track::new((0..10).collect::<Vec<u32>>(), ItemMetrics::new(100.0));
        let mut c = CardCarousel::mount(
            Container::with_all(track, 600.0),
            CarouselOptions::new(6).with_completion(CompletionMode::Notify),
            HeadlessSurface::new(),
            Duration::ZERO,
        );
        c.retreat(ms(0));
        let Transition::Ease { id, duration } = c.surface().transition() else {
            panic!("expected an eased transition");
        };
        assert_eq!(duration, ms(300));

        c.tick(ms(300));
        assert!(c.is_animating());
        assert!(c.transition_finished(id, ms(300)));
        assert_eq!(c.index(), Some(15));
        assert!(!c.transition_finished(id, ms(310)));
        // Fallback timer was cancelled.
        assert_eq!(c.next_deadline(), None);
    }

    #[test]
    fn test_notify_mode_fallback_timer() {
        let track = Track::new((0..10).collect::<Vec<u32>>(), ItemMetrics::new(100.0));
        let mut c = CardCarousel::mount(
            Container::with_all(track, 600.0),
            CarouselOptions::new(6).with_completion(CompletionMode::Notify),
            HeadlessSurface::new(),
            Duration::ZERO,
        );
        c.retreat(ms(0));
        c.tick(ms(400));
        assert!(!c.is_animating());
        assert_eq!(c.index(), Some(15));
    }

    #[test]
    fn test_dot_activation() {
        let mut c = carousel(10, 6);
        let response = c.handle(&InputEvent::Activate(Control::Dot(3)), ms(0));
        assert_eq!(response, Response::HANDLED);
        assert_eq!(c.index(), Some(9));
        assert_eq!(c.active_indicator(), Some(3));
        assert_eq!(c.surface().active_indicator(), Some(3));
    }

    #[test]
    fn test_dot_past_end_is_dropped() {
        let mut c = carousel(10, 6);
        let response = c.handle(&InputEvent::Activate(Control::Dot(10)), ms(0));
        assert_eq!(response, Response::empty());
        assert!(!c.slide_to_real(42, ms(0)));
        assert_eq!(c.index(), Some(6));
        assert!(!c.is_animating());
    }

    #[test]
    fn test_key_activation() {
        let mut c = carousel(10, 6);
        let response = c.handle(
            &InputEvent::Key {
                key: NavKey::Enter,
                focus: Control::Next,
            },
            ms(0),
        );
        assert!(response.contains(Response::PREVENT_DEFAULT));
        assert_eq!(c.index(), Some(7));

        let response = c.handle(
            &InputEvent::Key {
                key: NavKey::Other,
                focus: Control::Prev,
            },
            ms(400),
        );
        assert_eq!(response, Response::empty());
        assert_eq!(c.index(), Some(7));
    }

    // ============================================
    // Gestures
    // ============================================

    #[test]
    fn test_drag_advance() {
        let mut c = carousel(10, 6);
        drag(&mut c, -40.0, ms(0));
        assert_eq!(c.index(), Some(7));
        assert!(c.is_animating());
        assert!(!c.surface().classes().contains(TrackClasses::DRAGGING));
        assert!(c.surface().transition().is_enabled());
    }

    #[test]
    fn test_drag_below_threshold_snaps_back() {
        let mut c = carousel(10, 6);
        drag(&mut c, -20.0, ms(0));
        assert_eq!(c.index(), Some(6));
        assert_eq!(c.surface().offset(), -600.0);
        assert!(c.is_animating());
        assert!(c.surface().transition().is_enabled());
    }

    #[test]
    fn test_drag_live_offset() {
        let mut c = carousel(10, 6);
        c.handle(&PointerEvent::touch_start(500.0, 50.0).into(), ms(0));
        let response = c.handle(&PointerEvent::touch_move(470.0, 52.0).into(), ms(10));
        assert!(response.contains(Response::PREVENT_DEFAULT));
        assert_eq!(c.surface().offset(), -630.0);
        assert_eq!(c.surface().transition(), Transition::None);
        assert!(c.surface().classes().contains(TrackClasses::DRAGGING));
        assert_eq!(c.gesture_phase(), GesturePhase::Dragging);
    }

    #[test]
    fn test_vertical_gesture_lets_page_scroll() {
        let mut c = carousel(10, 6);
        c.handle(&PointerEvent::touch_start(500.0, 50.0).into(), ms(0));
        let response = c.handle(&PointerEvent::touch_move(503.0, 90.0).into(), ms(10));
        assert_eq!(response, Response::empty());
        assert_eq!(c.gesture_phase(), GesturePhase::Idle);
        c.handle(&PointerEvent::touch_end(503.0, 90.0).into(), ms(20));
        assert_eq!(c.index(), Some(6));
        assert!(!c.is_animating());
    }

    #[test]
    fn test_gesture_on_interactive_child_ignored() {
        let mut c = carousel(10, 6);
        let response = c.handle(
            &PointerEvent::mouse_down(500.0, 50.0).on_interactive().into(),
            ms(0),
        );
        assert_eq!(response, Response::empty());
        assert_eq!(c.gesture_phase(), GesturePhase::Idle);
    }

    #[test]
    fn test_gesture_while_animating_ignored() {
        let mut c = carousel(10, 6);
        c.advance(ms(0));
        c.handle(&PointerEvent::touch_start(500.0, 50.0).into(), ms(100));
        assert_eq!(c.gesture_phase(), GesturePhase::Idle);
    }

    #[test]
    fn test_redrag_after_grace_window() {
        let mut c = carousel(10, 6);
        drag(&mut c, -40.0, ms(0));
        c.tick(ms(300));
        assert_eq!(c.index(), Some(7));

        // Grace window closed at 100 ms; a new drag locks normally.
        drag(&mut c, -40.0, ms(350));
        assert_eq!(c.index(), Some(8));
    }

    #[test]
    fn test_grace_window_suppresses_lock() {
        let track = Track::new((0..10).collect::<Vec<u32>>(), ItemMetrics::new(100.0));
        let mut c = CardCarousel::mount(
            Container::with_all(track, 600.0),
            CarouselOptions::new(6)
                .with_loop(false)
                .with_gesture_grace(ms(500)),
            HeadlessSurface::new(),
            Duration::ZERO,
        );
        // Looping off: commits never mark the carousel busy.
        drag(&mut c, -40.0, ms(0));
        assert_eq!(c.index(), Some(1));

        c.handle(&PointerEvent::touch_start(500.0, 50.0).into(), ms(50));
        c.handle(&PointerEvent::touch_move(440.0, 50.0).into(), ms(60));
        assert_eq!(c.gesture_phase(), GesturePhase::Pending);

        c.handle(&PointerEvent::touch_move(430.0, 50.0).into(), ms(600));
        assert_eq!(c.gesture_phase(), GesturePhase::Dragging);
    }

    #[test]
    fn test_cancel_snaps_back() {
        let mut c = carousel(10, 6);
        c.handle(&PointerEvent::touch_start(500.0, 50.0).into(), ms(0));
        c.handle(&PointerEvent::touch_move(420.0, 50.0).into(), ms(10));
        c.handle(&PointerEvent::touch_cancel(420.0, 50.0).into(), ms(20));
        assert_eq!(c.gesture_phase(), GesturePhase::Idle);
        assert_eq!(c.index(), Some(6));
        assert_eq!(c.surface().offset(), -600.0);
        assert!(!c.surface().classes().contains(TrackClasses::DRAGGING));
    }

    // ============================================
    // Resize
    // ============================================

    #[test]
    fn test_resize_repositions_with_new_pitch() {
        let mut c = carousel(10, 6);
        c.advance(ms(0));
        let response = c.handle(
            &ResizeEvent::new(480.0, ItemMetrics::new(70.0).with_gap(10.0)).into(),
            ms(50),
        );
        assert_eq!(response, Response::HANDLED);
        assert_eq!(c.surface().offset(), -560.0);
        assert_eq!(c.surface().transition(), Transition::None);
        assert_eq!(c.viewport_width(), Some(480.0));
        // Resize does not release the busy flag.
        assert!(c.is_animating());
    }

    #[test]
    fn test_resize_with_bad_metrics_keeps_pitch() {
        let mut c = carousel(10, 6);
        let response = c.handle(
            &ResizeEvent::new(480.0, ItemMetrics::new(f32::NAN)).into(),
            ms(0),
        );
        assert_eq!(response, Response::empty());
        assert_eq!(c.pitch().map(Pitch::px), Some(100.0));
    }

    // ============================================
    // Auto-slide and teardown
    // ============================================

    #[test]
    fn test_auto_slide() {
        let track = Track::new((0..10).collect::<Vec<u32>>(), ItemMetrics::new(100.0));
        let mut c = CardCarousel::mount(
            Container::with_all(track, 600.0),
            CarouselOptions::new(6).with_auto_slide(ms(1000)),
            HeadlessSurface::new(),
            Duration::ZERO,
        );
        assert!(c.is_auto_sliding());
        c.tick(ms(1000));
        assert_eq!(c.index(), Some(7));
        c.tick(ms(2000));
        assert_eq!(c.index(), Some(8));

        c.stop_auto_slide();
        c.tick(ms(5000));
        assert_eq!(c.index(), Some(8));
    }

    #[test]
    fn test_auto_slide_skips_during_gesture() {
        let track = Track::new((0..10).collect::<Vec<u32>>(), ItemMetrics::new(100.0));
        let mut c = CardCarousel::mount(
            Container::with_all(track, 600.0),
            CarouselOptions::new(6).with_auto_slide(ms(1000)),
            HeadlessSurface::new(),
            Duration::ZERO,
        );
        c.handle(&PointerEvent::touch_start(500.0, 50.0).into(), ms(900));
        c.tick(ms(1000));
        assert_eq!(c.index(), Some(6));
    }

    #[test]
    fn test_teardown_stops_everything() {
        let track = Track::new((0..10).collect::<Vec<u32>>(), ItemMetrics::new(100.0));
        let mut c = CardCarousel::mount(
            Container::with_all(track, 600.0),
            CarouselOptions::new(6).with_auto_slide(ms(1000)),
            HeadlessSurface::new(),
            Duration::ZERO,
        );
        c.teardown();
        assert!(c.is_inert());
        assert_eq!(c.next_deadline(), None);
        c.surface_mut().clear_ops();
        c.tick(ms(10_000));
        assert!(c.surface().ops().is_empty());
    }

    // ============================================
    // Reset bus
    // ============================================

    #[test]
    fn test_gesture_on_other_carousel_resets_drag() {
        let bus = ResetBus::new();
        let make = || {
            let track = Track::new((0..10).collect::<Vec<u32>>(), ItemMetrics::new(100.0));
            CardCarousel::mount_on(
                Container::with_all(track, 600.0),
                CarouselOptions::new(6),
                HeadlessSurface::new(),
                &bus,
                Duration::ZERO,
            )
        };
        let mut a = make();
        let mut b = make();

        a.handle(&PointerEvent::touch_start(500.0, 50.0).into(), ms(0));
        a.handle(&PointerEvent::touch_move(450.0, 50.0).into(), ms(10));
        assert_eq!(a.gesture_phase(), GesturePhase::Dragging);

        b.handle(&PointerEvent::touch_start(500.0, 400.0).into(), ms(20));
        a.tick(ms(20));
        assert_eq!(a.gesture_phase(), GesturePhase::Idle);
        assert!(!a.surface().classes().contains(TrackClasses::DRAGGING));
        assert_eq!(a.surface().offset(), -600.0);
        assert_eq!(b.gesture_phase(), GesturePhase::Pending);
    }
}
