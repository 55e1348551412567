//! A page hosting several carousels.
//!
//! The page owns the shared reset bus and the hit regions of every track and
//! interactive child, so raw pointer input can be routed the way a document
//! would route it: presses go to whatever is under the pointer, a carousel
//! that accepted a press keeps receiving moves and releases until the gesture
//! ends, and input landing outside a carousel's own track resets that
//! carousel's gesture.

use crate::carousel::CardCarousel;
use crate::config::CarouselOptions;
use crate::input::{InputEvent, PointerEvent, PointerKind, PointerPhase, Response};
use crate::mount::Container;
use crate::reset::ResetBus;
use crate::surface::TrackSurface;
use std::time::Duration;

/// Axis-aligned rectangle in page px.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[must_use]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Half-open containment: the right and bottom edges are outside.
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && y >= self.y && x < self.x + self.width && y < self.y + self.height
    }
}

/// Identifies a carousel on a page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CarouselId(usize);

#[derive(Clone, Copy, Debug, PartialEq)]
enum Region {
    Track(CarouselId),
    Interactive,
}

/// Result of hit testing a point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Hit {
    /// Topmost track under the point.
    pub track: Option<CarouselId>,
    /// The point is over a link or button.
    pub interactive: bool,
}

/// Carousels sharing one document.
pub struct Page<T, S: TrackSurface> {
    bus: ResetBus,
    carousels: Vec<Option<CardCarousel<T, S>>>,
    regions: Vec<(Rect, Region)>,
    capture: Option<CarouselId>,
}

impl<T, S: TrackSurface> Default for Page<T, S> {
    fn default() -> Self {
        Self {
            bus: ResetBus::new(),
            carousels: Vec::new(),
            regions: Vec::new(),
            capture: None,
        }
    }
}

impl<T: Clone, S: TrackSurface> Page<T, S> {
    /// Mount a carousel whose track occupies `track_rect`.
    pub fn mount(
        &mut self,
        container: Container<T>,
        options: CarouselOptions,
        surface: S,
        track_rect: Rect,
        now: Duration,
    ) -> CarouselId {
        let id = CarouselId(self.carousels.len());
        let carousel = CardCarousel::mount_on(container, options, surface, &self.bus, now);
        self.carousels.push(Some(carousel));
        self.regions.push((track_rect, Region::Track(id)));
        id
    }
}

impl<T, S: TrackSurface> Page<T, S> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The page's reset bus.
    #[must_use]
    pub fn bus(&self) -> &ResetBus {
        &self.bus
    }

    /// Number of mounted carousels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.carousels.iter().flatten().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn get(&self, id: CarouselId) -> Option<&CardCarousel<T, S>> {
        self.carousels.get(id.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: CarouselId) -> Option<&mut CardCarousel<T, S>> {
        self.carousels.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Register a link or button area. Later registrations sit on top.
    pub fn register_interactive(&mut self, rect: Rect) {
        self.regions.push((rect, Region::Interactive));
    }

    /// Move a carousel's track after relayout.
    pub fn set_track_rect(&mut self, id: CarouselId, rect: Rect) {
        for (region_rect, region) in &mut self.regions {
            if *region == Region::Track(id) {
                *region_rect = rect;
            }
        }
    }

    /// What lies under `(x, y)`.
    #[must_use]
    pub fn hit_test(&self, x: f32, y: f32) -> Hit {
        let mut hit = Hit::default();
        for (rect, region) in self.regions.iter().rev() {
            if !rect.contains(x, y) {
                continue;
            }
            match region {
                Region::Interactive => hit.interactive = true,
                Region::Track(id) => {
                    if hit.track.is_none() && self.get(*id).is_some() {
                        hit.track = Some(*id);
                    }
                }
            }
        }
        hit
    }

    /// Carousel currently holding the pointer.
    #[must_use]
    pub fn captured(&self) -> Option<CarouselId> {
        self.capture
    }

    fn broadcast_outside(&self, inside: Option<CarouselId>) {
        let origin = inside
            .and_then(|id| self.get(id))
            .and_then(CardCarousel::subscriber);
        self.bus.broadcast(origin);
    }

    /// Route a raw pointer event.
    pub fn dispatch_pointer(&mut self, event: PointerEvent, now: Duration) -> Response {
        let hit = self.hit_test(event.x, event.y);
        match event.phase {
            PointerPhase::Down => {
                self.broadcast_outside(hit.track);
                self.capture = None;
                let Some(id) = hit.track else {
                    return Response::empty();
                };
                let event = PointerEvent {
                    on_interactive: event.on_interactive || hit.interactive,
                    ..event
                };
                let response = self
                    .get_mut(id)
                    .map_or(Response::empty(), |c| c.handle(&event.into(), now));
                if response.contains(Response::HANDLED) {
                    self.capture = Some(id);
                }
                response
            }
            PointerPhase::Move => {
                if let Some(id) = self.capture {
                    return self
                        .get_mut(id)
                        .map_or(Response::empty(), |c| c.handle(&event.into(), now));
                }
                if event.kind == PointerKind::Touch {
                    self.broadcast_outside(hit.track);
                }
                Response::empty()
            }
            PointerPhase::Up | PointerPhase::Cancel => {
                let Some(id) = self.capture.take() else {
                    return Response::empty();
                };
                self.get_mut(id)
                    .map_or(Response::empty(), |c| c.handle(&event.into(), now))
            }
        }
    }

    /// Deliver a non-pointer event (control, key, resize) to one carousel.
    pub fn dispatch(&mut self, id: CarouselId, event: &InputEvent, now: Duration) -> Response {
        self.get_mut(id)
            .map_or(Response::empty(), |c| c.handle(event, now))
    }

    /// Advance every carousel's clock.
    pub fn tick(&mut self, now: Duration) {
        for carousel in self.carousels.iter_mut().flatten() {
            carousel.tick(now);
        }
    }

    /// Earliest pending timer across all carousels.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.carousels
            .iter()
            .flatten()
            .filter_map(CardCarousel::next_deadline)
            .min()
    }

    /// Tear down and remove a carousel.
    pub fn unmount(&mut self, id: CarouselId) -> Option<CardCarousel<T, S>> {
        let mut carousel = self.carousels.get_mut(id.0)?.take()?;
        carousel.teardown();
        self.regions.retain(|(_, region)| *region != Region::Track(id));
        if self.capture == Some(id) {
            self.capture = None;
        }
        Some(carousel)
    }
}
