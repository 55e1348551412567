//! Shared helpers for integration tests: a carousel harness with its own
//! clock and pointer-gesture builders.

#![allow(dead_code)] // Shared test helper; not every integration test uses every helper

use card_carousel::{
    CardCarousel, CarouselOptions, Container, HeadlessSurface, ItemMetrics, PointerEvent, Track,
    render_viewport,
};
use std::time::Duration;

/// Card width used by every harness, in px.
pub const CARD_PX: f32 = 100.0;

pub fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

/// A mounted carousel of `#1..#N` cards plus a clock.
pub struct Harness {
    pub carousel: CardCarousel<String, HeadlessSurface>,
    pub now: Duration,
    pub columns: usize,
}

impl Harness {
    pub fn new(items: usize, show: usize) -> Self {
        Self::with_options(items, CarouselOptions::new(show))
    }

    pub fn with_options(items: usize, options: CarouselOptions) -> Self {
        let cards = (1..=items).map(|n| format!("#{n}")).collect();
        let track = Track::new(cards, ItemMetrics::new(CARD_PX));
        let width = CARD_PX * options.cards_to_show as f32;
        Self {
            carousel: CardCarousel::mount(
                Container::with_all(track, width),
                options,
                HeadlessSurface::new(),
                Duration::ZERO,
            ),
            now: Duration::ZERO,
            columns: 5,
        }
    }

    /// Move the clock forward and run due timers.
    pub fn advance_clock(&mut self, by: Duration) {
        self.now += by;
        self.carousel.tick(self.now);
    }

    /// Let any transition in flight settle.
    pub fn settle(&mut self) {
        self.advance_clock(ms(1000));
    }

    /// Press, move by `dx` horizontally and release, all at the current time.
    pub fn drag(&mut self, dx: f32) {
        let now = self.now;
        self.carousel
            .handle(&PointerEvent::touch_start(300.0, 50.0).into(), now);
        self.carousel
            .handle(&PointerEvent::touch_move(300.0 + dx, 50.0).into(), now);
        self.carousel
            .handle(&PointerEvent::touch_end(300.0 + dx, 50.0).into(), now);
    }

    /// Visible viewport as text.
    pub fn frame(&self) -> String {
        let c = &self.carousel;
        match (c.sequence(), c.pitch(), c.viewport_width()) {
            (Some(sequence), Some(pitch), Some(width)) => {
                render_viewport(sequence, c.surface().offset(), pitch, width, self.columns)
            }
            _ => String::new(),
        }
    }

    pub fn index(&self) -> usize {
        self.carousel.index().unwrap_or_default()
    }

    pub fn real(&self) -> usize {
        self.carousel.real_index().unwrap_or_default()
    }
}
