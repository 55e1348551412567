//! Carousel engine performance benchmarks.

#![allow(clippy::semicolon_if_nothing_returned)]

use card_carousel::{
    CardCarousel, CarouselOptions, Container, HeadlessSurface, ItemMetrics, PaddedSequence,
    PointerEvent, Track, render_viewport,
};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::Duration;

fn mount(items: usize, show: usize) -> CardCarousel<String, HeadlessSurface> {
    let cards = (0..items).map(|n| format!("card {n}")).collect();
    CardCarousel::mount(
        Container::with_all(Track::new(cards, ItemMetrics::new(180.0).with_gap(16.0)), 1200.0),
        CarouselOptions::new(show),
        HeadlessSurface::new(),
        Duration::ZERO,
    )
}

/// Benchmark building the clone-padded sequence.
fn bench_clone_buffer(c: &mut Criterion) {
    let mut group = c.benchmark_group("clone_buffer");

    for items in [8usize, 64, 512] {
        let cards: Vec<String> = (0..items).map(|n| format!("card {n}")).collect();
        group.bench_with_input(BenchmarkId::from_parameter(items), &cards, |b, cards| {
            b.iter(|| PaddedSequence::build(black_box(cards.clone()), 6, true));
        });
    }

    group.finish();
}

/// Benchmark a committed slide followed by its settle.
fn bench_slide_settle(c: &mut Criterion) {
    let mut group = c.benchmark_group("slide_settle");

    group.bench_function("advance", |b| {
        let mut carousel = mount(24, 6);
        let mut now = Duration::ZERO;
        b.iter(|| {
            carousel.advance(now);
            now += Duration::from_millis(300);
            carousel.tick(black_box(now));
        });
    });

    group.bench_function("retreat_wrap", |b| {
        let mut carousel = mount(24, 6);
        let mut now = Duration::ZERO;
        b.iter(|| {
            carousel.retreat(now);
            now += Duration::from_millis(300);
            carousel.tick(black_box(now));
        });
    });

    group.finish();
}

/// Benchmark a full drag: press, 30 moves, release, settle.
fn bench_drag_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("drag_cycle");

    group.bench_function("touch_drag", |b| {
        let mut carousel = mount(24, 6);
        let mut now = Duration::ZERO;
        b.iter(|| {
            carousel.handle(&PointerEvent::touch_start(600.0, 100.0).into(), now);
            for step in 1..=30u8 {
                let x = 600.0 - f32::from(step) * 4.0;
                carousel.handle(&PointerEvent::touch_move(black_box(x), 100.0).into(), now);
            }
            carousel.handle(&PointerEvent::touch_end(480.0, 100.0).into(), now);
            now += Duration::from_millis(400);
            carousel.tick(now);
        });
    });

    group.finish();
}

/// Benchmark text rendering of the viewport.
fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_viewport");
    let carousel = mount(24, 6);
    let sequence = carousel.sequence().cloned().unwrap_or_else(|| PaddedSequence::unpadded(Vec::new()));
    let pitch = carousel.pitch().unwrap_or_default();

    for columns in [8usize, 24] {
        group.bench_with_input(BenchmarkId::from_parameter(columns), &columns, |b, &columns| {
            b.iter(|| render_viewport(&sequence, black_box(-1234.0), pitch, 1200.0, columns));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_clone_buffer,
    bench_slide_settle,
    bench_drag_cycle,
    bench_render
);
criterion_main!(benches);
