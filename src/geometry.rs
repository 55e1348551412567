//! Viewport geometry: item measurements and the pitch derived from them.

use crate::error::{Error, Result};

/// Rendered measurements of one item and its track.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ItemMetrics {
    /// Rendered item width in px.
    pub width: f32,
    /// Left margin in px.
    pub margin_left: f32,
    /// Right margin in px.
    pub margin_right: f32,
    /// Track gap between neighbouring items in px.
    pub gap: f32,
}

impl ItemMetrics {
    /// Metrics for an item with no margins or gap.
    #[must_use]
    pub fn new(width: f32) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_margins(mut self, left: f32, right: f32) -> Self {
        self.margin_left = left;
        self.margin_right = right;
        self
    }

    #[must_use]
    pub fn with_gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    fn is_usable(self) -> bool {
        [self.width, self.margin_left, self.margin_right, self.gap]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
    }
}

/// Pixel width of one item step.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Pitch(f32);

impl Pitch {
    /// Zero pitch (nothing measured yet, or an empty track).
    pub const ZERO: Self = Self(0.0);

    /// Measure the pitch from rendered item metrics.
    pub fn measure(metrics: ItemMetrics) -> Result<Self> {
        if !metrics.is_usable() {
            return Err(Error::InvalidMetrics {
                width: metrics.width,
                margin: metrics.margin_left + metrics.margin_right,
                gap: metrics.gap,
            });
        }
        Ok(Self(
            metrics.width + metrics.margin_left + metrics.margin_right + metrics.gap,
        ))
    }

    /// Pitch in px.
    #[must_use]
    pub fn px(self) -> f32 {
        self.0
    }

    /// Track offset that puts padded `index` at the viewport origin.
    #[must_use]
    pub fn offset_for(self, index: usize) -> f32 {
        -(index as f32 * self.0)
    }

    /// Minimum drag distance (exclusive) that commits a step.
    #[must_use]
    pub fn swipe_threshold(self) -> f32 {
        self.0 / 4.0
    }
}

/// Current geometry of a mounted track.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Geometry {
    metrics: ItemMetrics,
    pitch: Pitch,
    viewport_width: f32,
}

impl Geometry {
    /// Measure initial geometry.
    pub fn new(metrics: ItemMetrics, viewport_width: f32) -> Result<Self> {
        Ok(Self {
            metrics,
            pitch: Pitch::measure(metrics)?,
            viewport_width: viewport_width.max(0.0),
        })
    }

    /// Recompute after a viewport resize.
    ///
    /// On error the previous geometry is left untouched.
    pub fn remeasure(&mut self, metrics: ItemMetrics, viewport_width: f32) -> Result<Pitch> {
        let pitch = Pitch::measure(metrics)?;
        self.metrics = metrics;
        self.pitch = pitch;
        self.viewport_width = viewport_width.max(0.0);
        Ok(pitch)
    }

    #[must_use]
    pub fn pitch(&self) -> Pitch {
        self.pitch
    }

    #[must_use]
    pub fn metrics(&self) -> ItemMetrics {
        self.metrics
    }

    #[must_use]
    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_pitch_sums_width_margins_gap() {
        let metrics = ItemMetrics::new(180.0).with_margins(4.0, 6.0).with_gap(10.0);
        let pitch = Pitch::measure(metrics).unwrap();
        assert_eq!(pitch.px(), 200.0);
        assert_eq!(pitch.swipe_threshold(), 50.0);
    }

    #[test]
    fn test_offset_for_index() {
        let pitch = Pitch::measure(ItemMetrics::new(100.0)).unwrap();
        assert_eq!(pitch.offset_for(0), 0.0);
        assert_eq!(pitch.offset_for(6), -600.0);
        assert_eq!(Pitch::ZERO.offset_for(6), 0.0);
    }

    #[test]
    fn test_rejects_unusable_metrics() {
        assert!(Pitch::measure(ItemMetrics::new(f32::NAN)).is_err());
        assert!(Pitch::measure(ItemMetrics::new(-1.0)).is_err());
        assert!(Pitch::measure(ItemMetrics::new(10.0).with_gap(f32::INFINITY)).is_err());
    }

    #[test]
    fn test_remeasure_keeps_old_on_error() {
        let mut geometry = Geometry::new(ItemMetrics::new(100.0), 600.0).unwrap();
        assert!(geometry.remeasure(ItemMetrics::new(f32::NAN), 300.0).is_err());
        assert_eq!(geometry.pitch().px(), 100.0);
        assert_eq!(geometry.viewport_width(), 600.0);

        let pitch = geometry
            .remeasure(ItemMetrics::new(50.0).with_gap(10.0), 300.0)
            .unwrap();
        assert_eq!(pitch.px(), 60.0);
        assert_eq!(geometry.viewport_width(), 300.0);
    }
}
