//! Carousel configuration.
//!
//! [`CarouselOptions`] mirrors the option object a storefront page hands to
//! each slider (`cardsToShow`, `autoSlide`, `slideInterval`, `loop`) plus the
//! timing knobs the engine needs to stay in lockstep with the host's visual
//! transition.

use crate::error::{Error, Result};
use std::time::Duration;

/// Default visual transition duration; also the settle delay.
pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(300);

/// Default auto-slide period.
pub const DEFAULT_SLIDE_INTERVAL: Duration = Duration::from_millis(5000);

/// Movement (in px, either axis) below which a gesture stays unclassified.
pub const DEFAULT_DEAD_ZONE: f32 = 8.0;

/// Window after a gesture ends during which axis classification is suppressed.
pub const DEFAULT_GESTURE_GRACE: Duration = Duration::from_millis(100);

/// Extra time granted to a host notification before the fallback timer settles.
pub const NOTIFY_FALLBACK_MARGIN: Duration = Duration::from_millis(100);

/// How the end of a committed transition is detected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CompletionMode {
    /// Settle after exactly `transition_duration`.
    #[default]
    Timer,
    /// Settle when the host reports the transition finished, with a fallback
    /// timer at `transition_duration + NOTIFY_FALLBACK_MARGIN`.
    Notify,
}

/// Carousel options.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CarouselOptions {
    /// Items visible per viewport (>= 1). Also the clone count when looping.
    pub cards_to_show: usize,
    /// Advance periodically.
    pub auto_slide: bool,
    /// Auto-slide period.
    pub slide_interval: Duration,
    /// Loop infinitely. Forced off when the content is shorter than a viewport.
    pub loop_enabled: bool,
    /// Visual transition duration, shared with the settle timer.
    pub transition_duration: Duration,
    /// Transition completion detection.
    pub completion: CompletionMode,
    /// Axis classification dead zone in px.
    pub dead_zone: f32,
    /// Post-gesture grace window.
    pub gesture_grace: Duration,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            cards_to_show: 1,
            auto_slide: false,
            slide_interval: DEFAULT_SLIDE_INTERVAL,
            loop_enabled: true,
            transition_duration: DEFAULT_TRANSITION,
            completion: CompletionMode::Timer,
            dead_zone: DEFAULT_DEAD_ZONE,
            gesture_grace: DEFAULT_GESTURE_GRACE,
        }
    }
}

impl CarouselOptions {
    /// Options with the given number of visible cards and defaults elsewhere.
    #[must_use]
    pub fn new(cards_to_show: usize) -> Self {
        Self {
            cards_to_show,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_cards_to_show(mut self, cards: usize) -> Self {
        self.cards_to_show = cards;
        self
    }

    /// Enable auto-slide with the given period.
    #[must_use]
    pub fn with_auto_slide(mut self, interval: Duration) -> Self {
        self.auto_slide = true;
        self.slide_interval = interval;
        self
    }

    #[must_use]
    pub fn with_loop(mut self, enabled: bool) -> Self {
        self.loop_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_transition(mut self, duration: Duration) -> Self {
        self.transition_duration = duration;
        self
    }

    #[must_use]
    pub fn with_completion(mut self, mode: CompletionMode) -> Self {
        self.completion = mode;
        self
    }

    #[must_use]
    pub fn with_dead_zone(mut self, px: f32) -> Self {
        self.dead_zone = px;
        self
    }

    #[must_use]
    pub fn with_gesture_grace(mut self, grace: Duration) -> Self {
        self.gesture_grace = grace;
        self
    }

    /// Delay after which the settle timer fires for a committed transition.
    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        match self.completion {
            CompletionMode::Timer => self.transition_duration,
            CompletionMode::Notify => self.transition_duration + NOTIFY_FALLBACK_MARGIN,
        }
    }

    /// Check every option against its accepted range.
    pub fn validate(&self) -> Result<()> {
        if self.cards_to_show == 0 {
            return Err(Error::InvalidOption {
                name: "cards_to_show",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.auto_slide && self.slide_interval.is_zero() {
            return Err(Error::InvalidOption {
                name: "slide_interval",
                reason: "must be non-zero when auto_slide is on".to_string(),
            });
        }
        if !self.dead_zone.is_finite() || self.dead_zone < 0.0 {
            return Err(Error::InvalidOption {
                name: "dead_zone",
                reason: format!("{} is not a usable distance", self.dead_zone),
            });
        }
        Ok(())
    }

    /// Validated copy of these options; invalid fields fall back to defaults.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.cards_to_show == 0 {
            self.cards_to_show = defaults.cards_to_show;
        }
        if self.slide_interval.is_zero() {
            self.slide_interval = defaults.slide_interval;
        }
        if !self.dead_zone.is_finite() || self.dead_zone < 0.0 {
            self.dead_zone = defaults.dead_zone;
        }
        self
    }
}

/// Host option object as written in page scripts and data attributes.
#[cfg(feature = "serde")]
#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawOptions {
    pub cards_to_show: Option<usize>,
    pub auto_slide: Option<bool>,
    /// Milliseconds.
    pub slide_interval: Option<u64>,
    #[serde(rename = "loop")]
    pub loop_enabled: Option<bool>,
    /// Milliseconds.
    pub transition_duration: Option<u64>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawOptions> for CarouselOptions {
    type Error = Error;

    fn try_from(raw: RawOptions) -> Result<Self> {
        let mut options = Self::default();
        if let Some(cards) = raw.cards_to_show {
            options.cards_to_show = cards;
        }
        if let Some(auto) = raw.auto_slide {
            options.auto_slide = auto;
        }
        if let Some(ms) = raw.slide_interval {
            options.slide_interval = Duration::from_millis(ms);
        }
        if let Some(enabled) = raw.loop_enabled {
            options.loop_enabled = enabled;
        }
        if let Some(ms) = raw.transition_duration {
            options.transition_duration = Duration::from_millis(ms);
        }
        options.validate()?;
        Ok(options)
    }
}
