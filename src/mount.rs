//! Construction input: the container a carousel is mounted on.

use crate::error::{Error, Result};
use crate::input::Control;
use crate::track::Track;

/// The container element a carousel mounts on.
///
/// A usable container holds a track. Previous/next arrows and a dot container
/// are optional; a carousel without them is still driven by gestures and
/// programmatic calls.
#[derive(Clone, Debug, PartialEq)]
pub struct Container<T> {
    track: Option<Track<T>>,
    viewport_width: f32,
    has_prev: bool,
    has_next: bool,
    has_dots: bool,
}

impl<T> Default for Container<T> {
    fn default() -> Self {
        Self {
            track: None,
            viewport_width: 0.0,
            has_prev: false,
            has_next: false,
            has_dots: false,
        }
    }
}

impl<T> Container<T> {
    /// An empty container (no track, no controls).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A container with a track and both arrows and dots.
    #[must_use]
    pub fn with_all(track: Track<T>, viewport_width: f32) -> Self {
        Self::new()
            .with_track(track)
            .with_viewport_width(viewport_width)
            .with_arrows()
            .with_dots()
    }

    #[must_use]
    pub fn with_track(mut self, track: Track<T>) -> Self {
        self.track = Some(track);
        self
    }

    #[must_use]
    pub fn with_viewport_width(mut self, width: f32) -> Self {
        self.viewport_width = width;
        self
    }

    /// Add previous and next arrows.
    #[must_use]
    pub fn with_arrows(mut self) -> Self {
        self.has_prev = true;
        self.has_next = true;
        self
    }

    /// Add a dot indicator container.
    #[must_use]
    pub fn with_dots(mut self) -> Self {
        self.has_dots = true;
        self
    }

    #[must_use]
    pub fn track(&self) -> Option<&Track<T>> {
        self.track.as_ref()
    }

    #[must_use]
    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    #[must_use]
    pub fn has_dots(&self) -> bool {
        self.has_dots
    }

    /// Whether `control` exists in this container.
    #[must_use]
    pub fn has_control(&self, control: Control) -> bool {
        match control {
            Control::Prev => self.has_prev,
            Control::Next => self.has_next,
            Control::Dot(_) => self.has_dots,
        }
    }

    /// Split into the track and the remaining layout, failing without a track.
    pub fn into_track(self) -> Result<(Track<T>, Layout)> {
        let layout = Layout {
            viewport_width: self.viewport_width,
            has_prev: self.has_prev,
            has_next: self.has_next,
            has_dots: self.has_dots,
        };
        let track = self.track.ok_or(Error::MissingTrack)?;
        Ok((track, layout))
    }
}

/// Container layout retained after mounting.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Layout {
    pub viewport_width: f32,
    pub has_prev: bool,
    pub has_next: bool,
    pub has_dots: bool,
}

impl Layout {
    /// Whether `control` exists.
    #[must_use]
    pub fn has_control(&self, control: Control) -> bool {
        match control {
            Control::Prev => self.has_prev,
            Control::Next => self.has_next,
            Control::Dot(_) => self.has_dots,
        }
    }
}
