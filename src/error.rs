//! Error types for the carousel engine.
//!
//! None of these reach the host through the public widget operations: the
//! carousel turns every failure into a quieter behavior (inert widget, kept
//! pitch, dropped input) and logs it. They are returned by the lower-level
//! building blocks so callers composing those directly can react.

use std::fmt;

/// Result type alias for carousel operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for carousel operations.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// The container has no track element to hold the cards.
    MissingTrack,
    /// A configuration option is out of its accepted range.
    InvalidOption {
        name: &'static str,
        reason: String,
    },
    /// Item measurements are not usable for a pitch (NaN, infinite or negative).
    InvalidMetrics {
        width: f32,
        margin: f32,
        gap: f32,
    },
    /// A real item index past the end of the track.
    IndexOutOfRange { index: usize, len: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTrack => write!(f, "container has no track element"),
            Self::InvalidOption { name, reason } => {
                write!(f, "invalid option `{name}`: {reason}")
            }
            Self::InvalidMetrics { width, margin, gap } => {
                write!(
                    f,
                    "invalid item metrics: width={width} margin={margin} gap={gap}"
                )
            }
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for {len} items")
            }
        }
    }
}

impl std::error::Error for Error {}
