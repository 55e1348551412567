//! `card_carousel` - Headless infinite-loop card carousel engine
//!
//! Drives a horizontally scrolling strip of product cards: clone padding for
//! seamless wraparound, pitch-based positioning, drag gestures with axis
//! locking, dot indicators and timed transitions. Rendering is delegated to a
//! host through the [`TrackSurface`] trait.

// Crate-level lint configuration
#![warn(unsafe_code)]
#![allow(clippy::cast_possible_truncation)] // px to index and column conversions
#![allow(clippy::cast_sign_loss)] // Offsets are clamped before casting
#![allow(clippy::cast_precision_loss)] // Indices are far below f32 precision
#![allow(clippy::cast_possible_wrap)] // Column math
#![allow(clippy::module_name_repetitions)] // Allow gesture::GesturePhase etc
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::needless_pass_by_value)] // Allow pass by value for small Copy types
#![allow(clippy::suboptimal_flops)] // Standard math notation is clearer than mul_add
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::redundant_clone)] // Clones in tests for clarity are fine

pub mod carousel;
pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod geometry;
pub mod gesture;
pub mod indicator;
pub mod input;
pub mod mount;
pub mod page;
pub mod render;
pub mod reset;
pub mod surface;
pub mod timer;
pub mod track;

// Re-export core types at crate root
pub use carousel::CardCarousel;
pub use config::{CarouselOptions, CompletionMode};
pub use error::{Error, Result};
pub use event::{
    LogLevel, clear_event_callback, clear_log_callback, emit_event, emit_log, set_event_callback,
    set_log_callback,
};
pub use geometry::{Geometry, ItemMetrics, Pitch};
pub use mount::{Container, Layout};
pub use track::{PaddedSequence, Slot, Track};

// Re-export engine pieces
pub use controller::{PositionController, SlideOutcome, Settled};
pub use gesture::{Commit, GesturePhase, GestureTracker, Motion};
pub use indicator::{IndicatorRow, real_index};
pub use reset::{ResetBus, ResetSubscription, SubscriberId};
pub use timer::{TimerId, TimerQueue};

// Re-export input types
pub use input::{
    Control, InputEvent, NavKey, PointerEvent, PointerKind, PointerPhase, ResizeEvent, Response,
};

// Re-export host-facing types
pub use page::{CarouselId, Hit, Page, Rect};
pub use render::{render_viewport, visible_slots};
pub use surface::{HeadlessSurface, SurfaceOp, TrackClasses, TrackSurface, Transition, TransitionId};

#[cfg(feature = "serde")]
pub use config::RawOptions;
