//! Host input events consumed by the carousel.

use crate::geometry::ItemMetrics;
use bitflags::bitflags;

/// Source device of a pointer event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    /// Mouse (mousedown/mousemove/mouseup).
    Mouse,
    /// Touch (touchstart/touchmove/touchend/touchcancel).
    Touch,
}

/// Phase of a pointer event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerPhase {
    /// Button pressed / finger down.
    Down,
    /// Pointer moved.
    Move,
    /// Button released / finger lifted.
    Up,
    /// Gesture aborted by the platform.
    Cancel,
}

/// A pointer or touch event in page coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub phase: PointerPhase,
    /// X position in px.
    pub x: f32,
    /// Y position in px.
    pub y: f32,
    /// The event target is (inside) a link or button.
    pub on_interactive: bool,
}

impl PointerEvent {
    /// Create a new pointer event.
    #[must_use]
    pub fn new(kind: PointerKind, phase: PointerPhase, x: f32, y: f32) -> Self {
        Self {
            kind,
            phase,
            x,
            y,
            on_interactive: false,
        }
    }

    #[must_use]
    pub fn mouse_down(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Mouse, PointerPhase::Down, x, y)
    }

    #[must_use]
    pub fn mouse_move(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Mouse, PointerPhase::Move, x, y)
    }

    #[must_use]
    pub fn mouse_up(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Mouse, PointerPhase::Up, x, y)
    }

    #[must_use]
    pub fn touch_start(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Touch, PointerPhase::Down, x, y)
    }

    #[must_use]
    pub fn touch_move(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Touch, PointerPhase::Move, x, y)
    }

    #[must_use]
    pub fn touch_end(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Touch, PointerPhase::Up, x, y)
    }

    #[must_use]
    pub fn touch_cancel(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Touch, PointerPhase::Cancel, x, y)
    }

    /// Mark the target as an interactive child (link or button).
    #[must_use]
    pub fn on_interactive(mut self) -> Self {
        self.on_interactive = true;
        self
    }

    /// Check if this event starts a gesture.
    #[must_use]
    pub fn is_down(&self) -> bool {
        self.phase == PointerPhase::Down
    }

    /// Check if this event ends a gesture (release or cancel).
    #[must_use]
    pub fn is_end(&self) -> bool {
        matches!(self.phase, PointerPhase::Up | PointerPhase::Cancel)
    }
}

/// Navigation controls around the track.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    /// Previous arrow.
    Prev,
    /// Next arrow.
    Next,
    /// Dot indicator for a real item.
    Dot(usize),
}

/// Keys that can activate a focused control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavKey {
    Enter,
    Space,
    Other,
}

impl NavKey {
    /// Whether the key activates a focused control.
    #[must_use]
    pub fn activates(self) -> bool {
        matches!(self, Self::Enter | Self::Space)
    }
}

/// Viewport resize with the item measurements taken after relayout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizeEvent {
    /// New viewport (container) width in px.
    pub viewport_width: f32,
    /// Item metrics after relayout.
    pub metrics: ItemMetrics,
}

impl ResizeEvent {
    /// Create a new resize event.
    #[must_use]
    pub fn new(viewport_width: f32, metrics: ItemMetrics) -> Self {
        Self {
            viewport_width,
            metrics,
        }
    }
}

/// An input event delivered to a carousel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// Pointer or touch input on (or captured by) the track.
    Pointer(PointerEvent),
    /// Click on a navigation control.
    Activate(Control),
    /// Key press while a navigation control has focus.
    Key { key: NavKey, focus: Control },
    /// Viewport resized.
    Resize(ResizeEvent),
}

impl InputEvent {
    /// Get the pointer event if this is one.
    #[must_use]
    pub fn pointer(&self) -> Option<&PointerEvent> {
        match self {
            Self::Pointer(e) => Some(e),
            _ => None,
        }
    }

    /// Check if this is a resize event.
    #[must_use]
    pub fn is_resize(&self) -> bool {
        matches!(self, Self::Resize(_))
    }
}

impl From<PointerEvent> for InputEvent {
    fn from(e: PointerEvent) -> Self {
        Self::Pointer(e)
    }
}

impl From<ResizeEvent> for InputEvent {
    fn from(e: ResizeEvent) -> Self {
        Self::Resize(e)
    }
}

impl From<Control> for InputEvent {
    fn from(control: Control) -> Self {
        Self::Activate(control)
    }
}

bitflags! {
    /// What the carousel did with an event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Response: u8 {
        /// The carousel acted on the event.
        const HANDLED = 1 << 0;
        /// The host should suppress the platform default (page scroll, text selection).
        const PREVENT_DEFAULT = 1 << 1;
    }
}
