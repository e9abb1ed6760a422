//! Pointer input and the touch decision handed back to the host.

use swipe_reveal_core::Point;

/// Pointer velocity in pixels per second, as measured by the host's
/// velocity tracker at the moment the pointer went up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

impl Velocity {
    /// No movement.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a velocity from its components.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// One event of a single-pointer touch stream, in the same coordinate space
/// as the bounds passed to `layout`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// The pointer touched down.
    Down { position: Point },
    /// The pointer moved while down.
    Move { position: Point },
    /// The pointer lifted.
    Up { position: Point, velocity: Velocity },
    /// The stream was taken away (for example by an ancestor).
    Cancel,
}

impl PointerEvent {
    /// Shorthand for a `Down` event.
    pub fn down(x: i32, y: i32) -> Self {
        PointerEvent::Down {
            position: Point::new(x, y),
        }
    }

    /// Shorthand for a `Move` event.
    pub fn moved(x: i32, y: i32) -> Self {
        PointerEvent::Move {
            position: Point::new(x, y),
        }
    }

    /// Shorthand for an `Up` event.
    pub fn up(x: i32, y: i32, velocity: Velocity) -> Self {
        PointerEvent::Up {
            position: Point::new(x, y),
            velocity,
        }
    }

    /// Where the pointer is, if the event carries a position.
    pub fn position(&self) -> Option<Point> {
        match *self {
            PointerEvent::Down { position }
            | PointerEvent::Move { position }
            | PointerEvent::Up { position, .. } => Some(position),
            PointerEvent::Cancel => None,
        }
    }

    /// Returns true for `Up` and `Cancel`.
    pub fn ends_stream(&self) -> bool {
        matches!(self, PointerEvent::Up { .. } | PointerEvent::Cancel)
    }
}

/// What the widget wants the host to do with the event it just processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TouchResponse {
    /// Keep the rest of the stream away from the main view's own content.
    pub intercept: bool,
    /// `Some(true)` asks the nearest scrolling ancestor to stop intercepting;
    /// `Some(false)` lets it intercept again. `None` leaves it unchanged.
    pub disallow_parent_intercept: Option<bool>,
    /// The stream ended as a tap on the main view that should reach it.
    pub click: bool,
}
