//! Drag state and slide notifications.

use serde::{Deserialize, Serialize};
use swipe_reveal_core::Point;
use swipe_reveal_core::logging::targets;

use super::geometry::RevealGeometry;

/// The drag state of a [`SwipeRevealLayout`](crate::SwipeRevealLayout).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragState {
    /// At rest, main view at the closed position.
    #[default]
    Close,
    /// Settling towards the closed position after `close(true)`.
    Closing,
    /// At rest, main view at the open position.
    Open,
    /// Settling towards the open position after `open(true)`.
    Opening,
    /// Following the finger, or settling after the finger let go.
    Dragging,
}

impl DragState {
    /// Returns true for `Open` and `Opening`.
    #[inline]
    pub fn is_opening_or_open(self) -> bool {
        matches!(self, DragState::Open | DragState::Opening)
    }

    /// Returns true for the resting states.
    #[inline]
    pub fn is_idle(self) -> bool {
        matches!(self, DragState::Open | DragState::Close)
    }
}

/// A slide notification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlideEvent {
    /// The main view reached the closed position.
    Closed,
    /// The main view reached the open position.
    Opened,
    /// The main view is somewhere in between; the value is in `0.0..=1.0`.
    Sliding(f32),
}

impl SlideEvent {
    /// Classify the main view origin `origin`.
    pub fn at(geometry: &RevealGeometry, origin: Point) -> Self {
        if geometry.is_closed_at(origin) {
            SlideEvent::Closed
        } else if geometry.is_open_at(origin) {
            SlideEvent::Opened
        } else {
            SlideEvent::Sliding(geometry.slide_offset(origin))
        }
    }

    /// Fraction of the travel range: `0.0` closed, `1.0` open.
    pub fn offset(&self) -> f32 {
        match *self {
            SlideEvent::Closed => 0.0,
            SlideEvent::Opened => 1.0,
            SlideEvent::Sliding(offset) => offset,
        }
    }
}

/// Holds the current [`DragState`] and decides which transitions notify.
#[derive(Debug, Clone, Default)]
pub(crate) struct StateMachine {
    state: DragState,
    /// Swallow the next notifying transition.
    suppress_next: bool,
}

impl StateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Move to `next`.
    ///
    /// Returns the state to announce, or `None` if nothing changed or the
    /// notification was suppressed.
    pub fn transition(&mut self, next: DragState) -> Option<DragState> {
        if next == self.state {
            return None;
        }
        let previous = self.state;
        self.state = next;

        if self.suppress_next {
            self.suppress_next = false;
            tracing::debug!(target: targets::STATE, ?previous, ?next, "transition (silent)");
            return None;
        }
        tracing::debug!(target: targets::STATE, ?previous, ?next, "transition");
        Some(next)
    }

    /// Move to `next` without any notification.
    pub fn set_silently(&mut self, next: DragState) {
        if next != self.state {
            tracing::trace!(target: targets::STATE, previous = ?self.state, ?next, "state set");
        }
        self.state = next;
    }

    /// Swallow the next notifying transition.
    pub fn suppress_next(&mut self) {
        self.suppress_next = true;
    }

    pub fn clear_suppression(&mut self) {
        self.suppress_next = false;
    }

    /// Resting state for a main view at `origin`: `Close` if it sits exactly
    /// at the closed position, `Open` otherwise.
    pub fn resolve_idle(geometry: &RevealGeometry, origin: Point) -> DragState {
        if geometry.is_closed_at(origin) {
            DragState::Close
        } else {
            DragState::Open
        }
    }
}
