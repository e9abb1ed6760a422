//! Gesture interpretation for a swipe-reveal row.
//!
//! The interpreter watches the raw pointer stream and answers three
//! questions on behalf of the widget:
//!
//! - has the touch moved far enough along the drag axis to count as a drag?
//! - could the stream still become a tap on the main view?
//! - should the nearest scrolling ancestor be asked to stop intercepting?
//!
//! It never moves anything itself. Capturing and moving the main view is the
//! drag controller's job.

use swipe_reveal_core::logging::targets;
use swipe_reveal_core::{Point, Rect};

use super::events::{PointerEvent, TouchResponse};
use super::geometry::DragEdge;

/// What the widget knows about its own state when classifying an event.
#[derive(Debug, Clone, Copy)]
pub(crate) struct GestureContext {
    /// Current main view rectangle.
    pub main_rect: Rect,
    /// Main view's distance to the nearer end of its travel range.
    pub dist_to_closest_edge: i32,
    /// A settle animation is running.
    pub settling: bool,
    /// Nothing is captured and nothing is settling.
    pub idle: bool,
}

/// Tracks one touch stream from `Down` to `Up`/`Cancel`.
#[derive(Debug, Clone)]
pub(crate) struct GestureInterpreter {
    edge: DragEdge,
    touch_slop: i32,
    min_disallow_distance: f32,

    down_position: Option<Point>,
    last_position: Option<Point>,
    /// Sum of absolute along-axis movements since `Down`.
    drag_distance: i32,
    down_in_main: bool,
    /// The touch left the slop circle around the down position.
    scrolling: bool,
    /// The ancestor was asked to stop intercepting during this stream.
    disallowed: bool,
}

impl GestureInterpreter {
    pub fn new(edge: DragEdge, touch_slop: i32, min_disallow_distance: f32) -> Self {
        Self {
            edge,
            touch_slop,
            min_disallow_distance,
            down_position: None,
            last_position: None,
            drag_distance: 0,
            down_in_main: false,
            scrolling: false,
            disallowed: false,
        }
    }

    /// Update the running totals with `event`.
    ///
    /// Called before the drag controller sees the event so that the drag
    /// decision includes the current movement.
    pub fn track(&mut self, event: &PointerEvent, main_rect: Rect) {
        match *event {
            PointerEvent::Down { position } => {
                self.down_position = Some(position);
                self.last_position = Some(position);
                self.drag_distance = 0;
                self.down_in_main = main_rect.contains_inclusive(position);
                self.scrolling = false;
                self.disallowed = false;
            }
            PointerEvent::Move { position } | PointerEvent::Up { position, .. } => {
                if let Some(last) = self.last_position {
                    let delta = self.edge.axis(position) - self.edge.axis(last);
                    self.drag_distance = self.drag_distance.saturating_add(delta.abs());
                }
                self.last_position = Some(position);

                if !self.scrolling
                    && let Some(down) = self.down_position
                {
                    let dx = (position.x - down.x) as i64;
                    let dy = (position.y - down.y) as i64;
                    let slop = self.touch_slop as i64;
                    self.scrolling = dx * dx + dy * dy > slop * slop;
                }
            }
            PointerEvent::Cancel => {}
        }
    }

    /// Returns true once the cumulative along-axis movement reaches the slop.
    #[inline]
    pub fn drag_initiated(&self) -> bool {
        self.down_position.is_some() && self.drag_distance >= self.touch_slop
    }

    /// Cumulative along-axis movement since the last `Down`.
    #[cfg(test)]
    pub fn drag_distance(&self) -> i32 {
        self.drag_distance
    }

    /// Decide what the host should do with `event`.
    ///
    /// `ctx` must describe the widget after the drag controller handled the
    /// event, so the main view position already reflects this movement.
    pub fn classify(&mut self, event: &PointerEvent, ctx: GestureContext) -> TouchResponse {
        let in_main_now = event
            .position()
            .is_some_and(|position| ctx.main_rect.contains_inclusive(position));
        let click_candidate = in_main_now && !self.drag_initiated();

        let disallow_parent_intercept = match event {
            PointerEvent::Move { .. } if self.scrolling => {
                if !self.disallowed
                    && ctx.dist_to_closest_edge as f32 >= self.min_disallow_distance
                {
                    tracing::trace!(
                        target: targets::GESTURE,
                        distance = ctx.dist_to_closest_edge,
                        "asking ancestor to stop intercepting"
                    );
                    self.disallowed = true;
                }
                Some(self.disallowed)
            }
            _ => None,
        };

        let click = matches!(event, PointerEvent::Up { .. })
            && self.down_in_main
            && click_candidate;

        let intercept = !click_candidate && (ctx.settling || (ctx.idle && self.scrolling));

        if event.ends_stream() {
            self.down_position = None;
            self.last_position = None;
        }

        TouchResponse {
            intercept,
            disallow_parent_intercept,
            click,
        }
    }
}
