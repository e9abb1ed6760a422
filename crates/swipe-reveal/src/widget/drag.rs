//! Drag capture, movement and release.
//!
//! The [`DragController`] decides when the main view is captured by the
//! finger, turns pointer movement into clamped main view positions, picks
//! the open or closed target on release, and owns the settle animation that
//! carries the view there.
//!
//! The controller does not own the main view's position. Every call takes
//! the current geometry and rectangles and returns a [`DragOutcome`] that
//! the widget applies.

use std::time::Duration;

use swipe_reveal_core::logging::targets;
use swipe_reveal_core::{Point, Rect};

use super::animation::{SettleAnimation, SettleStep, SettleTiming};
use super::events::{PointerEvent, Velocity};
use super::geometry::{DragEdge, RevealGeometry};

/// Where a released or programmatically moved main view should end up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapTarget {
    Open,
    Close,
}

impl SnapTarget {
    /// The main view origin for this target.
    pub fn origin(self, geometry: &RevealGeometry) -> Point {
        match self {
            SnapTarget::Open => geometry.main_open.origin,
            SnapTarget::Close => geometry.main_closed.origin,
        }
    }
}

/// How a capture became possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaptureSource {
    MainView,
    EdgeZone,
}

/// What the widget must do after the controller processed an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum DragOutcome {
    /// Nothing changed.
    Idle,
    /// The main view is now following the finger.
    Captured,
    /// Move the main view's origin here.
    Moved(Point),
    /// The finger let go. `velocity` is along the drag axis in px/s.
    Released { target: SnapTarget, velocity: f32 },
}

/// What `abort` interrupted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Interrupted {
    /// A settle was running; the view belongs at this origin.
    Settle(Point),
    /// The view was captured; it stays where it is.
    Capture,
}

/// Per-event inputs from the widget.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DragInput<'a> {
    pub geometry: &'a RevealGeometry,
    pub main_rect: Rect,
    pub bounds: Rect,
    /// The gesture interpreter considers this stream a drag.
    pub drag_initiated: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct DragController {
    edge: DragEdge,
    edge_size: i32,
    min_fling_velocity_dp: f32,
    density: f32,
    timing: SettleTiming,

    locked: bool,
    captured: bool,
    pending: Option<CaptureSource>,
    last_position: Option<Point>,
    settle: Option<SettleAnimation>,
}

impl DragController {
    pub fn new(
        edge: DragEdge,
        edge_size: i32,
        min_fling_velocity_dp: f32,
        density: f32,
        timing: SettleTiming,
    ) -> Self {
        Self {
            edge,
            edge_size,
            min_fling_velocity_dp,
            density,
            timing,
            locked: false,
            captured: false,
            pending: None,
            last_position: None,
            settle: None,
        }
    }

    /// Refuse new captures. An ongoing capture is not affected.
    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    pub fn set_min_fling_velocity(&mut self, dp_per_second: f32) {
        self.min_fling_velocity_dp = dp_per_second;
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    #[cfg(test)]
    pub fn is_captured(&self) -> bool {
        self.captured
    }

    #[inline]
    pub fn is_settling(&self) -> bool {
        self.settle.is_some()
    }

    /// Neither captured nor settling.
    #[inline]
    pub fn is_idle(&self) -> bool {
        !self.captured && self.settle.is_none()
    }

    pub fn process(&mut self, event: &PointerEvent, input: DragInput<'_>) -> DragOutcome {
        match *event {
            PointerEvent::Down { position } => {
                self.last_position = Some(position);
                self.captured = false;
                self.pending = None;

                let in_main = input.main_rect.contains_inclusive(position);
                if in_main && self.settle.is_some() && self.try_capture(CaptureSource::MainView) {
                    return DragOutcome::Captured;
                }

                self.pending = if in_main {
                    Some(CaptureSource::MainView)
                } else if self
                    .edge
                    .edge_zone(input.bounds, self.edge_size)
                    .contains_inclusive(position)
                {
                    Some(CaptureSource::EdgeZone)
                } else {
                    None
                };
                DragOutcome::Idle
            }
            PointerEvent::Move { position } => {
                let last = self.last_position.replace(position);

                if self.captured {
                    let Some(last) = last else {
                        return DragOutcome::Idle;
                    };
                    let proposed = input
                        .main_rect
                        .origin
                        .offset(position.x - last.x, position.y - last.y);
                    let clamped = input.geometry.clamp_main(proposed);
                    if clamped == input.main_rect.origin {
                        return DragOutcome::Idle;
                    }
                    return DragOutcome::Moved(clamped);
                }

                if input.drag_initiated
                    && let Some(source) = self.pending.take()
                    && self.try_capture(source)
                {
                    return DragOutcome::Captured;
                }
                DragOutcome::Idle
            }
            PointerEvent::Up { velocity, .. } => self.release(input, velocity),
            PointerEvent::Cancel => self.release(input, Velocity::ZERO),
        }
    }

    fn try_capture(&mut self, source: CaptureSource) -> bool {
        if self.locked {
            tracing::debug!(target: targets::DRAG, ?source, "capture refused: drag locked");
            return false;
        }
        self.captured = true;
        self.pending = None;
        self.settle = None;
        tracing::debug!(target: targets::DRAG, ?source, "main view captured");
        true
    }

    fn release(&mut self, input: DragInput<'_>, velocity: Velocity) -> DragOutcome {
        self.last_position = None;
        self.pending = None;
        if !self.captured {
            return DragOutcome::Idle;
        }
        self.captured = false;

        let target = decide_release(
            input.geometry,
            input.main_rect.origin,
            velocity,
            self.density,
            self.min_fling_velocity_dp,
        );
        let velocity = if self.edge.is_horizontal() {
            velocity.x
        } else {
            velocity.y
        };
        tracing::debug!(target: targets::DRAG, ?target, velocity, "main view released");
        DragOutcome::Released { target, velocity }
    }

    /// Start settling from `from` to `to`.
    ///
    /// Returns false, and starts nothing, if the two positions are equal.
    pub fn start_settle(
        &mut self,
        geometry: &RevealGeometry,
        from: Point,
        to: Point,
        velocity: f32,
    ) -> bool {
        self.captured = false;
        self.pending = None;
        if from == to {
            self.settle = None;
            return false;
        }

        let distance = self.edge.axis(to) - self.edge.axis(from);
        let duration = self
            .timing
            .duration_for(distance, geometry.extent(), velocity);
        tracing::trace!(
            target: targets::DRAG,
            distance,
            duration_ms = duration.as_millis() as u64,
            "settle started"
        );
        self.settle = Some(SettleAnimation::new(from, to, duration));
        true
    }

    /// Advance the running settle, if any.
    ///
    /// The animation is dropped once it reports `finished`.
    pub fn advance(&mut self, dt: Duration) -> Option<SettleStep> {
        let settle = self.settle.as_mut()?;
        let step = settle.step(dt);
        if step.finished {
            self.settle = None;
        }
        Some(step)
    }

    /// Stop whatever is in progress.
    ///
    /// Returns `None` if nothing was captured or settling.
    pub fn abort(&mut self) -> Option<Interrupted> {
        self.pending = None;
        self.last_position = None;
        if let Some(settle) = self.settle.take() {
            self.captured = false;
            return Some(Interrupted::Settle(settle.target()));
        }
        if self.captured {
            self.captured = false;
            return Some(Interrupted::Capture);
        }
        None
    }

    /// Drop any capture or settle without reporting anything.
    pub fn reset(&mut self) {
        self.captured = false;
        self.pending = None;
        self.last_position = None;
        self.settle = None;
    }
}

/// Pick the release target for a main view at `origin`.
///
/// `velocity` is in px/s. A fling along the opening direction at or above
/// `min_fling_velocity_dp` opens, one against it closes; anything slower
/// falls back to the halfway pivot.
pub(crate) fn decide_release(
    geometry: &RevealGeometry,
    origin: Point,
    velocity: Velocity,
    density: f32,
    min_fling_velocity_dp: f32,
) -> SnapTarget {
    let along = if geometry.edge.is_horizontal() {
        velocity.x
    } else {
        velocity.y
    };
    let opening_dp = along * geometry.edge.opening_sign() as f32 / density;

    if opening_dp >= min_fling_velocity_dp {
        SnapTarget::Open
    } else if opening_dp <= -min_fling_velocity_dp {
        SnapTarget::Close
    } else if geometry.is_past_pivot(origin) {
        SnapTarget::Open
    } else {
        SnapTarget::Close
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::geometry::RevealMode;

    const BOUNDS: Rect = Rect::new(0, 0, 300, 80);

    fn left_geometry() -> RevealGeometry {
        RevealGeometry::compute(
            DragEdge::Left,
            RevealMode::Normal,
            BOUNDS,
            Rect::new(0, 0, 100, 80),
        )
    }

    fn controller() -> DragController {
        DragController::new(
            DragEdge::Left,
            20,
            300.0,
            1.0,
            SettleTiming::from_millis(256, 600),
        )
    }

    fn input(geometry: &RevealGeometry, main_rect: Rect, drag_initiated: bool) -> DragInput<'_> {
        DragInput {
            geometry,
            main_rect,
            bounds: BOUNDS,
            drag_initiated,
        }
    }

    #[test]
    fn test_capture_after_slop_and_clamped_moves() {
        let geo = left_geometry();
        let mut drag = controller();

        let out = drag.process(&PointerEvent::down(150, 40), input(&geo, BOUNDS, false));
        assert_eq!(out, DragOutcome::Idle);

        let out = drag.process(&PointerEvent::moved(160, 40), input(&geo, BOUNDS, true));
        assert_eq!(out, DragOutcome::Captured);

        let out = drag.process(&PointerEvent::moved(190, 45), input(&geo, BOUNDS, true));
        assert_eq!(out, DragOutcome::Moved(Point::new(30, 0)));

        let moved = BOUNDS.with_origin(Point::new(30, 0));
        let out = drag.process(&PointerEvent::moved(400, 45), input(&geo, moved, true));
        assert_eq!(out, DragOutcome::Moved(Point::new(100, 0)));
    }

    #[test]
    fn test_locked_refuses_capture() {
        let geo = left_geometry();
        let mut drag = controller();
        drag.set_locked(true);

        drag.process(&PointerEvent::down(150, 40), input(&geo, BOUNDS, false));
        let out = drag.process(&PointerEvent::moved(200, 40), input(&geo, BOUNDS, true));
        assert_eq!(out, DragOutcome::Idle);
        assert!(!drag.is_captured());
    }

    #[test]
    fn test_lock_does_not_affect_ongoing_capture() {
        let geo = left_geometry();
        let mut drag = controller();

        drag.process(&PointerEvent::down(150, 40), input(&geo, BOUNDS, false));
        drag.process(&PointerEvent::moved(160, 40), input(&geo, BOUNDS, true));
        drag.set_locked(true);
        let out = drag.process(&PointerEvent::moved(170, 40), input(&geo, BOUNDS, true));
        assert_eq!(out, DragOutcome::Moved(Point::new(10, 0)));
    }

    #[test]
    fn test_edge_zone_capture_outside_main() {
        let geo = left_geometry();
        let mut drag = controller();
        // Main view already open; the left strip is outside it.
        let open = geo.main_open;

        drag.process(&PointerEvent::down(5, 40), input(&geo, open, false));
        let out = drag.process(&PointerEvent::moved(15, 40), input(&geo, open, true));
        assert_eq!(out, DragOutcome::Captured);
    }

    #[test]
    fn test_down_on_settling_view_captures() {
        let geo = left_geometry();
        let mut drag = controller();
        assert!(drag.start_settle(&geo, Point::ZERO, Point::new(100, 0), 0.0));
        drag.advance(Duration::from_millis(16));

        let out = drag.process(&PointerEvent::down(150, 40), input(&geo, BOUNDS, false));
        assert_eq!(out, DragOutcome::Captured);
        assert!(!drag.is_settling());
    }

    #[test]
    fn test_release_by_velocity() {
        let geo = left_geometry();
        let origin = Point::new(10, 0);
        assert_eq!(
            decide_release(&geo, origin, Velocity::new(350.0, 0.0), 1.0, 300.0),
            SnapTarget::Open
        );
        assert_eq!(
            decide_release(&geo, Point::new(90, 0), Velocity::new(-350.0, 0.0), 1.0, 300.0),
            SnapTarget::Close
        );
        // 350 px/s at density 2 is only 175 dp/s.
        assert_eq!(
            decide_release(&geo, origin, Velocity::new(350.0, 0.0), 2.0, 300.0),
            SnapTarget::Close
        );
    }

    #[test]
    fn test_release_by_position() {
        let geo = left_geometry();
        assert_eq!(
            decide_release(&geo, Point::new(49, 0), Velocity::ZERO, 1.0, 300.0),
            SnapTarget::Close
        );
        assert_eq!(
            decide_release(&geo, Point::new(50, 0), Velocity::ZERO, 1.0, 300.0),
            SnapTarget::Open
        );
    }

    #[test]
    fn test_cancel_releases_with_zero_velocity() {
        let geo = left_geometry();
        let mut drag = controller();
        drag.process(&PointerEvent::down(150, 40), input(&geo, BOUNDS, false));
        drag.process(&PointerEvent::moved(160, 40), input(&geo, BOUNDS, true));

        let dragged = BOUNDS.with_origin(Point::new(70, 0));
        let out = drag.process(&PointerEvent::Cancel, input(&geo, dragged, true));
        assert_eq!(
            out,
            DragOutcome::Released {
                target: SnapTarget::Open,
                velocity: 0.0
            }
        );
    }

    #[test]
    fn test_abort_reports_settle_target() {
        let geo = left_geometry();
        let mut drag = controller();
        assert_eq!(drag.abort(), None);

        drag.start_settle(&geo, Point::new(40, 0), Point::ZERO, 0.0);
        assert_eq!(drag.abort(), Some(Interrupted::Settle(Point::ZERO)));
        assert!(drag.is_idle());
    }

    #[test]
    fn test_settle_to_same_position_is_refused() {
        let geo = left_geometry();
        let mut drag = controller();
        assert!(!drag.start_settle(&geo, Point::ZERO, Point::ZERO, 0.0));
        assert!(drag.advance(Duration::from_millis(16)).is_none());
    }
}
