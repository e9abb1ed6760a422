//! The swipe-to-reveal container widget.
//!
//! This module provides [`SwipeRevealLayout`], a two-child container: a main
//! (front) view lying on top of a secondary (back) view. Dragging the main
//! view along the configured edge uncovers the secondary view; on release it
//! settles fully open or fully closed.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use swipe_reveal::{
//!     ChildSpec, DragEdge, MeasureSpec, PointerEvent, Rect, SwipeRevealConfig, SwipeRevealLayout,
//!     Velocity,
//! };
//!
//! let mut row = SwipeRevealLayout::new(SwipeRevealConfig::new().with_drag_edge(DragEdge::Right));
//! row.measure(
//!     &[ChildSpec::fixed(120, 72), ChildSpec::fill()],
//!     MeasureSpec::Exact(360),
//!     MeasureSpec::Exact(72),
//! )
//! .unwrap();
//! row.layout(Rect::new(0, 0, 360, 72)).unwrap();
//!
//! row.slide.connect(|event| println!("slide: {:?}", event));
//!
//! // Drag the main view left and let go.
//! row.handle_pointer(PointerEvent::down(300, 36));
//! row.handle_pointer(PointerEvent::moved(280, 36));
//! row.handle_pointer(PointerEvent::moved(200, 36));
//! row.handle_pointer(PointerEvent::up(200, 36, Velocity::ZERO));
//!
//! while row.advance_frame(Duration::from_millis(16)) {}
//! assert!(row.is_open());
//! ```

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use swipe_reveal_core::logging::targets;
use swipe_reveal_core::{Point, Rect, Signal, Size};

use super::drag::{DragController, DragInput, DragOutcome, Interrupted, SnapTarget};
use super::events::{PointerEvent, TouchResponse};
use super::gesture::{GestureContext, GestureInterpreter};
use super::geometry::{DragEdge, RevealGeometry, RevealMode};
use super::layout::{ChildSpec, LayoutEngine, MeasureSpec};
use super::state::{DragState, SlideEvent, StateMachine};
use crate::config::SwipeRevealConfig;
use crate::error::LayoutError;

/// A [`SwipeRevealLayout`] shared between the host and a
/// [`RowStateBinder`](crate::RowStateBinder).
pub type SharedLayout = Arc<Mutex<SwipeRevealLayout>>;

/// A container whose main view can be dragged aside to reveal a secondary
/// view.
///
/// # Children
///
/// Exactly two children are used: index 0 is the secondary view, index 1 the
/// main view. The host reports their sizes through [`measure`](Self::measure)
/// and reads their placement back from [`main_rect`](Self::main_rect) and
/// [`secondary_rect`](Self::secondary_rect).
///
/// # Driving the widget
///
/// - forward every pointer event to [`handle_pointer`](Self::handle_pointer)
///   and honor the returned [`TouchResponse`];
/// - while [`advance_frame`](Self::advance_frame) returns true, call it again
///   on the next frame;
/// - redraw whenever `repaint_requested` fires.
///
/// # Signals
///
/// - `slide(SlideEvent)`: emitted on every change of the main view position
/// - `repaint_requested(())`: emitted when the host should redraw
#[derive(Debug)]
pub struct SwipeRevealLayout {
    config: SwipeRevealConfig,

    layout: LayoutEngine,
    gesture: GestureInterpreter,
    drag: DragController,
    state: StateMachine,

    /// Bounds from the last layout pass.
    bounds: Rect,
    main_rect: Rect,
    secondary_rect: Rect,

    /// Whether the next layout pass places the main view open.
    open_requested: bool,

    /// Signal emitted when the main view moves.
    pub slide: Signal<SlideEvent>,

    /// Signal emitted when the widget needs to be redrawn.
    pub repaint_requested: Signal<()>,

    /// Drag state transitions, consumed by the row binder.
    pub(crate) drag_state_changed: Signal<DragState>,
}

impl SwipeRevealLayout {
    /// Create a new widget. Nothing can be dragged until the first layout.
    ///
    /// Out-of-range configuration values are replaced by their defaults
    /// with a warning; see [`SwipeRevealConfig::sanitized`].
    pub fn new(config: SwipeRevealConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(error) => {
                tracing::warn!(
                    target: targets::LAYOUT,
                    %error,
                    "invalid configuration, out-of-range values replaced by defaults"
                );
                config.sanitized()
            }
        };
        let edge = config.drag_edge;
        Self {
            layout: LayoutEngine::new(
                edge,
                config.mode,
                config.padding,
                config.debug.trace_geometry,
            ),
            gesture: GestureInterpreter::new(
                edge,
                config.touch_slop_px(),
                config.min_dist_request_disallow_parent_px(),
            ),
            drag: DragController::new(
                edge,
                config.edge_size_px(),
                config.min_fling_velocity_dp,
                config.density,
                config.settle_timing(),
            ),
            state: StateMachine::new(),
            bounds: Rect::ZERO,
            main_rect: Rect::ZERO,
            secondary_rect: Rect::ZERO,
            open_requested: false,
            slide: Signal::new(),
            repaint_requested: Signal::new(),
            drag_state_changed: Signal::new(),
            config,
        }
    }

    /// Create a new widget wrapped for sharing with a row binder.
    pub fn shared(config: SwipeRevealConfig) -> SharedLayout {
        Arc::new(Mutex::new(Self::new(config)))
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// The configuration this widget was built with.
    pub fn config(&self) -> &SwipeRevealConfig {
        &self.config
    }

    /// The edge the secondary view is revealed from.
    #[inline]
    pub fn drag_edge(&self) -> DragEdge {
        self.config.drag_edge
    }

    /// The reveal mode.
    #[inline]
    pub fn mode(&self) -> RevealMode {
        self.config.mode
    }

    /// Minimum fling velocity in dp/s.
    pub fn min_fling_velocity(&self) -> f32 {
        self.config.min_fling_velocity_dp
    }

    /// Set the minimum fling velocity in dp/s.
    pub fn set_min_fling_velocity(&mut self, dp_per_second: f32) {
        self.config.min_fling_velocity_dp = dp_per_second;
        self.drag.set_min_fling_velocity(dp_per_second);
    }

    /// Refuse (or allow again) new drags.
    ///
    /// A drag that is already in progress continues.
    pub fn set_drag_locked(&mut self, locked: bool) {
        self.drag.set_locked(locked);
    }

    /// Returns true if new drags are refused.
    pub fn is_drag_locked(&self) -> bool {
        self.drag.is_locked()
    }

    // =========================================================================
    // State
    // =========================================================================

    /// The current drag state.
    #[inline]
    pub fn state(&self) -> DragState {
        self.state.state()
    }

    /// Returns true if the widget rests fully open.
    pub fn is_open(&self) -> bool {
        self.state.state() == DragState::Open
    }

    /// Returns true if the widget rests fully closed.
    pub fn is_closed(&self) -> bool {
        self.state.state() == DragState::Close
    }

    /// Returns true while a settle animation is running.
    pub fn is_settling(&self) -> bool {
        self.drag.is_settling()
    }

    /// Current main view rectangle.
    #[inline]
    pub fn main_rect(&self) -> Rect {
        self.main_rect
    }

    /// Current secondary view rectangle.
    #[inline]
    pub fn secondary_rect(&self) -> Rect {
        self.secondary_rect
    }

    /// Geometry from the last layout pass.
    pub fn geometry(&self) -> Option<&RevealGeometry> {
        self.layout.geometry()
    }

    /// Fraction of the travel range currently uncovered.
    pub fn slide_offset(&self) -> f32 {
        match self.layout.geometry() {
            Some(geometry) => geometry.slide_offset(self.main_rect.origin),
            None if self.open_requested => 1.0,
            None => 0.0,
        }
    }

    // =========================================================================
    // Open / Close
    // =========================================================================

    /// Open the widget, animated or immediately.
    ///
    /// Before the first layout the request is remembered and applied by it.
    /// An immediate open does not emit a state transition.
    pub fn open(&mut self, animate: bool) {
        self.go_to(SnapTarget::Open, animate);
    }

    /// Close the widget, animated or immediately.
    ///
    /// Before the first layout the request is remembered and applied by it.
    /// An immediate close does not emit a state transition.
    pub fn close(&mut self, animate: bool) {
        self.go_to(SnapTarget::Close, animate);
    }

    fn go_to(&mut self, target: SnapTarget, animate: bool) {
        self.open_requested = target == SnapTarget::Open;
        self.state.clear_suppression();
        let (resting, moving) = match target {
            SnapTarget::Open => (DragState::Open, DragState::Opening),
            SnapTarget::Close => (DragState::Close, DragState::Closing),
        };

        let Some(geometry) = self.layout.geometry().copied() else {
            self.state.set_silently(resting);
            self.repaint_requested.emit(());
            return;
        };
        let destination = target.origin(&geometry);

        if animate {
            if self
                .drag
                .start_settle(&geometry, self.main_rect.origin, destination, 0.0)
            {
                self.notify_transition(moving);
            } else {
                self.notify_transition(resting);
            }
        } else {
            self.drag.reset();
            self.move_main(&geometry, destination);
            self.state.set_silently(resting);
        }
        self.repaint_requested.emit(());
    }

    /// Stop any drag or settle in progress.
    ///
    /// A running settle jumps to its target. The resulting state is decided
    /// by position and is not announced. Does nothing when idle.
    pub fn abort(&mut self) {
        let Some(geometry) = self.layout.geometry().copied() else {
            return;
        };
        let Some(interrupted) = self.drag.abort() else {
            return;
        };

        self.state.suppress_next();
        if let Interrupted::Settle(target) = interrupted {
            self.move_main(&geometry, target);
        }
        let resolved = StateMachine::resolve_idle(&geometry, self.main_rect.origin);
        self.open_requested = resolved == DragState::Open;
        tracing::debug!(target: targets::DRAG, ?interrupted, ?resolved, "gesture aborted");
        self.notify_transition(resolved);
    }

    // =========================================================================
    // Measure / Layout
    // =========================================================================

    /// Measure the container for the given children and constraints.
    ///
    /// # Errors
    ///
    /// Fails with [`LayoutError::MissingChildren`] when fewer than two
    /// children are supplied.
    pub fn measure(
        &mut self,
        children: &[ChildSpec],
        width: MeasureSpec,
        height: MeasureSpec,
    ) -> Result<Size, LayoutError> {
        self.layout.measure(children, width, height)
    }

    /// Size from the last successful measure.
    pub fn measured_size(&self) -> Option<Size> {
        self.layout.measured_size()
    }

    /// Place the children inside `bounds`.
    ///
    /// Any drag or settle in progress is dropped and the main view is put at
    /// its open or closed position according to the last request.
    ///
    /// # Errors
    ///
    /// Fails with [`LayoutError::NotMeasured`] before the first measure.
    #[tracing::instrument(skip(self), target = "swipe_reveal::layout", level = "trace")]
    pub fn layout(&mut self, bounds: Rect) -> Result<(), LayoutError> {
        let geometry = self.layout.layout(bounds)?;

        self.bounds = bounds;
        self.drag.reset();
        self.state.clear_suppression();

        let (target, resting) = if self.open_requested {
            (SnapTarget::Open, DragState::Open)
        } else {
            (SnapTarget::Close, DragState::Close)
        };
        self.main_rect = geometry.main_closed.with_origin(target.origin(&geometry));
        self.secondary_rect = geometry.secondary_rect_for(self.main_rect.origin);
        self.state.set_silently(resting);
        Ok(())
    }

    /// Force the next layout pass to recompute the geometry.
    pub fn invalidate_geometry(&mut self) {
        self.layout.invalidate();
    }

    /// Returns true until the widget has been laid out twice.
    pub fn needs_layout(&self) -> bool {
        self.layout.needs_layout()
    }

    /// Number of layout passes so far.
    pub fn layout_pass_count(&self) -> u32 {
        self.layout.pass_count()
    }

    // =========================================================================
    // Event Handling
    // =========================================================================

    /// Process one pointer event.
    ///
    /// Every event must be forwarded, including those the host decides to
    /// deliver to the main view's content.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> TouchResponse {
        let Some(geometry) = self.layout.geometry().copied() else {
            tracing::trace!(target: targets::GESTURE, ?event, "pointer event before layout ignored");
            return TouchResponse::default();
        };

        self.gesture.track(&event, self.main_rect);
        let outcome = self.drag.process(
            &event,
            DragInput {
                geometry: &geometry,
                main_rect: self.main_rect,
                bounds: self.bounds,
                drag_initiated: self.gesture.drag_initiated(),
            },
        );

        match outcome {
            DragOutcome::Idle => {}
            DragOutcome::Captured => {
                self.state.clear_suppression();
                self.notify_transition(DragState::Dragging);
            }
            DragOutcome::Moved(origin) => self.move_main(&geometry, origin),
            DragOutcome::Released { target, velocity } => {
                self.settle_release(&geometry, target, velocity);
            }
        }

        let response = self.gesture.classify(
            &event,
            GestureContext {
                main_rect: self.main_rect,
                dist_to_closest_edge: geometry.dist_to_closest_edge(self.main_rect.origin),
                settling: self.drag.is_settling(),
                idle: self.drag.is_idle(),
            },
        );

        if self.config.debug.trace_pointer_events {
            tracing::debug!(
                target: targets::GESTURE,
                ?event,
                ?outcome,
                ?response,
                state = ?self.state.state(),
                "pointer event"
            );
        }
        response
    }

    /// Advance a running settle by `dt`.
    ///
    /// Returns true if another frame is needed.
    pub fn advance_frame(&mut self, dt: Duration) -> bool {
        let Some(geometry) = self.layout.geometry().copied() else {
            return false;
        };
        let Some(step) = self.drag.advance(dt) else {
            return false;
        };

        self.move_main(&geometry, step.position);
        if step.finished {
            let resolved = StateMachine::resolve_idle(&geometry, self.main_rect.origin);
            self.notify_transition(resolved);
            return false;
        }
        true
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// The state stays `Dragging` until the settle finishes in
    /// `advance_frame`, which resolves `Open` or `Close`.
    fn settle_release(&mut self, geometry: &RevealGeometry, target: SnapTarget, velocity: f32) {
        self.open_requested = target == SnapTarget::Open;
        let destination = target.origin(geometry);
        if !self
            .drag
            .start_settle(geometry, self.main_rect.origin, destination, velocity)
        {
            self.notify_transition(StateMachine::resolve_idle(geometry, self.main_rect.origin));
        }
    }

    fn move_main(&mut self, geometry: &RevealGeometry, origin: Point) {
        if origin == self.main_rect.origin {
            return;
        }
        self.main_rect = self.main_rect.with_origin(origin);
        self.secondary_rect = geometry.secondary_rect_for(origin);
        self.slide.emit(SlideEvent::at(geometry, origin));
        self.repaint_requested.emit(());
    }

    fn notify_transition(&mut self, next: DragState) {
        if let Some(state) = self.state.transition(next) {
            self.drag_state_changed.emit(state);
        }
    }
}

static_assertions::assert_impl_all!(SwipeRevealLayout: Send, Sync);
