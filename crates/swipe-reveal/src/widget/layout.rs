//! Measurement and child placement.
//!
//! The container has exactly two meaningful children: the secondary view
//! (index 0) and the main view (index 1). Measurement sizes the container to
//! fit the larger child plus padding. Layout places both children flush
//! against the configured drag edge and derives the [`RevealGeometry`].

use swipe_reveal_core::logging::targets;
use swipe_reveal_core::{Insets, Rect, Size};

use super::geometry::{DragEdge, RevealGeometry, RevealMode};
use crate::error::LayoutError;

/// Number of layout passes after which the geometry is considered settled.
const SETTLED_LAYOUT_PASSES: u32 = 2;

/// A size constraint from the parent for one dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeasureSpec {
    /// The container must be exactly this size.
    Exact(i32),
    /// The container may be at most this size.
    AtMost(i32),
    /// No constraint.
    #[default]
    Unspecified,
}

impl MeasureSpec {
    /// Resolve a desired size against this constraint.
    pub fn resolve(self, desired: i32) -> i32 {
        match self {
            MeasureSpec::Exact(size) => size,
            MeasureSpec::AtMost(limit) => desired.min(limit),
            MeasureSpec::Unspecified => desired,
        }
    }
}

/// A child's measured size and whether it wants to fill the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChildSpec {
    /// The child's own desired size.
    pub measured: Size,
    /// Take the container's full inner width.
    pub fill_width: bool,
    /// Take the container's full inner height.
    pub fill_height: bool,
}

impl ChildSpec {
    /// A child with a fixed size.
    pub fn fixed(width: i32, height: i32) -> Self {
        Self {
            measured: Size::new(width, height),
            fill_width: false,
            fill_height: false,
        }
    }

    /// A child that fills the container in both directions.
    pub fn fill() -> Self {
        Self {
            measured: Size::ZERO,
            fill_width: true,
            fill_height: true,
        }
    }

    /// Fill the container's width using builder pattern.
    pub fn with_fill_width(mut self) -> Self {
        self.fill_width = true;
        self
    }

    /// Fill the container's height using builder pattern.
    pub fn with_fill_height(mut self) -> Self {
        self.fill_height = true;
        self
    }
}

/// Inputs a geometry was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LayoutInputs {
    bounds: Rect,
    secondary: ChildSpec,
    main: ChildSpec,
}

#[derive(Debug, Clone)]
pub(crate) struct LayoutEngine {
    edge: DragEdge,
    mode: RevealMode,
    padding: Insets,
    trace_geometry: bool,

    children: Option<(ChildSpec, ChildSpec)>,
    measured_size: Option<Size>,
    inputs: Option<LayoutInputs>,
    geometry: Option<RevealGeometry>,
    pass_count: u32,
}

impl LayoutEngine {
    pub fn new(edge: DragEdge, mode: RevealMode, padding: Insets, trace_geometry: bool) -> Self {
        Self {
            edge,
            mode,
            padding,
            trace_geometry,
            children: None,
            measured_size: None,
            inputs: None,
            geometry: None,
            pass_count: 0,
        }
    }

    /// Record the children and compute the container's size.
    pub fn measure(
        &mut self,
        children: &[ChildSpec],
        width: MeasureSpec,
        height: MeasureSpec,
    ) -> Result<Size, LayoutError> {
        let [secondary, main, rest @ ..] = children else {
            return Err(LayoutError::MissingChildren {
                found: children.len(),
            });
        };
        if !rest.is_empty() {
            tracing::warn!(
                target: targets::LAYOUT,
                extra = rest.len(),
                "ignoring children beyond the secondary and main views"
            );
        }

        let desired_width = secondary.measured.width.max(main.measured.width)
            + self.padding.horizontal();
        let desired_height = secondary.measured.height.max(main.measured.height)
            + self.padding.vertical();
        let size = Size::new(
            width.resolve(desired_width).max(0),
            height.resolve(desired_height).max(0),
        );

        self.children = Some((*secondary, *main));
        self.measured_size = Some(size);
        tracing::trace!(
            target: targets::LAYOUT,
            width = size.width,
            height = size.height,
            "measured"
        );
        Ok(size)
    }

    /// Size from the last `measure`.
    pub fn measured_size(&self) -> Option<Size> {
        self.measured_size
    }

    /// Place the children inside `bounds`.
    ///
    /// The geometry is recomputed only if `bounds` or the children changed
    /// since the last pass, or after [`invalidate`](Self::invalidate).
    pub fn layout(&mut self, bounds: Rect) -> Result<RevealGeometry, LayoutError> {
        let (secondary, main) = self.children.ok_or(LayoutError::NotMeasured)?;
        let inputs = LayoutInputs {
            bounds,
            secondary,
            main,
        };
        self.pass_count = self.pass_count.saturating_add(1);

        if self.inputs == Some(inputs)
            && let Some(geometry) = self.geometry
        {
            return Ok(geometry);
        }

        let (secondary_closed, main_closed) =
            place_children(self.edge, self.mode, self.padding, bounds, &secondary, &main);
        let geometry = RevealGeometry::compute(self.edge, self.mode, main_closed, secondary_closed);

        if self.trace_geometry {
            tracing::debug!(
                target: targets::LAYOUT,
                ?bounds,
                main_closed = ?geometry.main_closed,
                main_open = ?geometry.main_open,
                secondary_closed = ?geometry.secondary_closed,
                secondary_open = ?geometry.secondary_open,
                "geometry computed"
            );
        }

        self.inputs = Some(inputs);
        self.geometry = Some(geometry);
        Ok(geometry)
    }

    /// The geometry from the last layout pass.
    #[inline]
    pub fn geometry(&self) -> Option<&RevealGeometry> {
        self.geometry.as_ref()
    }

    /// Force the next layout pass to recompute the geometry.
    pub fn invalidate(&mut self) {
        self.inputs = None;
    }

    /// Returns true until two layout passes have completed.
    pub fn needs_layout(&self) -> bool {
        self.pass_count < SETTLED_LAYOUT_PASSES
    }

    #[inline]
    pub fn pass_count(&self) -> u32 {
        self.pass_count
    }
}

/// Closed placement of (secondary, main) inside `bounds`.
///
/// Both children are pushed flush against the drag edge and clamped to the
/// padded content area. In [`RevealMode::SameLevel`] the secondary view is
/// then moved out past the drag edge by its own extent.
pub(crate) fn place_children(
    edge: DragEdge,
    mode: RevealMode,
    padding: Insets,
    bounds: Rect,
    secondary: &ChildSpec,
    main: &ChildSpec,
) -> (Rect, Rect) {
    let width = bounds.width();
    let height = bounds.height();

    let min_left = padding.left;
    let max_right = (width - padding.right).max(0);
    let min_top = padding.top;
    let max_bottom = (height - padding.bottom).max(0);

    let place = |child: &ChildSpec| -> Rect {
        let child_width = if child.fill_width {
            max_right - min_left
        } else {
            child.measured.width
        };
        let child_height = if child.fill_height {
            max_bottom - min_top
        } else {
            child.measured.height
        };

        let (left, right) = match edge {
            DragEdge::Right => (
                (width - child_width - padding.right).max(min_left),
                (width - padding.right).max(min_left),
            ),
            DragEdge::Left | DragEdge::Top | DragEdge::Bottom => (
                padding.left.min(max_right),
                (child_width + padding.left).min(max_right),
            ),
        };
        let (top, bottom) = match edge {
            DragEdge::Bottom => (
                (height - child_height - padding.bottom).max(min_top),
                (height - padding.bottom).max(min_top),
            ),
            DragEdge::Left | DragEdge::Right | DragEdge::Top => (
                padding.top.min(max_bottom),
                (child_height + padding.top).min(max_bottom),
            ),
        };

        Rect::from_ltrb(left, top, right, bottom).translated(bounds.left(), bounds.top())
    };

    let mut secondary_rect = place(secondary);
    let main_rect = place(main);

    if mode == RevealMode::SameLevel {
        let (dx, dy) = match edge {
            DragEdge::Left => (-secondary_rect.width(), 0),
            DragEdge::Right => (secondary_rect.width(), 0),
            DragEdge::Top => (0, -secondary_rect.height()),
            DragEdge::Bottom => (0, secondary_rect.height()),
        };
        secondary_rect = secondary_rect.translated(dx, dy);
    }

    (secondary_rect, main_rect)
}
