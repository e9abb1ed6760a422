//! Reveal geometry: where the main and secondary views sit when open or
//! closed, and the arithmetic derived from those positions.

use serde::{Deserialize, Serialize};
use swipe_reveal_core::{Point, Rect};

/// The side of the row from which the secondary view is revealed.
///
/// A `Left` edge means the secondary view lies along the left side and the
/// main view slides right to uncover it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragEdge {
    #[default]
    Left,
    Right,
    Top,
    Bottom,
}

impl DragEdge {
    /// Returns true for `Left` and `Right`.
    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, DragEdge::Left | DragEdge::Right)
    }

    /// Sign of the main view's movement when opening: `+1` for `Left`/`Top`,
    /// `-1` for `Right`/`Bottom`.
    #[inline]
    pub fn opening_sign(self) -> i32 {
        match self {
            DragEdge::Left | DragEdge::Top => 1,
            DragEdge::Right | DragEdge::Bottom => -1,
        }
    }

    /// The component of `point` along this edge's drag axis.
    #[inline]
    pub fn axis(self, point: Point) -> i32 {
        if self.is_horizontal() { point.x } else { point.y }
    }

    /// A point that moves `amount` pixels along the drag axis.
    #[inline]
    pub fn axis_offset(self, amount: i32) -> Point {
        if self.is_horizontal() {
            Point::new(amount, 0)
        } else {
            Point::new(0, amount)
        }
    }

    /// The trigger strip of `size` pixels running along this edge of `bounds`.
    pub fn edge_zone(self, bounds: Rect, size: i32) -> Rect {
        let size = size.max(0);
        match self {
            DragEdge::Left => Rect::new(bounds.left(), bounds.top(), size, bounds.height()),
            DragEdge::Right => {
                Rect::new(bounds.right() - size, bounds.top(), size, bounds.height())
            }
            DragEdge::Top => Rect::new(bounds.left(), bounds.top(), bounds.width(), size),
            DragEdge::Bottom => {
                Rect::new(bounds.left(), bounds.bottom() - size, bounds.width(), size)
            }
        }
    }
}

/// How the secondary view behaves while the main view moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealMode {
    /// The secondary view stays fixed underneath the main view.
    #[default]
    Normal,
    /// The secondary view sits beside the main view and travels with it.
    SameLevel,
}

/// The open and closed rectangles of both children.
///
/// Computed once per layout pass and frozen until the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealGeometry {
    pub edge: DragEdge,
    pub mode: RevealMode,
    pub main_closed: Rect,
    pub main_open: Rect,
    pub secondary_closed: Rect,
    pub secondary_open: Rect,
}

impl RevealGeometry {
    /// Derive the open rectangles from the closed placement of both children.
    pub fn compute(
        edge: DragEdge,
        mode: RevealMode,
        main_closed: Rect,
        secondary_closed: Rect,
    ) -> Self {
        let extent = Self::extent_of(edge, secondary_closed);
        let shift = edge.axis_offset(edge.opening_sign() * extent);

        let main_open = main_closed.translated(shift.x, shift.y);
        let secondary_open = match mode {
            RevealMode::Normal => secondary_closed,
            RevealMode::SameLevel => secondary_closed.translated(shift.x, shift.y),
        };

        Self {
            edge,
            mode,
            main_closed,
            main_open,
            secondary_closed,
            secondary_open,
        }
    }

    fn extent_of(edge: DragEdge, secondary: Rect) -> i32 {
        if edge.is_horizontal() {
            secondary.width()
        } else {
            secondary.height()
        }
    }

    /// Length of the travel range: the secondary view's width or height.
    #[inline]
    pub fn extent(&self) -> i32 {
        Self::extent_of(self.edge, self.secondary_closed)
    }

    /// Axis coordinate of the main view when closed.
    #[inline]
    pub fn closed_position(&self) -> i32 {
        self.edge.axis(self.main_closed.origin)
    }

    /// Axis coordinate of the main view when open.
    #[inline]
    pub fn open_position(&self) -> i32 {
        self.edge.axis(self.main_open.origin)
    }

    /// How far `origin` has travelled from closed towards open, in pixels.
    ///
    /// Negative when the origin lies behind the closed position.
    #[inline]
    pub fn displacement(&self, origin: Point) -> i32 {
        (self.edge.axis(origin) - self.closed_position()) * self.edge.opening_sign()
    }

    /// Axis coordinate halfway between closed and open.
    pub fn halfway_pivot(&self) -> i32 {
        self.closed_position() + self.edge.opening_sign() * (self.extent() / 2)
    }

    /// Returns true if `origin` is at or beyond the halfway pivot.
    ///
    /// A release exactly on the pivot opens, for every edge.
    pub fn is_past_pivot(&self, origin: Point) -> bool {
        self.displacement(origin) >= self.extent() / 2
    }

    /// Clamp a proposed main view origin into the travel range.
    ///
    /// The cross-axis coordinate is pinned to the closed position.
    pub fn clamp_main(&self, proposed: Point) -> Point {
        let closed = self.main_closed.origin;
        let (low, high) = {
            let (a, b) = (self.closed_position(), self.open_position());
            (a.min(b), a.max(b))
        };
        let along = self.edge.axis(proposed).clamp(low, high);
        if self.edge.is_horizontal() {
            Point::new(along, closed.y)
        } else {
            Point::new(closed.x, along)
        }
    }

    /// Fraction of the travel range covered at `origin`, in `0.0..=1.0`.
    pub fn slide_offset(&self, origin: Point) -> f32 {
        let extent = self.extent();
        if extent <= 0 {
            return 0.0;
        }
        (self.displacement(origin) as f32 / extent as f32).clamp(0.0, 1.0)
    }

    /// Distance from `origin` to the nearer end of the travel range.
    pub fn dist_to_closest_edge(&self, origin: Point) -> i32 {
        let extent = self.extent().max(0);
        let travelled = self.displacement(origin).clamp(0, extent);
        travelled.min(extent - travelled)
    }

    /// Where the secondary view sits when the main view's origin is `origin`.
    pub fn secondary_rect_for(&self, origin: Point) -> Rect {
        match self.mode {
            RevealMode::Normal => self.secondary_closed,
            RevealMode::SameLevel => {
                let dx = origin.x - self.main_closed.origin.x;
                let dy = origin.y - self.main_closed.origin.y;
                self.secondary_closed.translated(dx, dy)
            }
        }
    }

    /// Returns true if `origin` is exactly the closed position.
    #[inline]
    pub fn is_closed_at(&self, origin: Point) -> bool {
        origin == self.main_closed.origin
    }

    /// Returns true if `origin` is exactly the open position.
    #[inline]
    pub fn is_open_at(&self, origin: Point) -> bool {
        origin == self.main_open.origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAIN: Rect = Rect::new(0, 0, 300, 80);

    fn geometry(edge: DragEdge, mode: RevealMode) -> RevealGeometry {
        let secondary = match edge {
            DragEdge::Left => Rect::new(0, 0, 100, 80),
            DragEdge::Right => Rect::new(200, 0, 100, 80),
            DragEdge::Top => Rect::new(0, 0, 300, 40),
            DragEdge::Bottom => Rect::new(0, 40, 300, 40),
        };
        RevealGeometry::compute(edge, mode, MAIN, secondary)
    }

    #[test]
    fn test_open_rect_offsets() {
        assert_eq!(
            geometry(DragEdge::Left, RevealMode::Normal).main_open,
            Rect::new(100, 0, 300, 80)
        );
        assert_eq!(
            geometry(DragEdge::Right, RevealMode::Normal).main_open,
            Rect::new(-100, 0, 300, 80)
        );
        assert_eq!(
            geometry(DragEdge::Top, RevealMode::Normal).main_open,
            Rect::new(0, 40, 300, 80)
        );
        assert_eq!(
            geometry(DragEdge::Bottom, RevealMode::Normal).main_open,
            Rect::new(0, -40, 300, 80)
        );
    }

    #[test]
    fn test_secondary_open_by_mode() {
        let normal = geometry(DragEdge::Right, RevealMode::Normal);
        assert_eq!(normal.secondary_open, normal.secondary_closed);

        let same_level = geometry(DragEdge::Right, RevealMode::SameLevel);
        assert_eq!(same_level.secondary_open, Rect::new(100, 0, 100, 80));
    }

    #[test]
    fn test_clamp_pins_cross_axis() {
        let geo = geometry(DragEdge::Left, RevealMode::Normal);
        assert_eq!(geo.clamp_main(Point::new(500, 17)), Point::new(100, 0));
        assert_eq!(geo.clamp_main(Point::new(-30, -4)), Point::new(0, 0));
        assert_eq!(geo.clamp_main(Point::new(42, 9)), Point::new(42, 0));

        let geo = geometry(DragEdge::Bottom, RevealMode::Normal);
        assert_eq!(geo.clamp_main(Point::new(12, -100)), Point::new(0, -40));
        assert_eq!(geo.clamp_main(Point::new(12, 5)), Point::new(0, 0));
    }

    #[test]
    fn test_slide_offset_and_distance() {
        let geo = geometry(DragEdge::Right, RevealMode::Normal);
        assert_eq!(geo.slide_offset(Point::new(0, 0)), 0.0);
        assert_eq!(geo.slide_offset(Point::new(-25, 0)), 0.25);
        assert_eq!(geo.slide_offset(Point::new(-100, 0)), 1.0);
        assert_eq!(geo.dist_to_closest_edge(Point::new(-25, 0)), 25);
        assert_eq!(geo.dist_to_closest_edge(Point::new(-90, 0)), 10);
    }

    #[test]
    fn test_pivot_tie_breaks_to_open() {
        for edge in [DragEdge::Left, DragEdge::Right, DragEdge::Top, DragEdge::Bottom] {
            let geo = geometry(edge, RevealMode::Normal);
            let half = geo.extent() / 2;
            let at_pivot = edge.axis_offset(edge.opening_sign() * half);
            assert_eq!(edge.axis(at_pivot), geo.halfway_pivot());
            assert!(geo.is_past_pivot(at_pivot), "{edge:?}");

            let short = edge.axis_offset(edge.opening_sign() * (half - 1));
            assert!(!geo.is_past_pivot(short), "{edge:?}");
        }
    }

    #[test]
    fn test_same_level_secondary_follows_main() {
        let geo = geometry(DragEdge::Left, RevealMode::SameLevel);
        assert_eq!(geo.secondary_closed, Rect::new(0, 0, 100, 80));
        assert_eq!(geo.secondary_rect_for(Point::new(30, 0)), Rect::new(30, 0, 100, 80));
    }

    #[test]
    fn test_edge_zone() {
        let bounds = Rect::new(10, 20, 300, 80);
        assert_eq!(DragEdge::Left.edge_zone(bounds, 20), Rect::new(10, 20, 20, 80));
        assert_eq!(DragEdge::Right.edge_zone(bounds, 20), Rect::new(290, 20, 20, 80));
        assert_eq!(DragEdge::Bottom.edge_zone(bounds, 20), Rect::new(10, 80, 300, 20));
    }
}
