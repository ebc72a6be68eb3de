//! Floating-edge attachment geometry.
//!
//! A floating edge is not bound to a fixed handle on its nodes. Instead each
//! end attaches to the side of its node that faces the other node: the
//! left/right sides when the nodes are further apart horizontally than
//! vertically, the top/bottom sides otherwise.
//!
//! Everything here works on plain [`Bounds`], so it can be used before any
//! rendering happens and tested in isolation.

use std::fmt;

use crate::geometry::{Bounds, Point};

/// The side of a node rectangle an edge is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    /// Returns true for [`Side::Left`] and [`Side::Right`].
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        };
        f.write_str(name)
    }
}

/// Everything needed to draw a connector between two nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeParams {
    source: Point,
    target: Point,
    source_side: Side,
    target_side: Side,
}

impl EdgeParams {
    /// Attachment point on the source node.
    pub fn source(&self) -> Point {
        self.source
    }

    /// Attachment point on the target node.
    pub fn target(&self) -> Point {
        self.target
    }

    /// Side of the source node the edge leaves from.
    pub fn source_side(&self) -> Side {
        self.source_side
    }

    /// Side of the target node the edge arrives at.
    pub fn target_side(&self) -> Side {
        self.target_side
    }
}

/// Picks the side of `node` that faces `other`.
///
/// Horizontal distance between the centers must strictly exceed the vertical
/// distance for a left/right side to be chosen; ties go to top/bottom.
pub fn attachment_side(node: Bounds, other: Bounds) -> Side {
    let center = node.center();
    let other_center = other.center();

    let horizontal_diff = (center.x() - other_center.x()).abs();
    let vertical_diff = (center.y() - other_center.y()).abs();

    if horizontal_diff > vertical_diff {
        if center.x() > other_center.x() {
            Side::Left
        } else {
            Side::Right
        }
    } else if center.y() > other_center.y() {
        Side::Top
    } else {
        Side::Bottom
    }
}

/// Returns the connection point in the middle of the given side.
///
/// The point always lies on the perimeter of `node`.
pub fn attachment_point(node: Bounds, side: Side) -> Point {
    let center = node.center();
    match side {
        Side::Left => center.with_x(node.min_x()),
        Side::Right => center.with_x(node.max_x()),
        Side::Top => center.with_y(node.min_y()),
        Side::Bottom => center.with_y(node.max_y()),
    }
}

/// Computes attachment points and sides for an edge from `source` to `target`.
///
/// # Examples
///
/// ```
/// # use c4view_core::floating::{floating_edge, Side};
/// # use c4view_core::geometry::{Bounds, Point, Size};
/// let size = Size::new(200.0, 100.0);
/// let source = Bounds::new_from_top_left(Point::new(0.0, 0.0), size);
/// let target = Bounds::new_from_top_left(Point::new(400.0, 0.0), size);
///
/// let params = floating_edge(source, target);
/// assert_eq!(params.source_side(), Side::Right);
/// assert_eq!(params.target_side(), Side::Left);
/// assert_eq!(params.source(), Point::new(200.0, 50.0));
/// assert_eq!(params.target(), Point::new(400.0, 50.0));
/// ```
pub fn floating_edge(source: Bounds, target: Bounds) -> EdgeParams {
    let source_side = attachment_side(source, target);
    let target_side = attachment_side(target, source);

    EdgeParams {
        source: attachment_point(source, source_side),
        target: attachment_point(target, target_side),
        source_side,
        target_side,
    }
}

/// Like [`floating_edge`], but for nodes whose geometry may not be known yet.
///
/// Returns `None` when either node has not been measured, which callers treat
/// as "nothing to draw yet" rather than as an error.
pub fn floating_edge_between(source: Option<Bounds>, target: Option<Bounds>) -> Option<EdgeParams> {
    Some(floating_edge(source?, target?))
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::geometry::Size;

    fn node_at(x: f32, y: f32) -> Bounds {
        Bounds::new_from_top_left(Point::new(x, y), Size::new(200.0, 100.0))
    }

    #[test]
    fn test_side_for_horizontal_neighbours() {
        let left = node_at(0.0, 0.0);
        let right = node_at(500.0, 40.0);

        assert_eq!(attachment_side(left, right), Side::Right);
        assert_eq!(attachment_side(right, left), Side::Left);
    }

    #[test]
    fn test_side_for_vertical_neighbours() {
        let top = node_at(0.0, 0.0);
        let bottom = node_at(60.0, 300.0);

        assert_eq!(attachment_side(top, bottom), Side::Bottom);
        assert_eq!(attachment_side(bottom, top), Side::Top);
    }

    #[test]
    fn test_equal_distance_prefers_vertical_sides() {
        let a = node_at(0.0, 0.0);
        let b = node_at(100.0, 100.0);

        assert_eq!(attachment_side(a, b), Side::Bottom);
        assert_eq!(attachment_side(b, a), Side::Top);
    }

    #[test]
    fn test_coincident_nodes_attach_to_bottom() {
        let a = node_at(10.0, 10.0);
        assert_eq!(attachment_side(a, a), Side::Bottom);
    }

    #[test]
    fn test_attachment_points_are_side_midpoints() {
        let node = node_at(100.0, 50.0);

        assert_eq!(attachment_point(node, Side::Left), Point::new(100.0, 100.0));
        assert_eq!(attachment_point(node, Side::Right), Point::new(300.0, 100.0));
        assert_eq!(attachment_point(node, Side::Top), Point::new(200.0, 50.0));
        assert_eq!(attachment_point(node, Side::Bottom), Point::new(200.0, 150.0));
    }

    #[test]
    fn test_floating_edge_vertical() {
        let params = floating_edge(node_at(0.0, 0.0), node_at(0.0, 300.0));

        assert_eq!(params.source_side(), Side::Bottom);
        assert_eq!(params.target_side(), Side::Top);
        assert_approx_eq!(f32, params.source().y(), 100.0);
        assert_approx_eq!(f32, params.target().y(), 300.0);
        assert_approx_eq!(f32, params.source().x(), params.target().x());
    }

    #[test]
    fn test_floating_edge_between_missing_geometry() {
        let node = node_at(0.0, 0.0);

        assert!(floating_edge_between(None, Some(node)).is_none());
        assert!(floating_edge_between(Some(node), None).is_none());
        assert!(floating_edge_between(None, None).is_none());
        assert!(floating_edge_between(Some(node), Some(node_at(0.0, 400.0))).is_some());
    }

    #[test]
    fn test_side_display() {
        assert_eq!(Side::Left.to_string(), "left");
        assert!(Side::Right.is_horizontal());
        assert!(!Side::Top.is_horizontal());
    }
}
