//! Side-aware bezier connectors.
//!
//! Given the output of [`floating_edge`](crate::floating::floating_edge), a
//! [`BezierPath`] bends the connector so it leaves and enters each node
//! perpendicular to the attached side.

use crate::{
    floating::{EdgeParams, Side},
    geometry::Point,
};

/// Curvature used when the caller does not pick one.
pub const DEFAULT_CURVATURE: f32 = 0.25;

/// A cubic bezier between two attachment points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BezierPath {
    source: Point,
    source_control: Point,
    target_control: Point,
    target: Point,
}

impl BezierPath {
    /// Builds the curve for the given edge parameters.
    pub fn new(params: &EdgeParams, curvature: f32) -> Self {
        let source_control = control_point(
            params.source_side(),
            params.source(),
            params.target(),
            curvature,
        );
        let target_control = control_point(
            params.target_side(),
            params.target(),
            params.source(),
            curvature,
        );

        Self {
            source: params.source(),
            source_control,
            target_control,
            target: params.target(),
        }
    }

    /// Returns the start point of the curve
    pub fn source(&self) -> Point {
        self.source
    }

    /// Returns the end point of the curve
    pub fn target(&self) -> Point {
        self.target
    }

    /// Returns the control point next to the source
    pub fn source_control(&self) -> Point {
        self.source_control
    }

    /// Returns the control point next to the target
    pub fn target_control(&self) -> Point {
        self.target_control
    }

    /// The point on the curve at `t = 0.5`, used to anchor the edge label.
    pub fn label_anchor(&self) -> Point {
        let ends = self.source.add_point(self.target).scale(0.125);
        let controls = self
            .source_control
            .add_point(self.target_control)
            .scale(0.375);
        ends.add_point(controls)
    }

    /// SVG path data for this curve.
    pub fn to_path_data(&self) -> String {
        format!(
            "M {},{} C {},{} {},{} {},{}",
            self.source.x(),
            self.source.y(),
            self.source_control.x(),
            self.source_control.y(),
            self.target_control.x(),
            self.target_control.y(),
            self.target.x(),
            self.target.y()
        )
    }
}

/// How far a control point is pushed out from its side.
///
/// When the other end lies in the direction the side faces, the offset is
/// half the distance. Otherwise the curve has to loop back, so the offset
/// grows with the square root of the overshoot.
fn control_offset(distance: f32, curvature: f32) -> f32 {
    if distance >= 0.0 {
        0.5 * distance
    } else {
        curvature * 25.0 * (-distance).sqrt()
    }
}

fn control_point(side: Side, from: Point, to: Point, curvature: f32) -> Point {
    match side {
        Side::Left => from.with_x(from.x() - control_offset(from.x() - to.x(), curvature)),
        Side::Right => from.with_x(from.x() + control_offset(to.x() - from.x(), curvature)),
        Side::Top => from.with_y(from.y() - control_offset(from.y() - to.y(), curvature)),
        Side::Bottom => from.with_y(from.y() + control_offset(to.y() - from.y(), curvature)),
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::{
        floating::floating_edge,
        geometry::{Bounds, Size},
    };

    fn node_at(x: f32, y: f32) -> Bounds {
        Bounds::new_from_top_left(Point::new(x, y), Size::new(200.0, 100.0))
    }

    #[test]
    fn test_vertical_edge_controls() {
        let params = floating_edge(node_at(0.0, 0.0), node_at(0.0, 300.0));
        let path = BezierPath::new(&params, DEFAULT_CURVATURE);

        // source bottom at y=100, target top at y=300
        assert_approx_eq!(f32, path.source_control().y(), 200.0);
        assert_approx_eq!(f32, path.target_control().y(), 200.0);
        assert_approx_eq!(f32, path.source_control().x(), 100.0);
    }

    #[test]
    fn test_label_anchor_on_straight_edge_is_midpoint() {
        let params = floating_edge(node_at(0.0, 0.0), node_at(400.0, 0.0));
        let path = BezierPath::new(&params, DEFAULT_CURVATURE);
        let anchor = path.label_anchor();

        assert_approx_eq!(f32, anchor.x(), 300.0);
        assert_approx_eq!(f32, anchor.y(), 50.0);
    }

    #[test]
    fn test_control_offset_when_looping_back() {
        assert_approx_eq!(f32, control_offset(100.0, 0.25), 50.0);
        assert_approx_eq!(f32, control_offset(-100.0, 0.25), 62.5);
        assert_approx_eq!(f32, control_offset(0.0, 0.25), 0.0);
    }

    #[test]
    fn test_path_data_format() {
        let params = floating_edge(node_at(0.0, 0.0), node_at(400.0, 0.0));
        let path = BezierPath::new(&params, DEFAULT_CURVATURE);

        assert_eq!(path.to_path_data(), "M 200,50 C 300,50 300,50 400,50");
        assert_eq!(path.source(), params.source());
        assert_eq!(path.target(), params.target());
    }
}
