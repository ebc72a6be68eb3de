//! Edge rendering: bezier paths, arrow markers and labels.

use indexmap::IndexSet;
use svg::node::element::{Definitions, Group, Marker, Path, Rectangle, Text};

use c4view_core::{
    color::Color,
    edge::BezierPath,
    floating::EdgeParams,
    geometry::{Bounds, Insets, Point, Size},
};

use super::Svg;
use crate::mapping::EdgeModel;

const LABEL_FONT_SIZE: f32 = 10.0;
const LABEL_PADDING: f32 = 4.0;

fn marker_id(color: &Color) -> String {
    format!("c4view-arrow-{}", color.to_id_safe_string())
}

/// Creates one arrow marker definition per distinct color.
pub fn create_marker_definitions<'a, I>(colors: I) -> Definitions
where
    I: Iterator<Item = &'a Color>,
{
    let colors: IndexSet<&Color> = colors.collect();

    colors.into_iter().fold(Definitions::new(), |defs, color| {
        // Open chevron, drawn with the edge stroke rather than filled.
        let arrow = Marker::new()
            .set("id", marker_id(color))
            .set("viewBox", "0 0 10 10")
            .set("refX", 9)
            .set("refY", 5)
            .set("markerWidth", 10)
            .set("markerHeight", 10)
            .set("orient", "auto-start-reverse")
            .add(
                Path::new()
                    .set("d", "M 1 1 L 9 5 L 1 9")
                    .set("fill", "none")
                    .set("stroke", color)
                    .set("stroke-width", 1.5)
                    .set("stroke-linecap", "round")
                    .set("stroke-linejoin", "round"),
            );
        defs.add(arrow)
    })
}

/// Rough size of a single line of label text.
///
/// There is no font shaping here; the width assumes an average glyph of
/// 0.6 em, which is close enough for a label background.
pub fn estimate_text_size(text: &str, font_size: f32) -> Size {
    let chars = text.chars().count() as f32;
    Size::new(chars * font_size * 0.6, font_size * 1.2)
}

impl Svg {
    pub(super) fn render_edge(&self, edge: &EdgeModel, params: &EdgeParams) -> Group {
        let bezier = BezierPath::new(params, self.curvature);

        let mut path = Path::new()
            .set("d", bezier.to_path_data())
            .set("fill", "none")
            .set("stroke", &self.edge_color)
            .set("stroke-opacity", self.edge_color.alpha())
            .set("stroke-width", 1)
            .set("marker-end", format!("url(#{})", marker_id(&self.edge_color)));
        if edge.is_animated() {
            path = path.set("class", "c4view-edge-animated");
        }

        let mut group = Group::new()
            .set("class", "c4view-edge")
            .set("data-edge-id", edge.id())
            .add(path);

        if let Some(label) = edge.label() {
            let anchor = bezier.label_anchor();
            let text_size = estimate_text_size(label, LABEL_FONT_SIZE);
            let half = text_size.scale(0.5);
            let top_left = anchor.sub_point(Point::new(half.width(), half.height()));
            let background = Bounds::new_from_top_left(top_left, text_size)
                .add_padding(Insets::uniform(LABEL_PADDING));

            let bg = Rectangle::new()
                .set("x", background.min_x())
                .set("y", background.min_y())
                .set("width", background.width())
                .set("height", background.height())
                .set("fill", &self.background)
                .set("fill-opacity", 0.8)
                .set("rx", 2.0);

            let text = Text::new(label)
                .set("x", anchor.x())
                .set("y", anchor.y())
                .set("text-anchor", "middle")
                .set("dominant-baseline", "middle")
                .set("font-family", "Arial")
                .set("font-size", LABEL_FONT_SIZE);

            group = group.add(bg).add(text);
        }

        group
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_marker_definitions_dedupe_colors() {
        let gray = Color::new("#555555").unwrap();
        let red = Color::new("red").unwrap();
        let colors = [gray, red, gray];

        let defs = create_marker_definitions(colors.iter()).to_string();
        assert_eq!(defs.matches("<marker").count(), 2);
        assert!(defs.contains(&marker_id(&red)));
    }

    #[test]
    fn test_estimate_text_size() {
        let size = estimate_text_size("Uses", 10.0);
        assert_approx_eq!(f32, size.width(), 24.0);
        assert_approx_eq!(f32, size.height(), 12.0);
        assert!(estimate_text_size("", 10.0).width() == 0.0);
    }
}
