//! Minimap: a scaled-down overview of all nodes with the visible region.

use svg::{
    Document,
    node::element::{Group, Rectangle},
};

use c4view_core::geometry::Insets;

use super::Svg;
use crate::canvas::{Canvas, Viewport};

impl Svg {
    /// Renders the minimap for a canvas.
    ///
    /// Returns `None` when the minimap is disabled or no node has been laid out.
    pub fn render_minimap(&self, canvas: &Canvas, viewport: Viewport) -> Option<Document> {
        if self.minimap_width <= 0.0 {
            return None;
        }

        let visible = viewport.visible_bounds();
        let content = canvas
            .bounds()?
            .merge(&visible)
            .add_padding(Insets::uniform(self.fit_padding));
        let scale = self.minimap_width / content.width();
        let height = content.height() * scale;

        let nodes = canvas
            .nodes()
            .filter_map(|node| node.bounds())
            .fold(Group::new(), |group, bounds| {
                group.add(
                    Rectangle::new()
                        .set("x", bounds.min_x())
                        .set("y", bounds.min_y())
                        .set("width", bounds.width())
                        .set("height", bounds.height())
                        .set("fill", "#e2e2e2"),
                )
            });

        let mask = Rectangle::new()
            .set("class", "c4view-minimap-viewport")
            .set("x", visible.min_x())
            .set("y", visible.min_y())
            .set("width", visible.width())
            .set("height", visible.height())
            .set("fill", "none")
            .set("stroke", "#555555")
            .set("stroke-width", 1.0 / scale);

        Some(
            Document::new()
                .set(
                    "viewBox",
                    format!(
                        "{} {} {} {}",
                        content.min_x(),
                        content.min_y(),
                        content.width(),
                        content.height()
                    ),
                )
                .set("width", self.minimap_width)
                .set("height", height)
                .set("class", "c4view-minimap")
                .add(
                    Rectangle::new()
                        .set("x", content.min_x())
                        .set("y", content.min_y())
                        .set("width", content.width())
                        .set("height", content.height())
                        .set("fill", &self.background),
                )
                .add(nodes)
                .add(mask),
        )
    }
}

#[cfg(test)]
mod tests {
    use c4view_core::model::{Element, View};

    use super::*;
    use crate::{canvas::LayoutSource, config::StyleConfig, export::svg::SvgBuilder, layout::LayoutEngine};

    fn canvas() -> Canvas {
        let view = View {
            elements: vec![Element::new("a", "A"), Element::new("b", "B")],
            ..Default::default()
        };
        let mut canvas = Canvas::from_view(&view);
        canvas
            .layout(&LayoutEngine::default(), LayoutSource::Initial)
            .unwrap();
        canvas
    }

    #[test]
    fn test_minimap_draws_nodes_and_viewport() {
        let canvas = canvas();
        let svg = SvgBuilder::new().build().unwrap();
        let minimap = svg
            .render_minimap(&canvas, canvas.fit_view(10.0))
            .unwrap()
            .to_string();

        assert!(minimap.contains("width=\"200\""));
        assert_eq!(minimap.matches("fill=\"#e2e2e2\"").count(), 2);
        assert!(minimap.contains("c4view-minimap-viewport"));
    }

    #[test]
    fn test_minimap_disabled() {
        let style: StyleConfig = serde_json::from_str(r#"{"minimap_width": 0}"#).unwrap();
        let svg = SvgBuilder::new().with_style(&style).build().unwrap();
        let canvas = canvas();

        assert!(svg.render_minimap(&canvas, canvas.fit_view(10.0)).is_none());
    }

    #[test]
    fn test_minimap_empty_canvas() {
        let svg = SvgBuilder::new().build().unwrap();
        let canvas = Canvas::new(Vec::new(), Vec::new());

        assert!(svg.render_minimap(&canvas, canvas.fit_view(10.0)).is_none());
    }
}
