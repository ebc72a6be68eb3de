//! Node cards.

use svg::node::element::{Anchor, Group, Rectangle, Text};

use super::Svg;
use crate::mapping::NodeModel;

const NAME_FONT_SIZE: f32 = 14.0;
const DETAIL_FONT_SIZE: f32 = 11.0;

/// Formats element tags as `[a, b]`, or `[-]` when there are none.
pub(crate) fn format_tags(tags: &[String]) -> String {
    if tags.is_empty() {
        "[-]".to_string()
    } else {
        format!("[{}]", tags.join(", "))
    }
}

impl Svg {
    /// Renders a node card, or `None` if the node has not been measured.
    pub(super) fn render_node(&self, node: &NodeModel) -> Option<Group> {
        let bounds = node.bounds()?;
        let element = node.data();
        let center_x = bounds.width() / 2.0;

        let card = Rectangle::new()
            .set("width", bounds.width())
            .set("height", bounds.height())
            .set("rx", 5)
            .set("fill", &self.node_fill)
            .set("stroke", &self.node_stroke)
            .set("stroke-width", 1);

        let line = |y: f32, font_size: f32, content: &str| {
            Text::new(content)
                .set("x", center_x)
                .set("y", y)
                .set("text-anchor", "middle")
                .set("dominant-baseline", "middle")
                .set("font-family", "Arial")
                .set("font-size", font_size)
        };

        let mut group = Group::new()
            .set("class", "c4view-node")
            .set("data-node-id", node.id())
            .set("data-node-kind", node.kind())
            .set(
                "transform",
                format!("translate({}, {})", bounds.min_x(), bounds.min_y()),
            )
            .add(card)
            .add(
                line(bounds.height() * 0.3, NAME_FONT_SIZE, &element.name)
                    .set("font-weight", "bold"),
            )
            .add(line(
                bounds.height() * 0.55,
                DETAIL_FONT_SIZE,
                &format_tags(&element.tags),
            ));

        if let Some(view_url) = &element.view_url {
            let link = Anchor::new()
                .set("href", view_url.as_str())
                .add(
                    line(bounds.height() * 0.8, DETAIL_FONT_SIZE, "zoom")
                        .set("fill", "#0366d6")
                        .set("text-decoration", "underline"),
                );
            group = group.add(link);
        }

        Some(group)
    }
}

#[cfg(test)]
mod tests {
    use c4view_core::{
        geometry::{Point, Size},
        model::Element,
    };

    use super::*;
    use crate::export::svg::SvgBuilder;

    #[test]
    fn test_format_tags() {
        assert_eq!(format_tags(&[]), "[-]");
        assert_eq!(
            format_tags(&["Element".to_string(), "Person".to_string()]),
            "[Element, Person]"
        );
    }

    #[test]
    fn test_unmeasured_node_is_skipped() {
        let svg = SvgBuilder::new().build().unwrap();
        let node = NodeModel::new(Element::new("a", "A"));

        assert!(svg.render_node(&node).is_none());
    }

    #[test]
    fn test_node_card() {
        let svg = SvgBuilder::new().build().unwrap();
        let mut element = Element::new("api", "API Application");
        element.view_url = Some("/component/api".to_string());
        let mut node = NodeModel::new(element);
        node.set_size(Size::new(200.0, 100.0));
        node.set_position(Point::new(40.0, 60.0));

        let card = svg.render_node(&node).unwrap().to_string();
        assert!(card.contains("translate(40, 60)"));
        assert!(card.contains("API Application"));
        assert!(card.contains("[-]"));
        assert!(card.contains(">zoom<"));
        assert!(card.contains("data-node-id=\"api\""));
    }
}
