//! HTML pages served by the viewer.
//!
//! Every page is a complete, self-contained document. The view page embeds
//! the diagram and minimap SVGs and a small inline script driving pan and
//! zoom; everything else is static markup.

use log::debug;

use c4view_core::model::{DynamicView, ViewCatalog, ViewKind};

use super::{Error, Exporter, svg::Svg};
use crate::{
    canvas::{Canvas, MAX_ZOOM, MIN_ZOOM, PAN_STEP, ZOOM_STEP},
    route::Route,
};

const PAGE_CSS: &str = "\
body { margin: 0; font-family: Arial, sans-serif; }
header { padding: 8px 16px; border-bottom: 1px solid #ddd; }
main { position: relative; }
svg.c4view-diagram { cursor: grab; touch-action: none; }
svg.c4view-diagram.c4view-panning { cursor: grabbing; }
.c4view-controls { position: absolute; left: 16px; bottom: 16px; display: flex; flex-direction: column; gap: 4px; }
.c4view-controls button { width: 28px; height: 28px; }
.c4view-minimap-frame { position: absolute; right: 16px; bottom: 16px; border: 1px solid #ddd; }
.c4view-dynamic-views { padding: 8px 16px; }";

/// Message shown while a view is being fetched.
pub const LOADING_MESSAGE: &str = "Loading...";
/// Message shown when a view could not be fetched.
pub const ERROR_MESSAGE: &str = "Error :(";

/// Escapes text for use in HTML content and attribute values.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Wraps a body in a complete HTML document.
pub fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>\n{PAGE_CSS}\n</style>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        title = escape_html(title),
    )
}

pub fn loading_page() -> String {
    page("c4view", &format!("<p>{LOADING_MESSAGE}</p>"))
}

pub fn error_page() -> String {
    page("c4view", &format!("<p>{ERROR_MESSAGE}</p>"))
}

pub fn not_found_page(path: &str) -> String {
    page(
        "Not found",
        &format!(
            "<p>No view at <code>{}</code>.</p>\n<p><a href=\"/\">All views</a></p>",
            escape_html(path)
        ),
    )
}

/// The list screen: every catalog entry, grouped by kind, linking to its view.
pub fn list_page(catalog: &ViewCatalog) -> String {
    let mut body = String::from("<header><h1>Views</h1></header>\n<main>\n");

    for kind in ViewKind::ALL {
        let views = catalog.views(kind);
        if views.is_empty() {
            continue;
        }

        body.push_str(&format!("<h2>{}</h2>\n<ul>\n", kind.title()));
        for view in views {
            let route = Route::View {
                kind,
                id: view.id.clone(),
            };
            body.push_str(&format!(
                "<li><a href=\"{}\">{}</a>",
                escape_html(&route.path()),
                escape_html(&view.name)
            ));
            if let Some(description) = view.description.as_deref().filter(|d| !d.is_empty()) {
                body.push_str(&format!(" <small>{}</small>", escape_html(description)));
            }
            body.push_str("</li>\n");
        }
        body.push_str("</ul>\n");
    }

    if catalog.is_empty() {
        body.push_str("<p>No views available.</p>\n");
    }
    body.push_str("</main>");

    page("c4view", &body)
}

/// Pan and zoom on the embedded diagram's `viewBox`.
///
/// The script mirrors [`Viewport`](crate::canvas::Viewport): a center, the
/// size at zoom 1 and a clamped zoom factor. Dragging with the pointer or the
/// arrow keys move the center; the minimap's viewport rectangle follows.
fn controls_script() -> String {
    format!(
        r#"<script>
(function () {{
  const svg = document.querySelector("svg.c4view-diagram");
  if (!svg) return;
  const mask = document.querySelector(".c4view-minimap-viewport");
  const initial = svg.getAttribute("viewBox").split(" ").map(Number);
  const home = {{ x: initial[0] + initial[2] / 2, y: initial[1] + initial[3] / 2 }};
  let center = {{ x: home.x, y: home.y }};
  let zoom = 1;
  function visible() {{
    const w = initial[2] / zoom, h = initial[3] / zoom;
    return [center.x - w / 2, center.y - h / 2, w, h];
  }}
  function apply() {{
    const box = visible();
    svg.setAttribute("viewBox", box.join(" "));
    if (mask) {{
      ["x", "y", "width", "height"].forEach((attr, i) => mask.setAttribute(attr, box[i]));
    }}
  }}
  function setZoom(value) {{
    zoom = Math.min({max}, Math.max({min}, value));
    apply();
  }}
  function pan(dx, dy) {{
    center = {{ x: center.x + dx, y: center.y + dy }};
    apply();
  }}
  let drag = null;
  svg.addEventListener("pointerdown", (event) => {{
    if (event.button !== 0 || event.target.closest("a")) return;
    drag = {{ x: event.clientX, y: event.clientY }};
    svg.setPointerCapture(event.pointerId);
    svg.classList.add("c4view-panning");
  }});
  svg.addEventListener("pointermove", (event) => {{
    if (!drag) return;
    const unit = visible()[2] / svg.getBoundingClientRect().width;
    pan((drag.x - event.clientX) * unit, (drag.y - event.clientY) * unit);
    drag = {{ x: event.clientX, y: event.clientY }};
  }});
  function endDrag() {{
    drag = null;
    svg.classList.remove("c4view-panning");
  }}
  svg.addEventListener("pointerup", endDrag);
  svg.addEventListener("pointercancel", endDrag);
  document.addEventListener("keydown", (event) => {{
    const steps = {{ ArrowLeft: [-1, 0], ArrowRight: [1, 0], ArrowUp: [0, -1], ArrowDown: [0, 1] }}[event.key];
    if (!steps) return;
    event.preventDefault();
    const box = visible();
    pan(box[2] * {pan_step} * steps[0], box[3] * {pan_step} * steps[1]);
  }});
  document.getElementById("c4view-zoom-in").onclick = () => setZoom(zoom * {step});
  document.getElementById("c4view-zoom-out").onclick = () => setZoom(zoom / {step});
  document.getElementById("c4view-fit").onclick = () => {{
    center = {{ x: home.x, y: home.y }};
    setZoom(1);
  }};
}})();
</script>"#,
        max = MAX_ZOOM,
        min = MIN_ZOOM,
        step = ZOOM_STEP,
        pan_step = PAN_STEP,
    )
}

fn dynamic_views_section(dynamic_views: &[DynamicView]) -> String {
    if dynamic_views.is_empty() {
        return String::new();
    }

    let mut section = String::from("<section class=\"c4view-dynamic-views\">\n<h2>Dynamic views</h2>\n<ul>\n");
    for view in dynamic_views {
        section.push_str(&format!("<li>{}", escape_html(view.display_name())));
        let steps = view.ordered_steps();
        if !steps.is_empty() {
            section.push_str("<ol>");
            for step in steps {
                section.push_str(&format!(
                    "<li value=\"{order}\">{relationship}</li>",
                    order = escape_html(step.order),
                    relationship = escape_html(step.relationship_id),
                ));
            }
            section.push_str("</ol>");
        }
        section.push_str("</li>\n");
    }
    section.push_str("</ul>\n</section>");
    section
}

/// Exporter producing the ready view page for a canvas.
#[derive(Debug, Clone)]
pub struct HtmlPage {
    svg: Svg,
    heading: String,
    dynamic_views: Vec<DynamicView>,
}

impl HtmlPage {
    pub fn new(svg: Svg, heading: impl Into<String>) -> Self {
        Self {
            svg,
            heading: heading.into(),
            dynamic_views: Vec::new(),
        }
    }

    pub fn with_dynamic_views(mut self, dynamic_views: Vec<DynamicView>) -> Self {
        self.dynamic_views = dynamic_views;
        self
    }
}

impl Exporter for HtmlPage {
    type Output = String;

    fn export_canvas(&mut self, canvas: &Canvas) -> Result<String, Error> {
        let viewport = self.svg.viewport_for(canvas);
        let diagram = self.svg.render_canvas(canvas);
        let minimap = self
            .svg
            .render_minimap(canvas, viewport)
            .map(|minimap| format!("<div class=\"c4view-minimap-frame\">{minimap}</div>\n"))
            .unwrap_or_default();
        debug!(heading = self.heading, has_minimap = !minimap.is_empty(); "Rendering view page");

        let body = format!(
            "<header><a href=\"/\">All views</a><h1>{heading}</h1></header>\n\
             <main>\n{diagram}\n\
             <div class=\"c4view-controls\">\
             <button id=\"c4view-zoom-in\" title=\"zoom in\">+</button>\
             <button id=\"c4view-zoom-out\" title=\"zoom out\">-</button>\
             <button id=\"c4view-fit\" title=\"fit view\">&#x2922;</button>\
             </div>\n{minimap}</main>\n{dynamic_views}\n{script}",
            heading = escape_html(&self.heading),
            dynamic_views = dynamic_views_section(&self.dynamic_views),
            script = controls_script(),
        );

        Ok(page(&self.heading, &body))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use c4view_core::model::{Element, ViewSummary};

    use super::*;
    use crate::{canvas::LayoutSource, export::svg::SvgBuilder, layout::LayoutEngine};

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_status_pages() {
        assert!(loading_page().contains("<p>Loading...</p>"));
        assert!(error_page().contains("<p>Error :(</p>"));
        assert!(not_found_page("/nope<").contains("/nope&lt;"));
    }

    #[test]
    fn test_list_page_links() {
        let catalog = ViewCatalog {
            landscapes: vec![ViewSummary::new("SystemLandscape", "System Landscape")],
            containers: vec![ViewSummary::new("Containers", "Containers")],
            ..Default::default()
        };
        let html = list_page(&catalog);

        assert!(html.contains("<h2>Landscape</h2>"));
        assert!(html.contains("href=\"/landscape/SystemLandscape\""));
        assert!(html.contains("href=\"/container/Containers\""));
        assert!(!html.contains("<h2>Component</h2>"));
    }

    #[test]
    fn test_empty_list_page() {
        assert!(list_page(&ViewCatalog::default()).contains("No views available."));
    }

    #[test]
    fn test_view_page() {
        let view = c4view_core::model::View {
            elements: vec![Element::new("a", "Alpha")],
            ..Default::default()
        };
        let mut canvas = Canvas::from_view(&view);
        canvas
            .layout(&LayoutEngine::default(), LayoutSource::Initial)
            .unwrap();

        let dynamic = DynamicView {
            id: "signin".to_string(),
            name: Some("Sign in".to_string()),
            title: None,
            steps: HashMap::from([
                ("10".to_string(), "r10".to_string()),
                ("2".to_string(), "r2".to_string()),
            ]),
        };

        let svg = SvgBuilder::new().build().unwrap();
        let html = HtmlPage::new(svg, "Big Bank <Containers>")
            .with_dynamic_views(vec![dynamic])
            .export_canvas(&canvas)
            .unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<h1>Big Bank &lt;Containers&gt;</h1>"));
        assert!(html.contains("class=\"c4view-diagram\""));
        assert!(html.contains("c4view-minimap"));
        assert!(html.contains("c4view-zoom-in"));
        assert!(html.contains("Sign in"));

        // Pointer and keyboard panning, with the minimap rectangle following.
        assert!(html.contains("addEventListener(\"pointermove\""));
        assert!(html.contains("ArrowLeft: [-1, 0]"));
        assert!(html.contains(&format!("* {PAN_STEP} * steps[0]")));
        assert!(html.contains("document.querySelector(\".c4view-minimap-viewport\")"));
        assert!(html.contains("mask.setAttribute(attr, box[i])"));
        let r2 = html.find(">r2<").unwrap();
        let r10 = html.find(">r10<").unwrap();
        assert!(r2 < r10);
    }
}
