//! SVG export backend.
//!
//! [`SvgBuilder`] resolves the configured style into an [`Svg`] exporter,
//! which renders a laid-out [`Canvas`] as a standalone SVG document: dotted
//! background, animated bezier edges with arrow markers, and node cards.

mod arrows;
mod minimap;
mod node;

use std::{fs::File, io::Write};

use log::{debug, error, info};
use svg::{Document, node::element as svg_element};

use c4view_core::{
    color::{Color, ColorError},
    edge::DEFAULT_CURVATURE,
};

use crate::{
    canvas::{Canvas, Viewport},
    config::StyleConfig,
    export,
};

const GRID_PATTERN_ID: &str = "c4view-dots";

/// Keyframes for animated edges, matching a dash of 5 units.
const EDGE_ANIMATION_CSS: &str = "\
.c4view-edge-animated { stroke-dasharray: 5; animation: c4view-dash 0.5s linear infinite; }
@keyframes c4view-dash { from { stroke-dashoffset: 10; } to { stroke-dashoffset: 0; } }";

/// Builder for the [`Svg`] exporter.
#[derive(Debug, Default)]
pub struct SvgBuilder<'a> {
    style: Option<&'a StyleConfig>,
    viewport: Option<Viewport>,
    file_name: Option<String>,
}

impl<'a> SvgBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(mut self, style: &'a StyleConfig) -> Self {
        self.style = Some(style);
        self
    }

    /// Renders this viewport instead of fitting the whole diagram.
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = Some(viewport);
        self
    }

    /// Also writes each exported document to this file.
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Resolves the style colors and creates the exporter.
    ///
    /// # Errors
    ///
    /// Returns [`export::Error::Render`] if a configured color is invalid.
    pub fn build(self) -> Result<Svg, export::Error> {
        let default_style = StyleConfig::default();
        let style = self.style.unwrap_or(&default_style);
        let color = |value: Result<Color, ColorError>| {
            value.map_err(|err| export::Error::Render(err.to_string()))
        };

        Ok(Svg {
            background: color(style.background_color())?,
            node_fill: color(style.node_fill())?,
            node_stroke: color(style.node_stroke())?,
            edge_color: color(style.edge_color())?,
            grid_color: color(style.grid_color())?,
            grid_gap: style.grid_gap(),
            grid_size: style.grid_size(),
            fit_padding: style.fit_padding(),
            curvature: if style.curvature() > 0.0 {
                style.curvature()
            } else {
                DEFAULT_CURVATURE
            },
            minimap_width: style.minimap_width(),
            viewport: self.viewport,
            file_name: self.file_name,
        })
    }
}

/// SVG exporter with a resolved style.
#[derive(Debug, Clone)]
pub struct Svg {
    background: Color,
    node_fill: Color,
    node_stroke: Color,
    edge_color: Color,
    grid_color: Color,
    grid_gap: f32,
    grid_size: f32,
    fit_padding: f32,
    curvature: f32,
    minimap_width: f32,
    viewport: Option<Viewport>,
    file_name: Option<String>,
}

impl Svg {
    /// The viewport rendered for a canvas: the configured one, or a fit view.
    pub fn viewport_for(&self, canvas: &Canvas) -> Viewport {
        self.viewport
            .unwrap_or_else(|| canvas.fit_view(self.fit_padding))
    }

    /// Renders the canvas to an SVG document.
    pub fn render_canvas(&self, canvas: &Canvas) -> Document {
        let viewport = self.viewport_for(canvas);
        let size = viewport.base_size();
        debug!(view_box = viewport.view_box(), zoom = viewport.zoom(); "Rendering canvas");

        let mut doc = Document::new()
            .set("viewBox", viewport.view_box())
            .set("width", size.width())
            .set("height", size.height())
            .set("class", "c4view-diagram")
            .add(svg_element::Style::new(EDGE_ANIMATION_CSS));

        let edge_colors = canvas.edges().map(|_| &self.edge_color);
        doc = doc.add(arrows::create_marker_definitions(edge_colors));
        doc = self.add_background(doc, viewport);

        let mut edges = svg_element::Group::new().set("class", "c4view-edges");
        for edge in canvas.edges() {
            match canvas.edge_geometry(edge) {
                Some(params) => edges = edges.add(self.render_edge(edge, &params)),
                None => debug!(edge_id = edge.id(); "Skipping edge without geometry"),
            }
        }

        let mut nodes = svg_element::Group::new().set("class", "c4view-nodes");
        for node in canvas.nodes() {
            match self.render_node(node) {
                Some(group) => nodes = nodes.add(group),
                None => debug!(node_id = node.id(); "Skipping unmeasured node"),
            }
        }

        doc.add(edges).add(nodes)
    }

    /// Adds the background fill and the dotted grid covering the viewport.
    fn add_background(&self, doc: Document, viewport: Viewport) -> Document {
        let visible = viewport.visible_bounds();
        let radius = self.grid_size / 2.0;

        let pattern = svg_element::Pattern::new()
            .set("id", GRID_PATTERN_ID)
            .set("x", 0)
            .set("y", 0)
            .set("width", self.grid_gap)
            .set("height", self.grid_gap)
            .set("patternUnits", "userSpaceOnUse")
            .add(
                svg_element::Circle::new()
                    .set("cx", radius)
                    .set("cy", radius)
                    .set("r", radius)
                    .set("fill", &self.grid_color)
                    .set("fill-opacity", self.grid_color.alpha()),
            );

        let rect = |fill: String| {
            svg_element::Rectangle::new()
                .set("x", visible.min_x())
                .set("y", visible.min_y())
                .set("width", visible.width())
                .set("height", visible.height())
                .set("fill", fill)
        };

        doc.add(svg_element::Definitions::new().add(pattern))
            .add(rect(self.background.to_string()))
            .add(rect(format!("url(#{GRID_PATTERN_ID})")))
    }

    /// Writes an SVG document to the configured file, if any.
    pub fn write_document(&self, doc: &Document) -> Result<(), export::Error> {
        let Some(file_name) = &self.file_name else {
            return Ok(());
        };

        info!(file_name; "Creating SVG file");
        let mut f = File::create(file_name).map_err(|err| {
            error!(file_name, err:err; "Failed to create SVG file");
            export::Error::Io(err)
        })?;

        write!(f, "{doc}").map_err(|err| {
            error!(file_name, err:err; "Failed to write SVG content");
            export::Error::Io(err)
        })
    }
}

impl export::Exporter for Svg {
    type Output = String;

    fn export_canvas(&mut self, canvas: &Canvas) -> Result<String, export::Error> {
        let doc = self.render_canvas(canvas);
        debug!("SVG document rendered");

        self.write_document(&doc)?;
        Ok(doc.to_string())
    }
}
