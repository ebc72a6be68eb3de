//! c4view - A viewer for C4-model architecture diagrams.
//!
//! Fetches landscape, context, container and component views from a C4
//! backend, lays them out with a layered algorithm and renders them as SVG or
//! as complete HTML viewer pages.

pub mod canvas;
pub mod catalog;
pub mod client;
pub mod config;
pub mod export;
pub mod layout;
pub mod mapping;
pub mod route;
pub mod screen;

mod error;

pub use c4view_core::{color, edge, floating, geometry, model};

pub use error::C4ViewError;

use log::{debug, info, trace};

use canvas::Canvas;
use client::BackendClient;
use config::AppConfig;
use export::{Exporter, svg::SvgBuilder};
use layout::LayoutEngine;
use model::{View, ViewKind};
use screen::ViewScreen;

/// Builder for fetching, laying out and rendering C4 views.
///
/// # Examples
///
/// ```rust,no_run
/// use c4view::{Viewer, config::AppConfig};
///
/// let payload = r#"{"elements": [{"id": "a", "name": "Customer"}], "relationships": []}"#;
///
/// // With custom config
/// let viewer = Viewer::new(AppConfig::default());
///
/// // Decode a view payload
/// let view = viewer.parse_view(payload)
///     .expect("Failed to parse");
///
/// // Render it to SVG
/// let svg = viewer.render_svg(&view)
///     .expect("Failed to render");
///
/// // Or use default config
/// let viewer = Viewer::default();
/// ```
#[derive(Debug, Clone, Default)]
pub struct Viewer {
    config: AppConfig,
}

impl Viewer {
    /// Create a new viewer with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The layout engine for the configured layout settings.
    pub fn layout_engine(&self) -> LayoutEngine {
        LayoutEngine::from_config(self.config.layout())
    }

    /// Create a client for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns `C4ViewError` if the backend URL is invalid.
    pub fn client(&self) -> Result<BackendClient, C4ViewError> {
        BackendClient::new(self.config.backend())
    }

    /// Decode a view payload as served by the backend.
    ///
    /// # Errors
    ///
    /// Returns [`C4ViewError::Decode`] if the JSON is not a view.
    pub fn parse_view(&self, json: &str) -> Result<View, C4ViewError> {
        info!("Decoding view payload");
        let view: View = serde_json::from_str(json)?;
        debug!(
            elements_len = view.elements.len(),
            relationships_len = view.relationships.len();
            "View decoded"
        );
        trace!(view:?; "Decoded view");
        Ok(view)
    }

    /// Map a view to a canvas and lay it out.
    ///
    /// # Errors
    ///
    /// Returns [`C4ViewError::Layout`] if the layout fails.
    pub fn build_canvas(&self, view: &View) -> Result<Canvas, C4ViewError> {
        Canvas::from_view_laid_out(view, &self.layout_engine())
    }

    /// Render a view to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns `C4ViewError` for layout or rendering errors.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use c4view::Viewer;
    ///
    /// let viewer = Viewer::default();
    /// let view = viewer
    ///     .parse_view(r#"{"elements": [{"id": "a", "name": "Customer"}]}"#)
    ///     .expect("Failed to parse");
    ///
    /// let svg = viewer.render_svg(&view).expect("Failed to render view");
    /// assert!(svg.contains("Customer"));
    /// ```
    pub fn render_svg(&self, view: &View) -> Result<String, C4ViewError> {
        self.export_svg(view, None)
    }

    /// Render a view to SVG and write it to `file_name`.
    ///
    /// # Errors
    ///
    /// Returns `C4ViewError` for layout, rendering or I/O errors.
    pub fn write_svg(&self, view: &View, file_name: &str) -> Result<String, C4ViewError> {
        self.export_svg(view, Some(file_name))
    }

    fn export_svg(&self, view: &View, file_name: Option<&str>) -> Result<String, C4ViewError> {
        info!(view_id:? = view.id; "Rendering view");
        let canvas = self.build_canvas(view)?;
        info!(nodes_len = canvas.node_count(), edges_len = canvas.edge_count(); "Layout calculated");

        let mut builder = SvgBuilder::new().with_style(self.config.style());
        if let Some(file_name) = file_name {
            builder = builder.with_file_name(file_name);
        }
        let svg = builder.build()?.export_canvas(&canvas)?;

        info!("SVG rendered successfully");
        Ok(svg)
    }

    /// Fetch a view from the backend and render it to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns `C4ViewError` for fetch, layout or rendering errors.
    pub async fn fetch_and_render_svg(
        &self,
        client: &BackendClient,
        kind: ViewKind,
        id: &str,
    ) -> Result<String, C4ViewError> {
        let view = client.fetch_view(kind, id).await?;
        self.render_svg(&view)
    }

    /// Fetch a view and resolve its screen.
    pub async fn load_screen(&self, client: &BackendClient, kind: ViewKind, id: &str) -> ViewScreen {
        ViewScreen::load(kind, id, self.layout_engine(), client).await
    }
}
