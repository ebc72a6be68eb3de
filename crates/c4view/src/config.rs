//! Configuration types for fetching and rendering views.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from
//! external sources; every section falls back to its defaults when missing.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining all sections.
//! - [`BackendConfig`] - Where the C4 API lives and how it is queried.
//! - [`LayoutConfig`] - Direction, node size and spacing of the auto-layout.
//! - [`StyleConfig`] - Colors and sizes used by the SVG exporter.
//! - [`CatalogConfig`] - Where the list of available views comes from.
//!
//! # Example
//!
//! ```
//! # use c4view::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.backend().base_url(), "http://localhost:8080");
//! assert!(config.style().edge_color().is_ok());
//! ```

use std::time::Duration;

use serde::Deserialize;

use c4view_core::{
    color::{Color, ColorError},
    geometry::Size,
};

use crate::layout::Direction;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    backend: BackendConfig,

    #[serde(default)]
    layout: LayoutConfig,

    #[serde(default)]
    style: StyleConfig,

    #[serde(default)]
    catalog: CatalogConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(
        backend: BackendConfig,
        layout: LayoutConfig,
        style: StyleConfig,
        catalog: CatalogConfig,
    ) -> Self {
        Self {
            backend,
            layout,
            style,
            catalog,
        }
    }

    /// Returns the backend configuration.
    pub fn backend(&self) -> &BackendConfig {
        &self.backend
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns the catalog configuration.
    pub fn catalog(&self) -> &CatalogConfig {
        &self.catalog
    }

    /// Returns a copy with a different backend base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.backend.base_url = base_url.into();
        self
    }
}

/// Connection settings for the C4 API.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the API, without a trailing slash.
    base_url: String,

    /// Request timeout in seconds.
    timeout_secs: u64,

    /// Keep successful responses in memory.
    cache: bool,

    /// Seconds a cached response stays fresh.
    cache_ttl_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_secs: 30,
            cache: true,
            cache_ttl_secs: 300,
        }
    }
}

impl BackendConfig {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64, cache: bool) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs,
            cache,
            cache_ttl_secs: Self::default().cache_ttl_secs,
        }
    }

    /// Returns a copy whose cached responses expire after `ttl`.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl_secs = ttl.as_secs();
        self
    }

    /// Returns the base URL with any trailing slash removed.
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Returns the request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns true if responses are cached in memory.
    pub fn cache_enabled(&self) -> bool {
        self.cache
    }

    /// Returns how long a cached response stays fresh.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

/// Auto-layout settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    direction: Direction,
    node_width: f32,
    node_height: f32,
    /// Distance between consecutive layers.
    layer_spacing: f32,
    /// Distance between neighbouring nodes of the same layer.
    node_spacing: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            direction: Direction::Down,
            node_width: 200.0,
            node_height: 100.0,
            layer_spacing: 100.0,
            node_spacing: 80.0,
        }
    }
}

impl LayoutConfig {
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Fixed size given to every node before layout.
    pub fn node_size(&self) -> Size {
        Size::new(self.node_width, self.node_height)
    }

    pub fn layer_spacing(&self) -> f32 {
        self.layer_spacing
    }

    pub fn node_spacing(&self) -> f32 {
        self.node_spacing
    }
}

/// Visual styling of rendered diagrams.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    background_color: String,
    node_fill: String,
    node_stroke: String,
    edge_color: String,
    grid_color: String,
    /// Distance between background dots.
    grid_gap: f32,
    /// Radius of the background dots.
    grid_size: f32,
    /// Space kept around the diagram when fitting the view.
    fit_padding: f32,
    /// Bend of edge curves, see `c4view_core::edge`.
    curvature: f32,
    /// Width of the minimap in pixels; 0 disables it.
    minimap_width: f32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: "white".to_string(),
            node_fill: "white".to_string(),
            node_stroke: "#bbbbbb".to_string(),
            edge_color: "#555555".to_string(),
            grid_color: "#888888".to_string(),
            grid_gap: 12.0,
            grid_size: 1.0,
            fit_padding: 50.0,
            curvature: c4view_core::edge::DEFAULT_CURVATURE,
            minimap_width: 200.0,
        }
    }
}

impl StyleConfig {
    pub fn background_color(&self) -> Result<Color, ColorError> {
        Color::new(&self.background_color)
    }

    pub fn node_fill(&self) -> Result<Color, ColorError> {
        Color::new(&self.node_fill)
    }

    pub fn node_stroke(&self) -> Result<Color, ColorError> {
        Color::new(&self.node_stroke)
    }

    pub fn edge_color(&self) -> Result<Color, ColorError> {
        Color::new(&self.edge_color)
    }

    pub fn grid_color(&self) -> Result<Color, ColorError> {
        Color::new(&self.grid_color)
    }

    pub fn grid_gap(&self) -> f32 {
        self.grid_gap
    }

    pub fn grid_size(&self) -> f32 {
        self.grid_size
    }

    pub fn fit_padding(&self) -> f32 {
        self.fit_padding
    }

    pub fn curvature(&self) -> f32 {
        self.curvature
    }

    pub fn minimap_width(&self) -> f32 {
        self.minimap_width
    }
}

/// Where the list of available views comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    /// The built-in list of the standard example views.
    #[default]
    Builtin,
    /// `GET /views` on the backend.
    Backend,
}

/// List screen settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    source: CatalogSource,
}

impl CatalogConfig {
    pub fn new(source: CatalogSource) -> Self {
        Self { source }
    }

    pub fn source(&self) -> CatalogSource {
        self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.backend().base_url(), "http://localhost:8080");
        assert!(config.backend().cache_enabled());
        assert_eq!(config.layout().direction(), Direction::Down);
        assert_eq!(config.layout().node_size(), Size::new(200.0, 100.0));
        assert_eq!(config.catalog().source(), CatalogSource::Builtin);
        assert!(config.style().background_color().is_ok());
        assert!(config.style().grid_color().is_ok());
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config: AppConfig = serde_json::from_str(
            r#"{"backend": {"base_url": "http://api.internal:9000/"}, "layout": {"direction": "right"}}"#,
        )
        .unwrap();

        assert_eq!(config.backend().base_url(), "http://api.internal:9000");
        assert_eq!(config.backend().timeout(), Duration::from_secs(30));
        assert_eq!(config.backend().cache_ttl(), Duration::from_secs(300));
        assert_eq!(config.layout().direction(), Direction::Right);
        assert_eq!(config.layout().node_spacing(), 80.0);
    }

    #[test]
    fn test_invalid_color_is_reported() {
        let config: AppConfig =
            serde_json::from_str(r#"{"style": {"edge_color": "nope"}}"#).unwrap();
        assert!(config.style().edge_color().is_err());
    }

    #[test]
    fn test_with_base_url() {
        let config = AppConfig::default().with_base_url("http://127.0.0.1:1234");
        assert_eq!(config.backend().base_url(), "http://127.0.0.1:1234");
    }
}
