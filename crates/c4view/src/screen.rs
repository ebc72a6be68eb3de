//! View screens.
//!
//! A [`ViewScreen`] tracks one view from the moment it is requested:
//!
//! ```text
//! Loading ──ok──▶ Ready(canvas)
//!    │
//!    └──err──▶ Error
//! ```
//!
//! There is no retry; a new request creates a new screen.

use log::{error, info, warn};

use c4view_core::model::{DynamicView, View, ViewKind};

use crate::{
    C4ViewError,
    canvas::Canvas,
    client::BackendClient,
    config::StyleConfig,
    export::{
        Exporter,
        html::{self, HtmlPage},
        svg::SvgBuilder,
    },
    layout::LayoutEngine,
};

/// Where a screen is in its lifecycle.
#[derive(Debug, Clone)]
pub enum ScreenState {
    Loading,
    /// Fetching or laying out the view failed; the message is for logs only.
    Error(String),
    Ready(Box<Canvas>),
}

/// The screen for one view route.
#[derive(Debug, Clone)]
pub struct ViewScreen {
    kind: ViewKind,
    id: String,
    engine: LayoutEngine,
    state: ScreenState,
    heading: Option<String>,
    dynamic_views: Vec<DynamicView>,
}

impl ViewScreen {
    /// Creates a screen in the loading state.
    pub fn new(kind: ViewKind, id: impl Into<String>, engine: LayoutEngine) -> Self {
        Self {
            kind,
            id: id.into(),
            engine,
            state: ScreenState::Loading,
            heading: None,
            dynamic_views: Vec::new(),
        }
    }

    /// Creates a screen and resolves it with the backend's response.
    pub async fn load(
        kind: ViewKind,
        id: impl Into<String>,
        engine: LayoutEngine,
        client: &BackendClient,
    ) -> Self {
        let mut screen = Self::new(kind, id, engine);
        let result = client.fetch_view(kind, &screen.id).await;
        screen.resolve(result);
        screen
    }

    pub fn kind(&self) -> ViewKind {
        self.kind
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, ScreenState::Ready(_))
    }

    pub fn canvas(&self) -> Option<&Canvas> {
        match &self.state {
            ScreenState::Ready(canvas) => Some(canvas),
            _ => None,
        }
    }

    pub fn canvas_mut(&mut self) -> Option<&mut Canvas> {
        match &mut self.state {
            ScreenState::Ready(canvas) => Some(canvas),
            _ => None,
        }
    }

    pub fn dynamic_views(&self) -> &[DynamicView] {
        &self.dynamic_views
    }

    /// Heading of the page: the view's own title, else kind and id.
    pub fn heading(&self) -> String {
        self.heading
            .clone()
            .unwrap_or_else(|| format!("{} {}", self.kind.title(), self.id))
    }

    /// Leaves the loading state with the result of fetching the view.
    ///
    /// A screen that already left the loading state is not changed.
    pub fn resolve(&mut self, result: Result<View, C4ViewError>) {
        if !matches!(self.state, ScreenState::Loading) {
            warn!(kind:% = self.kind, id = self.id; "Screen already resolved");
            return;
        }

        let outcome = result.and_then(|view| self.build_canvas(view));
        self.state = match outcome {
            Ok(canvas) => {
                info!(
                    kind:% = self.kind,
                    id = self.id,
                    nodes_len = canvas.node_count(),
                    edges_len = canvas.edge_count();
                    "View ready"
                );
                ScreenState::Ready(Box::new(canvas))
            }
            Err(err) => {
                error!(kind:% = self.kind, id = self.id, err:err; "Failed to load view");
                ScreenState::Error(err.to_string())
            }
        };
    }

    fn build_canvas(&mut self, view: View) -> Result<Canvas, C4ViewError> {
        let canvas = Canvas::from_view_laid_out(&view, &self.engine)?;

        self.heading = view.heading().map(str::to_string);
        self.dynamic_views = view
            .dynamic_views
            .map(|views| views.into_values().collect())
            .unwrap_or_default();
        Ok(canvas)
    }

    /// Renders the page for the current state.
    ///
    /// # Errors
    ///
    /// Returns [`C4ViewError::Export`] if the style cannot be resolved.
    pub fn render_html(&self, style: &StyleConfig) -> Result<String, C4ViewError> {
        match &self.state {
            ScreenState::Loading => Ok(html::loading_page()),
            ScreenState::Error(_) => Ok(html::error_page()),
            ScreenState::Ready(canvas) => {
                let svg = SvgBuilder::new().with_style(style).build()?;
                let mut page = HtmlPage::new(svg, self.heading())
                    .with_dynamic_views(self.dynamic_views.clone());
                Ok(page.export_canvas(canvas)?)
            }
        }
    }

    /// Renders the bare diagram, or `None` if the screen is not ready.
    ///
    /// # Errors
    ///
    /// Returns [`C4ViewError::Export`] if the style cannot be resolved.
    pub fn render_svg(&self, style: &StyleConfig) -> Result<Option<String>, C4ViewError> {
        let Some(canvas) = self.canvas() else {
            return Ok(None);
        };

        let mut svg = SvgBuilder::new().with_style(style).build()?;
        Ok(Some(svg.export_canvas(canvas)?))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};

    use c4view_core::model::{AutoLayout, Element, RankDirection, Relationship};

    use super::*;

    fn view() -> View {
        View {
            title: Some("Internet Banking System - Containers".to_string()),
            elements: vec![Element::new("web", "Web"), Element::new("db", "Database")],
            relationships: vec![Relationship::new("r1", "web", "db")],
            dynamic_views: Some(BTreeMap::from([(
                "signin".to_string(),
                DynamicView {
                    id: "signin".to_string(),
                    name: Some("Sign in".to_string()),
                    title: None,
                    steps: HashMap::from([("1".to_string(), "r1".to_string())]),
                },
            )])),
            ..Default::default()
        }
    }

    fn screen() -> ViewScreen {
        ViewScreen::new(ViewKind::Container, "Containers", LayoutEngine::default())
    }

    #[test]
    fn test_loading_page() {
        let screen = screen();

        assert!(matches!(screen.state(), ScreenState::Loading));
        let html = screen.render_html(&StyleConfig::default()).unwrap();
        assert!(html.contains("<p>Loading...</p>"));
        assert_eq!(screen.render_svg(&StyleConfig::default()).unwrap(), None);
    }

    #[test]
    fn test_error_page() {
        let mut screen = screen();
        screen.resolve(Err(C4ViewError::Status {
            url: "http://localhost:8080/containers/Containers".to_string(),
            status: 404,
        }));

        assert!(matches!(screen.state(), ScreenState::Error(_)));
        let html = screen.render_html(&StyleConfig::default()).unwrap();
        assert!(html.contains("<p>Error :(</p>"));
    }

    #[test]
    fn test_ready_page() {
        let mut screen = screen();
        screen.resolve(Ok(view()));

        assert!(screen.is_ready());
        assert_eq!(screen.heading(), "Internet Banking System - Containers");
        assert_eq!(screen.dynamic_views().len(), 1);

        let canvas = screen.canvas().unwrap();
        assert_eq!(canvas.node_count(), 2);
        assert!(canvas.nodes().all(|node| node.bounds().is_some()));

        let html = screen.render_html(&StyleConfig::default()).unwrap();
        assert!(html.contains("Sign in"));
        assert!(html.contains("class=\"c4view-diagram\""));
        assert!(screen.render_svg(&StyleConfig::default()).unwrap().is_some());
    }

    #[test]
    fn test_resolve_only_once() {
        let mut screen = screen();
        screen.resolve(Ok(view()));
        screen.resolve(Err(C4ViewError::Layout("late".to_string())));

        assert!(screen.is_ready());
    }

    #[test]
    fn test_view_layout_hints_are_applied() {
        let mut screen = screen();
        let mut view = view();
        view.layout = Some(AutoLayout {
            direction: RankDirection::LeftRight,
            rank_separation: Some(100),
            node_separation: None,
        });
        screen.resolve(Ok(view));

        let canvas = screen.canvas().unwrap();
        let web = canvas.node("web").unwrap().position();
        let db = canvas.node("db").unwrap().position();
        assert!(db.x() > web.x());
        assert_eq!(db.y(), web.y());
    }

    #[test]
    fn test_heading_falls_back_to_kind_and_id() {
        let mut screen = screen();
        screen.resolve(Ok(View::default()));

        assert_eq!(screen.heading(), "Container Containers");
    }

    #[test]
    fn test_canvas_mut_allows_user_changes() {
        let mut screen = screen();
        screen.resolve(Ok(view()));

        let canvas = screen.canvas_mut().unwrap();
        assert!(canvas.connect("db", "web").is_some());
        assert_eq!(screen.canvas().unwrap().edge_count(), 2);
    }
}
