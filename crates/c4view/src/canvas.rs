//! The diagram canvas.
//!
//! A [`Canvas`] owns the node and edge state of one diagram. It keeps the
//! initial arrays it was created with, so it can be laid out again from
//! scratch or reset, and the current arrays, which user actions mutate.
//! Nothing here is persisted.

use indexmap::IndexMap;
use log::{debug, warn};

use c4view_core::{
    floating::{EdgeParams, floating_edge_between},
    geometry::{Bounds, Insets, Point, Size},
    model::View,
};

use crate::{
    C4ViewError,
    layout::LayoutEngine,
    mapping::{EdgeModel, NodeModel, map_view},
};

/// Smallest zoom factor the controls allow.
pub const MIN_ZOOM: f32 = 0.5;
/// Largest zoom factor the controls allow.
pub const MAX_ZOOM: f32 = 2.0;
/// Zoom step applied by the zoom controls.
pub const ZOOM_STEP: f32 = 1.2;
/// Share of the visible width or height moved by one arrow key press.
pub const PAN_STEP: f32 = 0.1;

/// Which node/edge arrays a layout pass starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutSource {
    /// The arrays the canvas was created with; discards user changes.
    Initial,
    /// The current arrays, including connections made by the user.
    Current,
}

/// A change to a single node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeChange {
    /// The node was dragged to a new top-left position.
    Position { id: String, position: Point },
    /// The node was removed, along with its edges.
    Remove { id: String },
}

/// A change to a single edge.
#[derive(Debug, Clone, PartialEq)]
pub enum EdgeChange {
    Remove { id: String },
}

/// Node and edge state of one diagram.
#[derive(Debug, Clone)]
pub struct Canvas {
    initial_nodes: Vec<NodeModel>,
    initial_edges: Vec<EdgeModel>,
    nodes: IndexMap<String, NodeModel>,
    edges: IndexMap<String, EdgeModel>,
}

impl Canvas {
    /// Create a new canvas; nodes stay unmeasured until the first layout.
    pub fn new(nodes: Vec<NodeModel>, edges: Vec<EdgeModel>) -> Self {
        let mut canvas = Self {
            initial_nodes: nodes,
            initial_edges: edges,
            nodes: IndexMap::new(),
            edges: IndexMap::new(),
        };
        canvas.reset();
        canvas
    }

    /// Create a canvas holding the mapped contents of a view.
    pub fn from_view(view: &View) -> Self {
        let (nodes, edges) = map_view(view);
        Self::new(nodes, edges)
    }

    /// Create a canvas for a view and lay it out.
    ///
    /// Layout hints sent with the view take precedence over `engine`'s
    /// direction and spacing.
    ///
    /// # Errors
    ///
    /// Propagates [`C4ViewError::Layout`] from the engine.
    pub fn from_view_laid_out(view: &View, engine: &LayoutEngine) -> Result<Self, C4ViewError> {
        let mut canvas = Self::from_view(view);
        match &view.layout {
            Some(hints) => {
                debug!(direction:? = hints.direction; "Using the view's layout hints");
                let engine = engine.clone().with_auto_layout(hints);
                canvas.layout(&engine, LayoutSource::Initial)?;
            }
            None => canvas.layout(engine, LayoutSource::Initial)?,
        }
        Ok(canvas)
    }

    /// Restores the arrays the canvas was created with.
    pub fn reset(&mut self) {
        self.nodes = index_by_id(&self.initial_nodes, NodeModel::id, "node");
        self.edges = index_by_id(&self.initial_edges, EdgeModel::id, "edge");
    }

    /// Positions all nodes with the given engine.
    ///
    /// # Errors
    ///
    /// Propagates [`C4ViewError::Layout`] from the engine; the canvas keeps its
    /// previous positions in that case.
    pub fn layout(&mut self, engine: &LayoutEngine, source: LayoutSource) -> Result<(), C4ViewError> {
        let (mut nodes, edges): (Vec<NodeModel>, Vec<EdgeModel>) = match source {
            LayoutSource::Initial => (self.initial_nodes.clone(), self.initial_edges.clone()),
            LayoutSource::Current => (
                self.nodes.values().cloned().collect(),
                self.edges.values().cloned().collect(),
            ),
        };

        engine.layout(&mut nodes, &edges)?;

        self.nodes = index_by_id(&nodes, NodeModel::id, "node");
        self.edges = index_by_id(&edges, EdgeModel::id, "edge");
        debug!(nodes_len = self.nodes.len(), edges_len = self.edges.len(); "Canvas laid out");
        Ok(())
    }

    /// Adds an edge between two nodes.
    ///
    /// Returns the id of the new edge, or `None` when either node is not on
    /// the canvas, the connection already exists or connects a node to itself.
    pub fn connect(&mut self, source: &str, target: &str) -> Option<String> {
        if source == target {
            return None;
        }
        if !self.nodes.contains_key(source) || !self.nodes.contains_key(target) {
            debug!(source, target; "Not connecting unknown nodes");
            return None;
        }
        if self
            .edges
            .values()
            .any(|edge| edge.source() == source && edge.target() == target)
        {
            return None;
        }

        let id = format!("edge-{source}-{target}");
        if self.edges.contains_key(&id) {
            return None;
        }

        debug!(source, target; "Connecting nodes");
        self.edges
            .insert(id.clone(), EdgeModel::new(id.clone(), source, target));
        Some(id)
    }

    /// Applies a node change. Returns false if the node does not exist.
    pub fn apply_node_change(&mut self, change: NodeChange) -> bool {
        match change {
            NodeChange::Position { id, position } => match self.nodes.get_mut(&id) {
                Some(node) => {
                    node.set_position(position);
                    true
                }
                None => false,
            },
            NodeChange::Remove { id } => {
                if self.nodes.shift_remove(&id).is_none() {
                    return false;
                }
                self.edges.retain(|_, edge| !edge.touches(&id));
                true
            }
        }
    }

    /// Applies an edge change. Returns false if the edge does not exist.
    pub fn apply_edge_change(&mut self, change: EdgeChange) -> bool {
        match change {
            EdgeChange::Remove { id } => self.edges.shift_remove(&id).is_some(),
        }
    }

    pub fn nodes(&self) -> impl Iterator<Item = &NodeModel> {
        self.nodes.values()
    }

    pub fn edges(&self) -> impl Iterator<Item = &EdgeModel> {
        self.edges.values()
    }

    pub fn node(&self, id: &str) -> Option<&NodeModel> {
        self.nodes.get(id)
    }

    pub fn edge(&self, id: &str) -> Option<&EdgeModel> {
        self.edges.get(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Floating-edge geometry for an edge.
    ///
    /// `None` when an endpoint is missing from the canvas or has not been
    /// laid out yet.
    pub fn edge_geometry(&self, edge: &EdgeModel) -> Option<EdgeParams> {
        floating_edge_between(
            self.node(edge.source()).and_then(NodeModel::bounds),
            self.node(edge.target()).and_then(NodeModel::bounds),
        )
    }

    /// Bounding box of all measured nodes.
    pub fn bounds(&self) -> Option<Bounds> {
        self.nodes
            .values()
            .filter_map(NodeModel::bounds)
            .reduce(|acc, bounds| acc.merge(&bounds))
    }

    /// A viewport showing the whole diagram with `padding` around it.
    pub fn fit_view(&self, padding: f32) -> Viewport {
        let bounds = self
            .bounds()
            .unwrap_or_default()
            .add_padding(Insets::uniform(padding));
        Viewport::new(bounds)
    }
}

fn index_by_id<T: Clone>(
    items: &[T],
    id: impl Fn(&T) -> &str,
    what: &str,
) -> IndexMap<String, T> {
    let mut index = IndexMap::with_capacity(items.len());
    for item in items {
        let key = id(item);
        if index.contains_key(key) {
            warn!(id = key, kind = what; "Duplicate id, keeping the first occurrence");
            continue;
        }
        index.insert(key.to_string(), item.clone());
    }
    index
}

/// The visible region of the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    center: Point,
    size: Size,
    zoom: f32,
}

impl Viewport {
    /// A viewport showing exactly `bounds` at zoom 1.
    pub fn new(bounds: Bounds) -> Self {
        Self {
            center: bounds.center(),
            size: bounds.to_size(),
            zoom: 1.0,
        }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn zoom_in(self) -> Self {
        self.with_zoom(self.zoom * ZOOM_STEP)
    }

    pub fn zoom_out(self) -> Self {
        self.with_zoom(self.zoom / ZOOM_STEP)
    }

    /// Sets the zoom factor, clamped to the allowed range.
    pub fn with_zoom(mut self, zoom: f32) -> Self {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        self
    }

    /// Moves the viewport by an offset in diagram coordinates.
    pub fn pan(mut self, offset: Point) -> Self {
        self.center = self.center.add_point(offset);
        self
    }

    /// Moves the viewport by whole key steps of [`PAN_STEP`] of the visible
    /// size; positive steps move right and down.
    pub fn pan_steps(self, x_steps: f32, y_steps: f32) -> Self {
        let visible = self.visible_bounds();
        self.pan(Point::new(
            visible.width() * PAN_STEP * x_steps,
            visible.height() * PAN_STEP * y_steps,
        ))
    }

    /// Size of the region at zoom 1, used as the rendered pixel size.
    pub fn base_size(&self) -> Size {
        self.size
    }

    /// The region of the diagram currently visible.
    pub fn visible_bounds(&self) -> Bounds {
        let size = self.size.scale(1.0 / self.zoom);
        let top_left = self
            .center
            .sub_point(Point::new(size.width() / 2.0, size.height() / 2.0));
        Bounds::new_from_top_left(top_left, size)
    }

    /// The SVG `viewBox` attribute for the visible region.
    pub fn view_box(&self) -> String {
        let visible = self.visible_bounds();
        format!(
            "{} {} {} {}",
            visible.min_x(),
            visible.min_y(),
            visible.width(),
            visible.height()
        )
    }
}
