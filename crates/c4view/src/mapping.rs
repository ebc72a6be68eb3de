//! Maps a backend [`View`] into node and edge view-models.
//!
//! The mapping is one-to-one: every element becomes a node and every
//! relationship becomes an edge, ids preserved. Relationships pointing at
//! elements outside the view are kept; the canvas simply has no geometry for
//! them and they are not drawn.

use c4view_core::{
    geometry::{Bounds, Point, Size},
    model::{Element, Relationship, View},
};

/// Node type tag for C4 elements.
pub const ELEMENT_NODE: &str = "element";

/// A node on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeModel {
    id: String,
    kind: &'static str,
    data: Element,
    position: Point,
    size: Option<Size>,
}

impl NodeModel {
    /// Creates an unmeasured node at the origin.
    pub fn new(data: Element) -> Self {
        Self {
            id: data.id.clone(),
            kind: ELEMENT_NODE,
            data,
            position: Point::default(),
            size: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn data(&self) -> &Element {
        &self.data
    }

    /// Top-left corner of the node.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    /// Size of the node, once known.
    pub fn size(&self) -> Option<Size> {
        self.size
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = Some(size);
    }

    /// Bounding box of the node, or `None` before the first layout pass.
    pub fn bounds(&self) -> Option<Bounds> {
        self.size
            .map(|size| Bounds::new_from_top_left(self.position, size))
    }
}

/// An edge on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeModel {
    id: String,
    source: String,
    target: String,
    label: Option<String>,
    animated: bool,
}

impl EdgeModel {
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            label: None,
            animated: false,
        }
    }

    /// Builds the edge for a relationship.
    pub fn from_relationship(relationship: &Relationship) -> Self {
        Self {
            id: relationship.id.clone(),
            source: relationship.source_id.clone(),
            target: relationship.destination_id.clone(),
            label: relationship
                .description
                .clone()
                .filter(|description| !description.is_empty()),
            animated: true,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn is_animated(&self) -> bool {
        self.animated
    }

    /// Returns true if the edge touches the given node.
    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}

/// Maps all elements to nodes and all relationships to edges.
pub fn map_view(view: &View) -> (Vec<NodeModel>, Vec<EdgeModel>) {
    let nodes = view.elements.iter().cloned().map(NodeModel::new).collect();
    let edges = view
        .relationships
        .iter()
        .map(EdgeModel::from_relationship)
        .collect();
    (nodes, edges)
}
