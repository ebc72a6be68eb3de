//! Auto-layout adapter.
//!
//! Positions nodes with the layered (Sugiyama) algorithm from the
//! `rust-sugiyama` crate. The engine only translates between the canvas
//! view-models and the crate: every node gets the same fixed size, the crate
//! assigns layers and in-layer order, and the result is scaled into pixel
//! positions for the requested [`Direction`].

use std::{collections::HashMap, fmt, str::FromStr};

use indexmap::{IndexMap, IndexSet};
use log::{debug, trace};
use rust_sugiyama::configure::Config;
use serde::Deserialize;

use c4view_core::{
    geometry::{Point, Size},
    model::{AutoLayout, RankDirection},
};

use crate::{
    C4ViewError,
    config::LayoutConfig,
    mapping::{EdgeModel, NodeModel},
};

/// Direction in which layers are stacked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// First layer at the top.
    #[default]
    Down,
    /// First layer at the bottom.
    Up,
    /// First layer on the left.
    Right,
    /// First layer on the right.
    Left,
}

impl Direction {
    /// Returns true when layers are stacked vertically.
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Down | Self::Up)
    }
}

impl From<RankDirection> for Direction {
    fn from(direction: RankDirection) -> Self {
        match direction {
            RankDirection::TopBottom => Self::Down,
            RankDirection::BottomTop => Self::Up,
            RankDirection::LeftRight => Self::Right,
            RankDirection::RightLeft => Self::Left,
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "down" | "tb" => Ok(Self::Down),
            "up" | "bt" => Ok(Self::Up),
            "right" | "lr" => Ok(Self::Right),
            "left" | "rl" => Ok(Self::Left),
            _ => Err(format!("invalid layout direction `{s}`")),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Down => "down",
            Self::Up => "up",
            Self::Right => "right",
            Self::Left => "left",
        };
        f.write_str(name)
    }
}

/// Layer and in-layer slot computed for one node.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    layer: usize,
    slot: f32,
}

/// The layered layout engine.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    direction: Direction,
    node_size: Size,
    layer_spacing: f32,
    node_spacing: f32,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::from_config(&LayoutConfig::default())
    }
}

impl LayoutEngine {
    /// Create a new engine from the layout configuration
    pub fn from_config(config: &LayoutConfig) -> Self {
        Self {
            direction: config.direction(),
            node_size: config.node_size(),
            layer_spacing: config.layer_spacing(),
            node_spacing: config.node_spacing(),
        }
    }

    /// Set the direction layers are stacked in
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Apply the layout hints that came with a view.
    pub fn with_auto_layout(mut self, hints: &AutoLayout) -> Self {
        self.direction = hints.direction.into();
        if let Some(rank_separation) = hints.rank_separation {
            self.layer_spacing = rank_separation as f32;
        }
        if let Some(node_separation) = hints.node_separation {
            self.node_spacing = node_separation as f32;
        }
        self
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn node_size(&self) -> Size {
        self.node_size
    }

    /// Sizes and positions every node.
    ///
    /// Self-loops and edges with an endpoint outside `nodes` are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`C4ViewError::Layout`] if the layering crate fails.
    pub fn layout(&self, nodes: &mut [NodeModel], edges: &[EdgeModel]) -> Result<(), C4ViewError> {
        let mut node_ids: IndexMap<String, u32> = IndexMap::new();
        for node in nodes.iter() {
            let next = node_ids.len() as u32;
            node_ids.entry(node.id().to_string()).or_insert(next);
        }

        let mut layered_edges: IndexSet<(u32, u32)> = IndexSet::new();
        for edge in edges {
            if let (Some(&source), Some(&target)) =
                (node_ids.get(edge.source()), node_ids.get(edge.target()))
            {
                // Skip self-loops
                if source != target {
                    layered_edges.insert((source, target));
                }
            }
        }

        debug!(
            nodes_len = node_ids.len(),
            edges_len = layered_edges.len(),
            direction:% = self.direction;
            "Calculating layered layout"
        );

        let mut cells = if layered_edges.is_empty() {
            HashMap::new()
        } else {
            let edges: Vec<(u32, u32)> = layered_edges.into_iter().collect();
            layered_cells(edges)?
        };

        // Nodes without edges go to the first layer, after everything else
        let mut next_slot = cells
            .values()
            .map(|cell| cell.slot + 1.0)
            .fold(0.0f32, f32::max);
        for &index in node_ids.values() {
            cells.entry(index).or_insert_with(|| {
                let cell = Cell {
                    layer: 0,
                    slot: next_slot,
                };
                next_slot += 1.0;
                cell
            });
        }

        let max_layer = cells.values().map(|cell| cell.layer).max().unwrap_or(0);

        let positions: HashMap<&str, Point> = node_ids
            .iter()
            .filter_map(|(id, index)| {
                let cell = cells.get(index)?;
                Some((id.as_str(), self.cell_position(*cell, max_layer)))
            })
            .collect();

        for node in nodes.iter_mut() {
            if let Some(&position) = positions.get(node.id()) {
                trace!(node_id = node.id(), x = position.x(), y = position.y(); "Node positioned");
                node.set_position(position);
                node.set_size(self.node_size);
            }
        }

        Ok(())
    }

    /// Scales a layer/slot cell into a top-left pixel position.
    fn cell_position(&self, cell: Cell, max_layer: usize) -> Point {
        let layer = match self.direction {
            Direction::Down | Direction::Right => cell.layer,
            Direction::Up | Direction::Left => max_layer - cell.layer,
        } as f32;

        if self.direction.is_vertical() {
            Point::new(
                cell.slot * (self.node_size.width() + self.node_spacing),
                layer * (self.node_size.height() + self.layer_spacing),
            )
        } else {
            Point::new(
                layer * (self.node_size.width() + self.layer_spacing),
                cell.slot * (self.node_size.height() + self.node_spacing),
            )
        }
    }
}

/// Runs `rust-sugiyama` and turns its coordinates into layer/slot cells.
///
/// Each weakly connected component comes back as its own layout; components
/// are placed side by side, ordered by their smallest node index.
fn layered_cells(edges: Vec<(u32, u32)>) -> Result<HashMap<u32, Cell>, C4ViewError> {
    let edge_list = edges.clone();
    let layouts = std::panic::catch_unwind(move || {
        let config = Config {
            minimum_length: 1,
            vertex_spacing: 1.0,
            ..Default::default()
        };
        rust_sugiyama::from_edges(&edge_list, &config)
    })
    .map_err(|err| {
        let message = err
            .downcast_ref::<String>()
            .cloned()
            .or_else(|| err.downcast_ref::<&str>().map(|msg| msg.to_string()))
            .unwrap_or_else(|| "unknown error".to_string());
        C4ViewError::Layout(format!("layered layout engine panicked: {message}"))
    })?;

    if layouts.is_empty() {
        return Err(C4ViewError::Layout(
            "layered layout engine returned no layout".to_string(),
        ));
    }

    let mut components: Vec<Vec<(u32, f32, f32)>> = layouts
        .iter()
        .map(|(coords, _, _)| {
            coords
                .iter()
                .filter_map(|&(id, (x, y))| {
                    let id = u32::try_from(id).ok()?;
                    Some((id, x as f32, y as f32))
                })
                .collect::<Vec<_>>()
        })
        .filter(|coords| !coords.is_empty())
        .collect();
    components.sort_by_key(|coords| coords.iter().map(|&(id, _, _)| id).min());

    let mut cells = HashMap::new();
    let mut slot_offset = 0.0f32;
    for coords in &components {
        let component_cells = component_cells(coords, &edges);
        let width = component_cells
            .values()
            .map(|cell| cell.slot + 1.0)
            .fold(0.0f32, f32::max);
        for (id, cell) in component_cells {
            cells.insert(
                id,
                Cell {
                    layer: cell.layer,
                    slot: cell.slot + slot_offset,
                },
            );
        }
        slot_offset += width;
    }

    if cells.is_empty() {
        return Err(C4ViewError::Layout(
            "failed to map any layout coordinates back to nodes".to_string(),
        ));
    }

    Ok(cells)
}

/// Normalizes one component: distinct y values become layers, numbered so
/// that most edges point from a lower to a higher layer, and x values are
/// shifted to start at slot 0.
fn component_cells(coords: &[(u32, f32, f32)], edges: &[(u32, u32)]) -> HashMap<u32, Cell> {
    const EPSILON: f32 = 1e-3;

    let mut levels: Vec<f32> = coords.iter().map(|&(_, _, y)| y).collect();
    levels.sort_by(f32::total_cmp);
    levels.dedup_by(|a, b| (*a - *b).abs() < EPSILON);

    let level_of = |y: f32| {
        levels
            .iter()
            .position(|level| (level - y).abs() < EPSILON)
            .unwrap_or(0)
    };

    let min_x = coords
        .iter()
        .map(|&(_, x, _)| x)
        .fold(f32::INFINITY, f32::min);

    let mut cells: HashMap<u32, Cell> = coords
        .iter()
        .map(|&(id, x, y)| {
            (
                id,
                Cell {
                    layer: level_of(y),
                    slot: x - min_x,
                },
            )
        })
        .collect();

    // The crate may count ranks upwards; flip if most edges point backwards
    let (forward, backward) = edges.iter().fold((0usize, 0usize), |(f, b), (s, t)| {
        match (cells.get(s), cells.get(t)) {
            (Some(s), Some(t)) if s.layer < t.layer => (f + 1, b),
            (Some(s), Some(t)) if s.layer > t.layer => (f, b + 1),
            _ => (f, b),
        }
    });
    if backward > forward {
        let max_layer = levels.len().saturating_sub(1);
        for cell in cells.values_mut() {
            cell.layer = max_layer - cell.layer;
        }
    }

    cells
}
