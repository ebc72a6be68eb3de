//! The C4 view payload served by the backend.
//!
//! All types decode from the backend's camelCase JSON. Collections that the
//! backend may send as `null` or omit entirely decode as empty.

use std::{
    cmp::Ordering,
    collections::{BTreeMap, BTreeSet, HashMap},
    fmt,
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize};

/// The four C4 abstraction levels a view can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    Landscape,
    Context,
    Container,
    Component,
}

impl ViewKind {
    /// Every view kind, in drill-down order.
    pub const ALL: [ViewKind; 4] = [
        ViewKind::Landscape,
        ViewKind::Context,
        ViewKind::Container,
        ViewKind::Component,
    ];

    /// Path segment used by viewer routes, e.g. `/container/:id`.
    pub fn route_segment(self) -> &'static str {
        match self {
            Self::Landscape => "landscape",
            Self::Context => "context",
            Self::Container => "container",
            Self::Component => "component",
        }
    }

    /// Path segment used by the backend API, e.g. `/containers/:id`.
    pub fn api_segment(self) -> &'static str {
        match self {
            Self::Landscape => "landscapes",
            Self::Context => "contexts",
            Self::Container => "containers",
            Self::Component => "components",
        }
    }

    /// Human readable name, as shown in headings.
    pub fn title(self) -> &'static str {
        match self {
            Self::Landscape => "Landscape",
            Self::Context => "Context",
            Self::Container => "Container",
            Self::Component => "Component",
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.route_segment())
    }
}

impl FromStr for ViewKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewKind::ALL
            .into_iter()
            .find(|kind| kind.route_segment().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown view kind `{s}`"))
    }
}

/// A C4 entity (person, software system, container or component).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "nullable_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "nullable_default")]
    pub technologies: Vec<String>,
    /// Route of the view that zooms into this element, if any.
    #[serde(default)]
    pub view_url: Option<String>,
    #[serde(default)]
    pub is_child: Option<bool>,
}

impl Element {
    /// Creates an element with only an id and a name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            tags: Vec::new(),
            technologies: Vec::new(),
            view_url: None,
            is_child: None,
        }
    }
}

/// A directed relationship between two elements.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub id: String,
    pub source_id: String,
    pub destination_id: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "nullable_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "nullable_default")]
    pub technologies: Vec<String>,
}

impl Relationship {
    pub fn new(
        id: impl Into<String>,
        source_id: impl Into<String>,
        destination_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source_id: source_id.into(),
            destination_id: destination_id.into(),
            description: None,
            tags: Vec::new(),
            technologies: Vec::new(),
        }
    }
}

/// Rank direction of an automatic layout, as named by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum RankDirection {
    TopBottom,
    BottomTop,
    LeftRight,
    RightLeft,
}

/// Automatic layout hints attached to a view.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoLayout {
    pub direction: RankDirection,
    #[serde(default)]
    pub rank_separation: Option<u32>,
    #[serde(default)]
    pub node_separation: Option<u32>,
}

/// A sequence of relationships, keyed by step order.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicView {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    /// Step order mapped to relationship id.
    #[serde(default)]
    pub steps: HashMap<String, String>,
}

/// One step of a [`DynamicView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step<'a> {
    pub order: &'a str,
    pub relationship_id: &'a str,
}

impl DynamicView {
    /// Returns the steps sorted by their order.
    ///
    /// Numeric orders sort numerically (`2` before `10`); anything else sorts
    /// after them, lexicographically.
    pub fn ordered_steps(&self) -> Vec<Step<'_>> {
        let mut steps: Vec<Step<'_>> = self
            .steps
            .iter()
            .map(|(order, relationship_id)| Step {
                order,
                relationship_id,
            })
            .collect();
        steps.sort_by(|a, b| compare_step_order(a.order, b.order));
        steps
    }

    /// Display name: the title, then the name, then the id.
    pub fn display_name(&self) -> &str {
        self.title
            .as_deref()
            .filter(|title| !title.is_empty())
            .or(self.name.as_deref())
            .unwrap_or(&self.id)
    }
}

fn compare_step_order(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// The elements and relationships of one diagram.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct View {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub layout: Option<AutoLayout>,
    #[serde(default, deserialize_with = "nullable_default")]
    pub elements: Vec<Element>,
    #[serde(default, deserialize_with = "nullable_default")]
    pub relationships: Vec<Relationship>,
    #[serde(default)]
    pub dynamic_views: Option<BTreeMap<String, DynamicView>>,
}

impl View {
    /// Ids of relationships whose source or destination is not in this view.
    pub fn dangling_relationships(&self) -> Vec<&str> {
        let ids: BTreeSet<&str> = self.elements.iter().map(|e| e.id.as_str()).collect();
        self.relationships
            .iter()
            .filter(|r| {
                !ids.contains(r.source_id.as_str()) || !ids.contains(r.destination_id.as_str())
            })
            .map(|r| r.id.as_str())
            .collect()
    }

    /// Heading for the view: the title, then the name, then the id.
    pub fn heading(&self) -> Option<&str> {
        self.title
            .as_deref()
            .filter(|title| !title.is_empty())
            .or(self.name.as_deref())
            .or(self.id.as_deref())
    }
}

/// A listed view, without its contents.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ViewSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl ViewSummary {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
        }
    }
}

/// All views known to the backend, grouped by kind.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ViewCatalog {
    #[serde(default, deserialize_with = "nullable_default")]
    pub landscapes: Vec<ViewSummary>,
    #[serde(default, deserialize_with = "nullable_default")]
    pub contexts: Vec<ViewSummary>,
    #[serde(default, deserialize_with = "nullable_default")]
    pub containers: Vec<ViewSummary>,
    #[serde(default, deserialize_with = "nullable_default")]
    pub components: Vec<ViewSummary>,
}

impl ViewCatalog {
    /// Views of one kind.
    pub fn views(&self, kind: ViewKind) -> &[ViewSummary] {
        match kind {
            ViewKind::Landscape => &self.landscapes,
            ViewKind::Context => &self.contexts,
            ViewKind::Container => &self.containers,
            ViewKind::Component => &self.components,
        }
    }

    /// Total number of listed views.
    pub fn len(&self) -> usize {
        ViewKind::ALL.iter().map(|kind| self.views(*kind).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Treats an explicit `null` like a missing field.
fn nullable_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
