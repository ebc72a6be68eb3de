//! Viewer routes.
//!
//! ```text
//! /                          list of views
//! /{kind}/{id}               view page
//! /{kind}/{id}/diagram.svg   bare diagram
//! ```
//!
//! where `kind` is one of `landscape`, `context`, `container`, `component`.

use std::fmt;

use c4view_core::model::ViewKind;

/// File name of the bare SVG below a view route.
pub const DIAGRAM_FILE: &str = "diagram.svg";

/// A page of the viewer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    List,
    View { kind: ViewKind, id: String },
    Diagram { kind: ViewKind, id: String },
}

impl Route {
    /// Parses a request path. Returns `None` for unknown paths.
    ///
    /// # Examples
    ///
    /// ```
    /// # use c4view::route::Route;
    /// # use c4view::model::ViewKind;
    /// assert_eq!(Route::parse("/"), Some(Route::List));
    /// assert_eq!(
    ///     Route::parse("/container/Containers"),
    ///     Some(Route::View { kind: ViewKind::Container, id: "Containers".to_string() })
    /// );
    /// assert_eq!(Route::parse("/containers/Containers"), None);
    /// ```
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path
            .trim_start_matches('/')
            .trim_end_matches('/')
            .split('/')
            .collect();

        match segments.as_slice() {
            [""] => Some(Self::List),
            [kind, id] if !id.is_empty() => Some(Self::View {
                kind: kind.parse().ok()?,
                id: (*id).to_string(),
            }),
            [kind, id, DIAGRAM_FILE] if !id.is_empty() => Some(Self::Diagram {
                kind: kind.parse().ok()?,
                id: (*id).to_string(),
            }),
            _ => None,
        }
    }

    /// The request path of this route.
    pub fn path(&self) -> String {
        match self {
            Self::List => "/".to_string(),
            Self::View { kind, id } => format!("/{}/{id}", kind.route_segment()),
            Self::Diagram { kind, id } => {
                format!("/{}/{id}/{DIAGRAM_FILE}", kind.route_segment())
            }
        }
    }

    /// The view shown by this route, if any.
    pub fn view(&self) -> Option<(ViewKind, &str)> {
        match self {
            Self::List => None,
            Self::View { kind, id } | Self::Diagram { kind, id } => Some((*kind, id)),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_round_trips() {
        for kind in ViewKind::ALL {
            let view = Route::View {
                kind,
                id: "abc".to_string(),
            };
            assert_eq!(Route::parse(&view.path()), Some(view.clone()));

            let diagram = Route::Diagram {
                kind,
                id: "abc".to_string(),
            };
            assert_eq!(Route::parse(&diagram.path()), Some(diagram));
        }
    }

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::List.path(), "/");
        assert_eq!(
            Route::View {
                kind: ViewKind::Landscape,
                id: "SystemLandscape".to_string()
            }
            .to_string(),
            "/landscape/SystemLandscape"
        );
    }

    #[test]
    fn test_unknown_paths() {
        assert_eq!(Route::parse("/views"), None);
        assert_eq!(Route::parse("/system/x"), None);
        assert_eq!(Route::parse("/container/"), None);
        assert_eq!(Route::parse("/container/x/y"), None);
        assert_eq!(Route::parse("/container/x/diagram.svg/extra"), None);
    }

    #[test]
    fn test_query_and_trailing_slash_are_ignored() {
        let expected = Some(Route::View {
            kind: ViewKind::Context,
            id: "SystemContext".to_string(),
        });
        assert_eq!(Route::parse("/context/SystemContext/"), expected);
        assert_eq!(Route::parse("/context/SystemContext?zoom=2"), expected);
        assert_eq!(Route::parse(""), Some(Route::List));
    }

    #[test]
    fn test_view_accessor() {
        let route = Route::parse("/component/Components/diagram.svg").unwrap();
        assert_eq!(route.view(), Some((ViewKind::Component, "Components")));
        assert_eq!(Route::List.view(), None);
    }
}
