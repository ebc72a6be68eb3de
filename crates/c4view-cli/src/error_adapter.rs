//! Error adapter for converting C4ViewError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error type
//! and miette's rich diagnostic formatting used in the CLI. Every error gets a
//! stable code and, where the fix is usually the same, a help line.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use c4view::C4ViewError;

/// Adapter for [`C4ViewError`].
pub struct ErrorAdapter<'a>(pub &'a C4ViewError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            C4ViewError::Io(_) => "c4view::io",
            C4ViewError::Http { .. } => "c4view::http",
            C4ViewError::Status { .. } => "c4view::status",
            C4ViewError::Decode(_) => "c4view::decode",
            C4ViewError::Config(_) => "c4view::config",
            C4ViewError::Layout(_) => "c4view::layout",
            C4ViewError::Export(_) => "c4view::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            C4ViewError::Http { .. } => {
                "is the C4 backend running? Set `backend.base_url` or pass --base-url"
            }
            C4ViewError::Status { status: 404, .. } => {
                "the backend has no view with this id; the start page lists the known views"
            }
            C4ViewError::Decode(_) => {
                "a view payload needs `elements` and `relationships` lists"
            }
            C4ViewError::Config(_) => "check the configuration file passed with --config",
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}
