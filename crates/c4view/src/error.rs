//! Error types for c4view operations.
//!
//! This module provides the main error type [`C4ViewError`] which wraps the
//! failures that can happen while fetching, laying out and rendering a view.

use std::io;

use thiserror::Error;

use c4view_core::color::ColorError;

/// The main error type for c4view operations.
#[derive(Debug, Error)]
pub enum C4ViewError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },

    #[error("invalid view payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Export error: {0}")]
    Export(#[from] crate::export::Error),
}

impl From<ColorError> for C4ViewError {
    fn from(error: ColorError) -> Self {
        Self::Config(error.to_string())
    }
}

impl C4ViewError {
    /// Create a new `Http` error for the given URL.
    pub fn new_http_error(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Http {
            url: url.into(),
            source,
        }
    }

    /// Returns true if the error came from talking to the backend.
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            Self::Http { .. } | Self::Status { .. } | Self::Decode(_)
        )
    }
}
