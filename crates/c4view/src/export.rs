//! Export functionality for c4view diagrams.
//!
//! This module provides the [`Exporter`] trait that defines the interface for
//! converting a laid-out [`Canvas`] into an output format. It is the final
//! stage in the c4view processing pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! View payload (JSON)
//!     ↓ map
//! Node / edge view-models
//!     ↓ layout
//! Canvas
//!     ↓ export (this module)
//! SVG document / HTML page
//! ```
//!
//! # Available Backends
//!
//! - [`svg`] - SVG output via [`svg::SvgBuilder`] and [`svg::Svg`]
//! - [`html`] - viewer pages wrapping the SVG output
//!
//! # Error Handling
//!
//! Export operations return [`Error`], covering rendering failures and I/O
//! errors. [`Error`] converts into [`C4ViewError::Export`] at the crate
//! boundary.
//!
//! [`C4ViewError::Export`]: crate::C4ViewError::Export

pub mod html;
pub mod svg;

use thiserror::Error;

use crate::canvas::Canvas;

/// Abstraction for diagram export backends.
pub trait Exporter {
    /// What the backend produces for one canvas.
    type Output;

    /// Exports a laid-out canvas to the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the canvas cannot be converted to the
    /// target format, or [`Error::Io`] if writing the output fails.
    fn export_canvas(&mut self, canvas: &Canvas) -> Result<Self::Output, Error>;
}

/// Errors that can occur during diagram export.
#[derive(Debug, Error)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    #[error("Render error: {0}")]
    Render(String),

    /// An I/O error encountered while writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
