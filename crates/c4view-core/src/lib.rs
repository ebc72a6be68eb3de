//! c4view Core Types and Definitions
//!
//! This crate provides the foundational types for the c4view diagram viewer.
//! It includes:
//!
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Floating edges**: Closest-side attachment of connectors ([`floating`] module)
//! - **Edge paths**: Side-aware bezier connectors ([`edge`] module)
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Model**: The C4 view payload served by the backend ([`model`] module)

pub mod color;
pub mod edge;
pub mod floating;
pub mod geometry;
pub mod model;
