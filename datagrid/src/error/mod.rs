//! Error types

mod grid;

pub use grid::*;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;
