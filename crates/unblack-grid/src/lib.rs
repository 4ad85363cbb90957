#![deny(missing_docs)]
//! Bit-packed two-dimensional grids for binary images

/// bit-packed grid representation.
pub mod grid;

/// packed storage for a single grid row.
pub mod row;

/// Error types for the grid module.
pub mod error;

pub use crate::error::GridError;
pub use crate::grid::{BitGrid, GridSize};
pub use crate::row::BitRow;
