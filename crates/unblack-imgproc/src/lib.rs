#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// removal of regions connected to the image border.
pub mod edges;

/// Error types for the image processing operations.
pub mod error;

pub use crate::edges::{erase_region, unblack_edges, EraseStats, Pixel};
pub use crate::error::EdgeError;
