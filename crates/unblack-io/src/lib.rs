#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for I/O operations.
///
/// Defines [`IoError`] variants for file access and PBM decoding failures.
pub mod error;

/// PBM image encoding and decoding.
///
/// Read and write portable bitmaps in the plain (`P1`) and raw (`P4`) encodings.
/// See [`pbm::read_image_pbm`] and [`pbm::write_image_pbm`].
pub mod pbm;

pub use crate::error::IoError;
pub use crate::pbm::{
    decode_image_pbm, encode_image_pbm, read_image_pbm, read_pbm, write_image_pbm, write_pbm,
    PbmEncoding,
};
