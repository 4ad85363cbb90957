/// An error type for the grid module.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Error when the grid has a zero width or height.
    #[error("Invalid grid size ({0}x{1}), width and height must be positive")]
    InvalidSize(usize, usize),

    /// Error when the pixel coordinates are out of bounds.
    #[error("Pixel coordinates ({0}, {1}) are out of bounds ({2}, {3})")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when the data length does not match the grid size.
    #[error("Data length ({0}) does not match the grid size ({1})")]
    DataLengthMismatch(usize, usize),

    /// Error when a value outside of {0, 1} is stored in a cell.
    #[error("Invalid bit value {0}, expected 0 or 1")]
    InvalidBitValue(u8),

    /// Error when the row storage cannot be allocated.
    #[error("Failed to allocate the grid storage. {0}")]
    AllocationFailed(#[from] std::collections::TryReserveError),
}
