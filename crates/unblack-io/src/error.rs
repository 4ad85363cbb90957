/// An error type for the io module.
#[derive(thiserror::Error, Debug)]
pub enum IoError {
    /// Error when the file does not exist.
    #[error("File does not exist: {0}")]
    FileDoesNotExist(std::path::PathBuf),

    /// Invalid file extension.
    #[error("File does not have a valid extension: {0}")]
    InvalidFileExtension(std::path::PathBuf),

    /// Error to open, read or write the file.
    #[error("Failed to manipulate the file. {0}")]
    FileError(#[from] std::io::Error),

    /// The data does not start with a netpbm magic number.
    #[error("Invalid magic number, expected P1 or P4")]
    InvalidMagic,

    /// The data is a netpbm image other than a bitmap.
    #[error("Unsupported netpbm format {0}, only bitmaps (P1, P4) are supported")]
    UnsupportedFormat(String),

    /// The header is malformed.
    #[error("Invalid header. {0}")]
    InvalidHeader(String),

    /// The image has a zero width or height.
    #[error("Empty image ({0}x{1})")]
    EmptyImage(usize, usize),

    /// A plain raster contains something other than `0` or `1`.
    #[error("Invalid pixel value {0:?}, expected '0' or '1'")]
    InvalidPixelValue(char),

    /// The raster ended before every pixel was read.
    #[error("Unexpected end of data, read {0} of {1} pixels")]
    UnexpectedEof(usize, usize),

    /// Error to create the grid.
    #[error("Failed to create grid. {0}")]
    GridError(#[from] unblack_grid::GridError),
}
