//! Remove black regions connected to the border of binary images.
//!
//! ```
//! use unblack::{imgproc::edges::unblack_edges, io::pbm};
//!
//! let mut grid = pbm::decode_image_pbm(b"P1\n3 3\n1 1 1\n1 0 1\n1 1 1\n").unwrap();
//! unblack_edges(&mut grid).unwrap();
//!
//! assert_eq!(grid.count_ones(), 0);
//! ```

#[doc(inline)]
pub use unblack_grid as grid;

#[doc(inline)]
pub use unblack_imgproc as imgproc;

#[doc(inline)]
pub use unblack_io as io;
