use std::fmt;

use crate::{error::GridError, row::BitRow};

/// Grid size in cells
///
/// A struct to represent the size of a grid in cells.
///
/// # Examples
///
/// ```
/// use unblack_grid::GridSize;
///
/// let grid_size = GridSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(grid_size.width, 10);
/// assert_eq!(grid_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridSize {
    /// Width of the grid in cells
    pub width: usize,
    /// Height of the grid in cells
    pub height: usize,
}

impl GridSize {
    /// Get the number of cells covered by the size.
    pub fn area(&self) -> usize {
        self.width * self.height
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "GridSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for GridSize {
    fn from(size: [usize; 2]) -> Self {
        GridSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// A two-dimensional grid of single-bit cells.
///
/// Cells are addressed by `(x, y)` where `x` is the column and `y` the row. The storage is a
/// row-major sequence of [`BitRow`], one per row, each holding exactly `width` bits.
///
/// In a binary image `true` (1) is a black pixel and `false` (0) a white one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitGrid {
    size: GridSize,
    rows: Vec<BitRow>,
}

impl BitGrid {
    /// Create a new grid with all the cells cleared.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the grid in cells.
    ///
    /// # Errors
    ///
    /// If the width or the height is zero, or if the storage cannot be allocated, an error is
    /// returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use unblack_grid::{BitGrid, GridSize};
    ///
    /// let grid = BitGrid::new(GridSize {
    ///     width: 10,
    ///     height: 20,
    /// })
    /// .unwrap();
    ///
    /// assert_eq!(grid.width(), 10);
    /// assert_eq!(grid.height(), 20);
    /// assert_eq!(grid.count_ones(), 0);
    /// ```
    pub fn new(size: GridSize) -> Result<Self, GridError> {
        if size.width == 0 || size.height == 0 {
            return Err(GridError::InvalidSize(size.width, size.height));
        }

        let mut rows = Vec::new();
        rows.try_reserve_exact(size.height)?;
        for _ in 0..size.height {
            rows.push(BitRow::new(size.width)?);
        }

        Ok(Self { size, rows })
    }

    /// Create a new grid with every cell set to `val`.
    ///
    /// # Errors
    ///
    /// Same as [`BitGrid::new`].
    pub fn from_size_val(size: GridSize, val: bool) -> Result<Self, GridError> {
        let mut grid = Self::new(size)?;
        if val {
            grid.rows.iter_mut().for_each(|row| row.fill(true));
        }
        Ok(grid)
    }

    /// Create a new grid from a row-major sequence of cell values.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the grid in cells.
    /// * `data` - `width * height` values, each 0 or 1, row by row.
    ///
    /// # Errors
    ///
    /// If the length of the data does not match the grid size, or if a value is not 0 or 1, an
    /// error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use unblack_grid::BitGrid;
    ///
    /// let grid = BitGrid::from_bits([3, 2].into(), &[0, 1, 0, 1, 1, 1]).unwrap();
    ///
    /// assert_eq!(grid.get(1, 0), Ok(true));
    /// assert_eq!(grid.get(2, 0), Ok(false));
    /// assert_eq!(grid.count_ones(), 4);
    /// ```
    pub fn from_bits(size: GridSize, data: &[u8]) -> Result<Self, GridError> {
        if data.len() != size.area() {
            return Err(GridError::DataLengthMismatch(data.len(), size.area()));
        }

        let mut grid = Self::new(size)?;

        for (y, chunk) in data.chunks_exact(size.width).enumerate() {
            for (x, &value) in chunk.iter().enumerate() {
                let bit = match value {
                    0 => false,
                    1 => true,
                    v => return Err(GridError::InvalidBitValue(v)),
                };
                grid.set(x, y, bit)?;
            }
        }

        Ok(grid)
    }

    /// Get the size of the grid in cells.
    #[inline]
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Get the width of the grid in cells.
    #[inline]
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the grid in cells.
    #[inline]
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the value of the cell at column `x` and row `y`.
    ///
    /// # Errors
    ///
    /// If the coordinates are out of bounds, an error is returned.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Result<bool, GridError> {
        self.check_bounds(x, y)?;
        Ok(self.rows[y].bit(x))
    }

    /// Set the value of the cell at column `x` and row `y`.
    ///
    /// # Returns
    ///
    /// The value the cell held before the write.
    ///
    /// # Errors
    ///
    /// If the coordinates are out of bounds, an error is returned and the grid is untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use unblack_grid::BitGrid;
    ///
    /// let mut grid = BitGrid::new([2, 2].into()).unwrap();
    ///
    /// assert_eq!(grid.set(1, 1, true), Ok(false));
    /// assert_eq!(grid.set(1, 1, false), Ok(true));
    /// assert!(grid.set(2, 1, true).is_err());
    /// ```
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: bool) -> Result<bool, GridError> {
        self.check_bounds(x, y)?;
        self.rows[y]
            .replace(x, value)
            .ok_or(GridError::PixelIndexOutOfBounds(
                x,
                y,
                self.size.width,
                self.size.height,
            ))
    }

    /// Get a row of the grid.
    ///
    /// # Errors
    ///
    /// If the row index is out of bounds, an error is returned.
    pub fn row(&self, y: usize) -> Result<&BitRow, GridError> {
        self.rows.get(y).ok_or(GridError::PixelIndexOutOfBounds(
            0,
            y,
            self.size.width,
            self.size.height,
        ))
    }

    /// Check if `(x, y)` lies inside the grid.
    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.size.width && y < self.size.height
    }

    /// Check if `(x, y)` lies on the first or last row or column of the grid.
    #[inline]
    pub fn is_border(&self, x: usize, y: usize) -> bool {
        self.contains(x, y)
            && (x == 0 || y == 0 || x == self.size.width - 1 || y == self.size.height - 1)
    }

    /// Count the number of cells set to 1.
    pub fn count_ones(&self) -> usize {
        self.rows.iter().map(BitRow::count_ones).sum()
    }

    /// Get the cell values as a row-major sequence of 0 and 1.
    pub fn to_bits(&self) -> Vec<u8> {
        let mut bits = Vec::with_capacity(self.size.area());
        self.for_each_row_major(|_, _, value| bits.push(value as u8));
        bits
    }

    /// Visit every cell row by row.
    ///
    /// The visitor receives `(x, y, value)` for `(0, 0), (1, 0), ..., (width - 1, 0), (0, 1), ...`.
    ///
    /// # Examples
    ///
    /// ```
    /// use unblack_grid::BitGrid;
    ///
    /// let grid = BitGrid::new([2, 2].into()).unwrap();
    ///
    /// let mut visited = vec![];
    /// grid.for_each_row_major(|x, y, _| visited.push((x, y)));
    ///
    /// assert_eq!(visited, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
    /// ```
    pub fn for_each_row_major<F>(&self, mut visitor: F)
    where
        F: FnMut(usize, usize, bool),
    {
        for (y, row) in self.rows.iter().enumerate() {
            for (x, value) in row.iter().enumerate() {
                visitor(x, y, value);
            }
        }
    }

    /// Visit every cell column by column.
    ///
    /// The visitor receives `(x, y, value)` for `(0, 0), (0, 1), ..., (0, height - 1), (1, 0), ...`.
    pub fn for_each_col_major<F>(&self, mut visitor: F)
    where
        F: FnMut(usize, usize, bool),
    {
        for x in 0..self.size.width {
            for (y, row) in self.rows.iter().enumerate() {
                visitor(x, y, row.bit(x));
            }
        }
    }

    #[inline]
    fn check_bounds(&self, x: usize, y: usize) -> Result<(), GridError> {
        if !self.contains(x, y) {
            return Err(GridError::PixelIndexOutOfBounds(
                x,
                y,
                self.size.width,
                self.size.height,
            ));
        }
        Ok(())
    }
}

/// Renders the grid as rows of `0` and `1` characters.
impl fmt::Display for BitGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.rows.iter() {
            for value in row.iter() {
                f.write_str(if value { "1" } else { "0" })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
