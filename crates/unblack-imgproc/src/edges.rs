use std::ops::AddAssign;

use log::{debug, trace};
use unblack_grid::{BitGrid, GridError, GridSize};

use crate::error::EdgeError;

/// The position of a pixel in a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pixel {
    /// The column of the pixel.
    pub x: usize,
    /// The row of the pixel.
    pub y: usize,
}

impl Pixel {
    /// Create a new pixel position.
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    // up, left, right, down
    fn neighbors(self) -> [Option<Pixel>; 4] {
        [
            self.y.checked_sub(1).map(|y| Pixel::new(self.x, y)),
            self.x.checked_sub(1).map(|x| Pixel::new(x, self.y)),
            self.x.checked_add(1).map(|x| Pixel::new(x, self.y)),
            self.y.checked_add(1).map(|y| Pixel::new(self.x, y)),
        ]
    }
}

/// Counters collected while erasing regions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EraseStats {
    /// Number of searches started from a black seed pixel.
    pub seeds: usize,
    /// Number of pixels pushed onto the search stack, seeds included.
    pub pushed: usize,
    /// Number of pixels turned from black to white.
    pub erased: usize,
}

impl AddAssign for EraseStats {
    fn add_assign(&mut self, other: Self) {
        self.seeds += other.seeds;
        self.pushed += other.pushed;
        self.erased += other.erased;
    }
}

/// LIFO frontier of pixels waiting to be erased and expanded.
///
/// Pixels are moved in and out by value. Growth goes through `try_reserve` so that running out
/// of memory surfaces as an [`EdgeError`] instead of aborting the process.
#[derive(Debug, Default)]
struct WorkStack {
    items: Vec<Pixel>,
    pushed: usize,
}

impl WorkStack {
    fn push(&mut self, pixel: Pixel) -> Result<(), EdgeError> {
        self.items.try_reserve(1)?;
        self.items.push(pixel);
        self.pushed += 1;
        Ok(())
    }

    fn pop(&mut self) -> Option<Pixel> {
        self.items.pop()
    }
}

/// Enumerate the border pixels of a grid in scan order.
///
/// For each row `y` the pixels `(0, y)` and `(width - 1, y)` are produced, then for each column
/// `x` the pixels `(x, 0)` and `(x, height - 1)`. Corners and the cells of single-row or
/// single-column grids are produced more than once. An empty size produces nothing.
///
/// # Examples
///
/// ```
/// use unblack_imgproc::edges::{border_pixels, Pixel};
///
/// let border = border_pixels([2, 1].into()).collect::<Vec<_>>();
///
/// assert_eq!(
///     border,
///     vec![
///         Pixel::new(0, 0),
///         Pixel::new(1, 0),
///         Pixel::new(0, 0),
///         Pixel::new(0, 0),
///         Pixel::new(1, 0),
///         Pixel::new(1, 0),
///     ]
/// );
/// ```
pub fn border_pixels(size: GridSize) -> impl Iterator<Item = Pixel> {
    let (width, height) = if size.area() == 0 {
        (0, 0)
    } else {
        (size.width, size.height)
    };
    let (last_x, last_y) = (width.saturating_sub(1), height.saturating_sub(1));

    let sides = (0..height).flat_map(move |y| [Pixel::new(0, y), Pixel::new(last_x, y)]);
    let top_bottom = (0..width).flat_map(move |x| [Pixel::new(x, 0), Pixel::new(x, last_y)]);

    sides.chain(top_bottom)
}

/// Remove every black region connected to the border of a binary image.
///
/// A black pixel (`true`) is erased when it can be reached from a border pixel through a path
/// of 4-adjacent black pixels. Every other pixel is left untouched. The grid is modified in
/// place.
///
/// # Arguments
///
/// * `grid` - The binary image, black pixels set to `true`.
///
/// # Returns
///
/// The counters of the run.
///
/// # Errors
///
/// If the search stack cannot grow, an error is returned. The pixels erased so far stay erased
/// and the grid must not be treated as a valid result.
///
/// # Examples
///
/// ```
/// use unblack_grid::BitGrid;
/// use unblack_imgproc::edges::unblack_edges;
///
/// let mut grid = BitGrid::from_bits(
///     [5, 5].into(),
///     &[
///         0, 0, 0, 0, 0,
///         0, 0, 0, 0, 0,
///         1, 0, 1, 0, 0,
///         0, 0, 0, 0, 0,
///         0, 0, 0, 0, 0,
///     ],
/// )
/// .unwrap();
///
/// let stats = unblack_edges(&mut grid).unwrap();
///
/// assert_eq!(stats.erased, 1);
/// assert_eq!(grid.get(0, 2), Ok(false));
/// assert_eq!(grid.get(2, 2), Ok(true));
/// ```
pub fn unblack_edges(grid: &mut BitGrid) -> Result<EraseStats, EdgeError> {
    let mut stats = EraseStats::default();

    for seed in border_pixels(grid.size()) {
        if !grid.get(seed.x, seed.y)? {
            continue;
        }

        let region = erase_region(grid, seed)?;
        trace!(
            "erased {} pixels from seed ({}, {})",
            region.erased,
            seed.x,
            seed.y
        );
        stats += region;
    }

    debug!(
        "unblack_edges on {}x{}: {} seeds, {} pushed, {} erased",
        grid.width(),
        grid.height(),
        stats.seeds,
        stats.pushed,
        stats.erased
    );

    Ok(stats)
}

/// Erase the 4-connected black region that contains `seed`.
///
/// Does nothing if `seed` is white or outside of the grid.
///
/// The region is walked with an explicit stack: a pixel is cleared when popped, then each of
/// its neighbors (up, left, right, down) that is still black is pushed. Qualification is read
/// from the live grid, so a pixel that was pushed twice before being cleared is popped twice
/// and the second write is a no-op.
///
/// # Returns
///
/// The counters for this region.
///
/// # Errors
///
/// If the search stack cannot grow, an error is returned.
pub fn erase_region(grid: &mut BitGrid, seed: Pixel) -> Result<EraseStats, EdgeError> {
    let mut stats = EraseStats::default();

    if !is_black(grid, seed)? {
        return Ok(stats);
    }

    let mut stack = WorkStack::default();
    stack.push(seed)?;

    while let Some(pixel) = stack.pop() {
        if grid.set(pixel.x, pixel.y, false)? {
            stats.erased += 1;
        }

        for neighbor in pixel.neighbors().into_iter().flatten() {
            if is_black(grid, neighbor)? {
                stack.push(neighbor)?;
            }
        }
    }

    stats.seeds = 1;
    stats.pushed = stack.pushed;

    Ok(stats)
}

fn is_black(grid: &BitGrid, pixel: Pixel) -> Result<bool, GridError> {
    if !grid.contains(pixel.x, pixel.y) {
        return Ok(false);
    }
    grid.get(pixel.x, pixel.y)
}
