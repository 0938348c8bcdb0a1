//! Contains the color and grid types shared across the crate.

use palette::Srgba;
use std::fmt::{self, Display};

/// An 8-bit sRGB color with an alpha channel.
///
/// This is the color type for both the source pixels and the palette entries.
pub type Color = Srgba<u8>;

/// A rectangular, row-major 2D container of cells addressed by `(x, y)`.
///
/// The dimensions are fixed at construction. Accessing a cell outside of
/// `0..width` by `0..height` is a programming error and panics;
/// coordinates are never clamped or wrapped.
///
/// # Examples
/// ```
/// # use brickette::Grid;
/// let mut grid = Grid::new(3, 2, 0u8);
/// grid.set(2, 1, 7);
/// assert_eq!(grid.get(2, 1), 7);
/// assert_eq!(grid.as_slice(), &[0, 0, 0, 0, 0, 7]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    /// The number of columns.
    width: u32,
    /// The number of rows.
    height: u32,
    /// The cells, one row after another.
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Creates a new [`Grid`] with every cell set to `fill`.
    #[must_use]
    pub fn new(width: u32, height: u32, fill: T) -> Self
    where
        T: Clone,
    {
        Self {
            width,
            height,
            cells: vec![fill; width as usize * height as usize],
        }
    }

    /// Creates a new [`Grid`] from row-major cells.
    ///
    /// Returns `None` if the length of `cells` is not equal to `width * height`.
    #[must_use]
    pub fn from_vec(width: u32, height: u32, cells: Vec<T>) -> Option<Self> {
        if cells.len() == width as usize * height as usize {
            Some(Self { width, height, cells })
        } else {
            None
        }
    }

    /// Creates a new [`Grid`] by calling `f(x, y)` for each cell in row-major order.
    #[must_use]
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> T) -> Self {
        let cells = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();

        Self { width, height, cells }
    }

    /// Returns the number of columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Returns the number of rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Returns `(width, height)`.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the total number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns whether the grid has no cells (a width or height of `0`).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns whether `(x, y)` addresses a cell of this grid.
    #[must_use]
    pub const fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    /// Converts `(x, y)` to an index into the backing storage.
    fn index(&self, x: u32, y: u32) -> usize {
        assert!(
            self.contains(x, y),
            "({x}, {y}) is out of bounds for a {}x{} grid",
            self.width,
            self.height
        );
        y as usize * self.width as usize + x as usize
    }

    /// Returns the cell at `(x, y)`.
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> T
    where
        T: Copy,
    {
        self.cells[self.index(x, y)]
    }

    /// Overwrites the cell at `(x, y)`.
    pub fn set(&mut self, x: u32, y: u32, value: T) {
        let i = self.index(x, y);
        self.cells[i] = value;
    }

    /// Returns the cells as a row-major slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }

    /// Consumes the grid, returning its row-major cells.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.cells
    }

    /// Creates a grid of the same dimensions by applying `f` to each cell.
    #[must_use]
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(f).collect(),
        }
    }
}

impl<T> AsRef<[T]> for Grid<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> Display for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} grid", self.width, self.height)
    }
}
