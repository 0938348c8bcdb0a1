//! Contains the [`Mosaic`] type: the grid of cells being quantized and its part counts.

use crate::{Color, Grid, Palette, PaletteEntry};
use std::collections::BTreeMap;
#[cfg(feature = "image")]
use {image::RgbaImage, palette::cast::IntoComponents};

/// A single mosaic cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    /// A color that has not been assigned a part yet.
    ///
    /// Before quantization this is the source pixel, possibly carrying
    /// error diffused from neighboring cells.
    Raw(Color),
    /// The index of the palette entry placed in this cell.
    Part(usize),
}

/// A grid of cells together with the palette they are quantized to
/// and the number of parts placed for each palette entry.
///
/// A [`Mosaic`] starts out with every cell holding a [`Cell::Raw`] source color.
/// [`Quantizer::run`](crate::Quantizer::run) replaces each of them with a [`Cell::Part`].
///
/// # Examples
/// ```
/// # use brickette::{Color, Grid, Mosaic, Palette, PaletteEntry, Quantizer};
/// # fn main() -> Result<(), brickette::Error> {
/// let red = Color::new(255, 0, 0, 255);
/// let palette = Palette::new(vec![
///     PaletteEntry::new("21", "red", red),
///     PaletteEntry::new("23", "blue", Color::new(0, 0, 255, 255)),
/// ]);
///
/// let mut mosaic = Mosaic::new(Grid::new(2, 2, red), palette);
/// Quantizer::new().dither(false).run(&mut mosaic)?;
///
/// assert_eq!(mosaic.part_counts()["red"], 4);
/// assert_eq!(mosaic.part_counts()["blue"], 0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Mosaic {
    /// The palette that [`Cell::Part`] indices point into.
    pub(crate) palette: Palette,
    /// The cells.
    pub(crate) cells: Grid<Cell>,
    /// The number of parts placed for each palette entry.
    pub(crate) counts: Vec<u32>,
}

impl Mosaic {
    /// Creates a new [`Mosaic`] with a raw cell for each pixel and all part counts at zero.
    #[must_use]
    pub fn new(pixels: Grid<Color>, palette: Palette) -> Self {
        Self {
            cells: pixels.map(|&color| Cell::Raw(color)),
            counts: vec![0; palette.len()],
            palette,
        }
    }

    /// Returns the number of columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.cells.width()
    }

    /// Returns the number of rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.cells.height()
    }

    /// Returns the palette of this mosaic.
    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Returns the cells.
    #[must_use]
    pub fn cells(&self) -> &Grid<Cell> {
        &self.cells
    }

    /// Returns the cell at `(x, y)`.
    #[must_use]
    pub fn cell(&self, x: u32, y: u32) -> Cell {
        self.cells.get(x, y)
    }

    /// Returns the current color of the cell at `(x, y)`.
    #[must_use]
    pub fn color(&self, x: u32, y: u32) -> Color {
        self.resolve(self.cell(x, y))
    }

    /// Returns the palette entry placed at `(x, y)`,
    /// or `None` if the cell has not been quantized.
    #[must_use]
    pub fn entry(&self, x: u32, y: u32) -> Option<&PaletteEntry> {
        match self.cell(x, y) {
            Cell::Raw(_) => None,
            Cell::Part(i) => Some(&self.palette[i]),
        }
    }

    /// Returns the color a cell stands for.
    pub(crate) fn resolve(&self, cell: Cell) -> Color {
        match cell {
            Cell::Raw(color) => color,
            Cell::Part(i) => self.palette[i].color,
        }
    }

    /// Returns whether every cell has been assigned a part.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cells
            .as_slice()
            .iter()
            .all(|cell| matches!(cell, Cell::Part(_)))
    }

    /// Returns the number of cells, that is, the number of parts a complete mosaic needs.
    #[must_use]
    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    /// Returns the number of parts placed for each palette entry, in palette order.
    #[must_use]
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// Returns the total number of parts placed so far.
    #[must_use]
    pub fn total_parts(&self) -> u64 {
        self.counts.iter().copied().map(u64::from).sum()
    }

    /// Returns the number of parts placed for each color name.
    ///
    /// Every name in the palette is present, even if no part of that color was placed.
    /// Entries sharing a name are counted together.
    #[must_use]
    pub fn part_counts(&self) -> BTreeMap<String, u32> {
        let mut parts = BTreeMap::new();
        for (entry, &count) in self.palette.iter().zip(&self.counts) {
            *parts.entry(entry.name.clone()).or_insert(0) += count;
        }
        parts
    }

    /// Assigns the palette entry at `index` to the cell at `(x, y)`
    /// and counts one more part of that entry.
    pub(crate) fn place(&mut self, x: u32, y: u32, index: usize) {
        self.cells.set(x, y, Cell::Part(index));
        self.counts[index] += 1;
    }

    /// Renders the mosaic to a grid of pixels of the same dimensions.
    ///
    /// Cells that have not been quantized keep their raw color.
    #[must_use]
    pub fn to_pixels(&self) -> Grid<Color> {
        self.cells.map(|&cell| self.resolve(cell))
    }
}

#[cfg(feature = "image")]
impl Mosaic {
    /// Renders the mosaic to an [`RgbaImage`] with one pixel per cell.
    #[must_use]
    pub fn to_rgba_image(&self) -> RgbaImage {
        let (width, height) = self.cells.dimensions();
        let buf = self.to_pixels().into_vec().into_components();

        #[allow(clippy::expect_used)]
        {
            // the pixel grid has exactly width * height cells,
            // so buf is large enough by nature of its construction
            RgbaImage::from_vec(width, height, buf).expect("large enough buffer")
        }
    }
}
