//! Decoded pixel grids.

use image::{Rgba, RgbaImage};

/// A rectangular grid of pixel characters and their resolved colors.
///
/// Only the pixel decoder constructs grids, so every cell is guaranteed to
/// have a color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    cells: Vec<char>,
    colors: Vec<Rgba<u8>>,
}

impl PixelGrid {
    pub(crate) fn from_parts(
        width: usize,
        height: usize,
        cells: Vec<char>,
        colors: Vec<Rgba<u8>>,
    ) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        debug_assert_eq!(colors.len(), cells.len());
        Self { width, height, cells, colors }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Character at `(x, y)`, or `None` when out of bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<char> {
        self.offset(x, y).map(|i| self.cells[i])
    }

    /// Resolved color at `(x, y)`, or `None` when out of bounds.
    pub fn color_at(&self, x: usize, y: usize) -> Option<Rgba<u8>> {
        self.offset(x, y).map(|i| self.colors[i])
    }

    fn offset(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }

    /// Rows as strings, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.cells.chunks(self.width.max(1)).map(|row| row.iter().collect())
    }

    /// Distinct characters used by the grid.
    pub fn characters(&self) -> std::collections::BTreeSet<char> {
        self.cells.iter().copied().collect()
    }

    /// The grid as a pixel block, rows joined by newlines.
    pub fn to_text(&self) -> String {
        self.rows().collect::<Vec<_>>().join("\n")
    }

    /// Convert to an RGBA image, one image pixel per cell.
    pub fn to_image(&self) -> RgbaImage {
        let mut image = RgbaImage::new(self.width as u32, self.height as u32);
        for (i, color) in self.colors.iter().enumerate() {
            let x = (i % self.width) as u32;
            let y = (i / self.width) as u32;
            image.put_pixel(x, y, *color);
        }
        image
    }
}
