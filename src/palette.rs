use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::pixel::{Color, PixelGrid};

/// Unique colors of a grid in first-occurrence (row-major) order.
///
/// Entry `i` is the color assigned index `i`; the same grid always yields
/// the same palette.
#[derive(Debug, Clone, Default)]
pub(crate) struct Palette {
    colors: Vec<Color>,
    index: BTreeMap<[u8; 3], usize>,
}

impl Palette {
    /// Build the palette of `grid` along with each pixel's palette index.
    pub fn index_grid(grid: &PixelGrid) -> (Self, Vec<usize>) {
        let mut palette = Self::default();
        let indices = grid.pixels().iter().map(|&c| palette.insert(c)).collect();
        log::trace!(
            "built palette of {} colors for {}x{} grid",
            palette.len(),
            grid.width(),
            grid.height()
        );
        (palette, indices)
    }

    /// Index of `color`, assigning the next one if unseen.
    pub fn insert(&mut self, color: Color) -> usize {
        let next = self.colors.len();
        let idx = *self.index.entry([color.r, color.g, color.b]).or_insert(next);
        if idx == next {
            self.colors.push(color);
        }
        idx
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }
}
