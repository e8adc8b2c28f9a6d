use alloc::vec;
use alloc::vec::Vec;

use crate::error::PixmapError;

/// An RGB color with 8 bits per channel. No alpha.
pub type Color = rgb::RGB8;

pub(crate) const WHITE: Color = Color {
    r: 255,
    g: 255,
    b: 255,
};
pub(crate) const BLACK: Color = Color { r: 0, g: 0, b: 0 };

/// Canonical in-memory image: `width * height` colors in row-major order.
///
/// Pixel `(x, y)` lives at index `y * width + x`. A grid is immutable once
/// built, and the constructors guarantee non-zero dimensions and an exactly
/// sized pixel buffer, so every codec can rely on that invariant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl PixelGrid {
    /// Build a grid from row-major pixels.
    ///
    /// Returns [`PixmapError::InvalidDimensions`] if either dimension is zero
    /// or `pixels.len() != width * height`.
    pub fn new(width: u32, height: u32, pixels: Vec<Color>) -> Result<Self, PixmapError> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .ok_or(PixmapError::DimensionsTooLarge { width, height })?;
        if width == 0 || height == 0 || pixels.len() != expected {
            return Err(PixmapError::InvalidDimensions {
                width,
                height,
                pixels: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// A grid where every pixel is `color`.
    pub fn filled(width: u32, height: u32, color: Color) -> Result<Self, PixmapError> {
        let count = (width as usize)
            .checked_mul(height as usize)
            .ok_or(PixmapError::DimensionsTooLarge { width, height })?;
        Self::new(width, height, vec![color; count])
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Pixel at column `x`, row `y`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y as usize * self.width as usize + x as usize])
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> core::slice::ChunksExact<'_, Color> {
        self.pixels.chunks_exact(self.width as usize)
    }

    pub fn into_pixels(self) -> Vec<Color> {
        self.pixels
    }

    /// Zero-copy view as an [`imgref::ImgRef`].
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, Color> {
        imgref::ImgRef::new(&self.pixels, self.width as usize, self.height as usize)
    }
}

#[cfg(feature = "imgref")]
impl TryFrom<imgref::ImgVec<Color>> for PixelGrid {
    type Error = PixmapError;

    /// Copies out the visible area, dropping any stride padding.
    fn try_from(img: imgref::ImgVec<Color>) -> Result<Self, Self::Error> {
        let width = u32::try_from(img.width()).map_err(|_| PixmapError::DimensionsTooLarge {
            width: u32::MAX,
            height: img.height() as u32,
        })?;
        let height = u32::try_from(img.height()).map_err(|_| PixmapError::DimensionsTooLarge {
            width,
            height: u32::MAX,
        })?;
        let pixels: Vec<Color> = img.rows().flatten().copied().collect();
        Self::new(width, height, pixels)
    }
}
