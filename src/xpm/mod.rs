//! XPM2 indexed pixmap.
//!
//! Layout: `XPM2`, `W H`, color count, chars per pixel, one
//! `<code> c #RRGGBB` entry per color, then one row of concatenated codes per
//! image row. Codes are palette indices in uppercase hex, zero-padded to the
//! chars-per-pixel width.

mod decode;
mod encode;

use alloc::vec::Vec;
use enough::Stop;

use crate::error::PixmapError;
use crate::limits::Limits;
use crate::pixel::PixelGrid;

pub(crate) const MAGIC: &str = "XPM2";

/// Hex digits needed to write every index of a `colors`-entry palette.
pub(crate) fn chars_per_pixel(colors: usize) -> usize {
    let mut max = colors.saturating_sub(1);
    let mut digits = 1;
    while max >= 16 {
        max /= 16;
        digits += 1;
    }
    digits
}

pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<PixelGrid, PixmapError> {
    let text = crate::text::as_text(data)?;
    decode::decode_xpm(text, limits, stop)
}

pub(crate) fn encode(grid: &PixelGrid, stop: &dyn Stop) -> Result<Vec<u8>, PixmapError> {
    encode::encode_xpm(grid, stop)
}
