//! Simplified palette-row format (`sxl`).
//!
//! Not the DEC terminal graphics protocol: a document is a list of
//! `#index;R,G,B` palette entries followed by rows of `;`-separated palette
//! indices, all whitespace-separated.

mod decode;
mod encode;

use alloc::vec::Vec;
use enough::Stop;

use crate::error::PixmapError;
use crate::limits::Limits;
use crate::pixel::PixelGrid;

pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<PixelGrid, PixmapError> {
    let text = crate::text::as_text(data)?;
    decode::decode_sixel(text, limits, stop)
}

pub(crate) fn encode(grid: &PixelGrid, stop: &dyn Stop) -> Result<Vec<u8>, PixmapError> {
    encode::encode_sixel(grid, stop)
}
