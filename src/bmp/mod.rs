//! Windows bitmap.
//!
//! Decoding accepts the common uncompressed variants; encoding always writes
//! 24-bit bottom-up rows with a 54-byte header.

mod decode;
mod encode;
mod utils;

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
    decode::decode_bmp(data, limits, stop)
}

pub(crate) fn encode(grid: &PixelGrid, stop: &dyn Stop) -> Result<Vec<u8>, PixmapError> {
    encode::encode_bmp(grid, stop)
}
