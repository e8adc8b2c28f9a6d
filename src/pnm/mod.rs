//! Plain (ASCII) PNM family: P1 (PBM), P2 (PGM), P3 (PPM).
//!
//! All three share one tokenizer and one header check. Bodies are decimal
//! tokens separated by whitespace; P1 bodies may pack several bits into one
//! token (`"0110"`).

mod decode;
mod encode;

use alloc::vec::Vec;
use enough::Stop;

use crate::error::PixmapError;
use crate::format::ImageFormat;
use crate::limits::Limits;
use crate::pixel::PixelGrid;

/// Which plain PNM sub-format to use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PlainFormat {
    /// P1: one bit per pixel, white for `1`.
    Pbm,
    /// P2: 8-bit grey.
    Pgm,
    /// P3: 8-bit RGB triples.
    Ppm,
}

impl PlainFormat {
    fn magic(self) -> &'static str {
        match self {
            PlainFormat::Pbm => "P1",
            PlainFormat::Pgm => "P2",
            PlainFormat::Ppm => "P3",
        }
    }

    fn max_color(self) -> u32 {
        match self {
            PlainFormat::Pbm => 1,
            PlainFormat::Pgm | PlainFormat::Ppm => 255,
        }
    }

    fn has_max_color(self) -> bool {
        self != PlainFormat::Pbm
    }

    fn image_format(self) -> ImageFormat {
        match self {
            PlainFormat::Pbm => ImageFormat::P1,
            PlainFormat::Pgm => ImageFormat::P2,
            PlainFormat::Ppm => ImageFormat::P3,
        }
    }
}

/// Decode a plain PNM document (called from DecodeRequest).
pub(crate) fn decode(
    data: &[u8],
    format: PlainFormat,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<PixelGrid, PixmapError> {
    let text = crate::text::as_text(data)?;
    decode::decode_plain(text, format, limits, stop)
}

/// Encode to plain PNM text (called from EncodeRequest).
pub(crate) fn encode(
    grid: &PixelGrid,
    format: PlainFormat,
    stop: &dyn Stop,
) -> Result<Vec<u8>, PixmapError> {
    encode::encode_plain(grid, format, stop)
}
