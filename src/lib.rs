//! # zenpixmap
//!
//! Converts between plain-text pixmaps, indexed pixmaps, BMP and base64 BMP.
//!
//! Every document is decoded into a [`PixelGrid`] (row-major RGB, top-left
//! origin) and encoded from one. The base64/bitmap pair skips the grid and
//! transforms the bytes directly.
//!
//! ## Supported Formats
//!
//! | tag | format |
//! |-----|--------|
//! | `p1` | plain PBM, white for `1`, black otherwise |
//! | `p2` | plain PGM, 8-bit grey (encoded as the RGB mean) |
//! | `p3` | plain PPM, 8-bit RGB |
//! | `xpm` | XPM2, hex palette codes |
//! | `sxl` | `#index;R,G,B` palette lines and `;`-joined index rows |
//! | `bmp` | Windows bitmap (decode: 1 to 32-bit uncompressed; encode: 24-bit) |
//! | `b64` | base64 text of a `bmp` document |
//!
//! ## Non-Goals
//!
//! - Resizing or color management
//! - Streaming decode; documents are handled whole
//! - File or terminal I/O
//!
//! ## Usage
//!
//! ```
//! use zenpixmap::{Color, ImageFormat, PixelGrid, Unstoppable};
//!
//! let grid = PixelGrid::new(2, 1, vec![Color::new(255, 0, 0), Color::new(0, 0, 255)])?;
//! let xpm = zenpixmap::encode(&grid, ImageFormat::Xpm, Unstoppable)?;
//! assert_eq!(zenpixmap::decode(&xpm, ImageFormat::Xpm, Unstoppable)?, grid);
//!
//! let p3 = zenpixmap::convert(&xpm, "xpm", "p3", Unstoppable)?;
//! assert_eq!(p3, b"P3\n2 1\n255\n255 0 0 0 0 255");
//! # Ok::<(), zenpixmap::PixmapError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod b64;
mod bmp;
mod convert;
mod decode;
mod encode;
mod error;
mod format;
mod limits;
mod palette;
mod pixel;
mod pnm;
mod sixel;
mod text;
mod xpm;

use alloc::vec::Vec;

// Re-exports
pub use convert::Conversion;
pub use decode::DecodeRequest;
pub use encode::EncodeRequest;
pub use enough::{Stop, StopReason, Unstoppable};
pub use error::{PixelCause, PixmapError};
pub use format::ImageFormat;
pub use limits::Limits;
pub use pixel::{Color, PixelGrid};
pub use text::tokenize;

/// Decode one document in `format`.
pub fn decode(
    data: &[u8],
    format: ImageFormat,
    stop: impl Stop,
) -> Result<PixelGrid, PixmapError> {
    DecodeRequest::new(data, format).decode(stop)
}

/// Encode `grid` as `format`.
pub fn encode(
    grid: &PixelGrid,
    format: ImageFormat,
    stop: impl Stop,
) -> Result<Vec<u8>, PixmapError> {
    EncodeRequest::new(format).encode(grid, stop)
}

/// Convert a document between two formats named by their tags.
///
/// Tags are matched case-insensitively. `b64` -> `bmp` and `bmp` -> `b64`
/// transform the bytes without decoding the bitmap; every other pair,
/// identity pairs included, is decoded and re-encoded.
///
/// Line breaks are removed from `sxl` input before decoding, so its lines
/// must also be separated by spaces (the encoder ends every line with one).
pub fn convert(
    data: &[u8],
    input: &str,
    output: &str,
    stop: impl Stop,
) -> Result<Vec<u8>, PixmapError> {
    Conversion::resolve(input, output)?.run(data, None, stop)
}

macro_rules! format_fns {
    ($($decode:ident, $encode:ident => $format:expr, $doc:literal;)*) => {$(
        #[doc = concat!("Decode a ", $doc, " document.")]
        pub fn $decode(data: &[u8], stop: impl Stop) -> Result<PixelGrid, PixmapError> {
            decode(data, $format, stop)
        }

        #[doc = concat!("Encode `grid` as a ", $doc, " document.")]
        pub fn $encode(grid: &PixelGrid, stop: impl Stop) -> Result<Vec<u8>, PixmapError> {
            encode(grid, $format, stop)
        }
    )*};
}

format_fns! {
    decode_p1, encode_p1 => ImageFormat::P1, "plain PBM (P1)";
    decode_p2, encode_p2 => ImageFormat::P2, "plain PGM (P2)";
    decode_p3, encode_p3 => ImageFormat::P3, "plain PPM (P3)";
    decode_xpm, encode_xpm => ImageFormat::Xpm, "XPM2";
    decode_sixel, encode_sixel => ImageFormat::Sixel, "palette-row (sxl)";
    decode_bmp, encode_bmp => ImageFormat::Bmp, "BMP";
    decode_base64, encode_base64 => ImageFormat::Base64, "base64 BMP";
}
