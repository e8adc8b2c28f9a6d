use alloc::vec::Vec;
use enough::Stop;

use crate::error::PixmapError;
use crate::format::ImageFormat;
use crate::pixel::PixelGrid;
use crate::pnm::PlainFormat;

/// Encode request for one output format.
///
/// Text formats produce UTF-8 bytes; [`ImageFormat::Bmp`] produces a binary
/// bitmap.
#[derive(Clone, Copy, Debug)]
pub struct EncodeRequest {
    format: ImageFormat,
}

impl EncodeRequest {
    pub fn new(format: ImageFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn encode(self, grid: &PixelGrid, stop: impl Stop) -> Result<Vec<u8>, PixmapError> {
        self.encode_with(grid, &stop)
    }

    pub(crate) fn encode_with(
        self,
        grid: &PixelGrid,
        stop: &dyn Stop,
    ) -> Result<Vec<u8>, PixmapError> {
        match self.format {
            ImageFormat::P1 => crate::pnm::encode(grid, PlainFormat::Pbm, stop),
            ImageFormat::P2 => crate::pnm::encode(grid, PlainFormat::Pgm, stop),
            ImageFormat::P3 => crate::pnm::encode(grid, PlainFormat::Ppm, stop),
            ImageFormat::Xpm => crate::xpm::encode(grid, stop),
            ImageFormat::Sixel => crate::sixel::encode(grid, stop),
            ImageFormat::Bmp => crate::bmp::encode(grid, stop),
            ImageFormat::Base64 => crate::b64::encode(grid, stop),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::DecodeRequest;
    use crate::pixel::Color;
    use alloc::vec;
    use enough::Unstoppable;

    #[test]
    fn text_formats_are_utf8() {
        let grid = PixelGrid::new(2, 1, vec![Color::new(1, 2, 3), Color::new(4, 5, 6)]).unwrap();
        for format in ImageFormat::ALL {
            let bytes = EncodeRequest::new(format).encode(&grid, Unstoppable).unwrap();
            if format.is_binary() {
                assert_eq!(&bytes[..2], b"BM", "{format}");
            } else {
                assert!(core::str::from_utf8(&bytes).is_ok(), "{format}");
            }
        }
    }

    #[test]
    fn lossless_formats_roundtrip() {
        let grid = PixelGrid::new(
            2,
            2,
            vec![
                Color::new(10, 20, 30),
                Color::new(0, 0, 0),
                Color::new(255, 255, 255),
                Color::new(10, 20, 30),
            ],
        )
        .unwrap();
        for format in [
            ImageFormat::P3,
            ImageFormat::Xpm,
            ImageFormat::Sixel,
            ImageFormat::Bmp,
            ImageFormat::Base64,
        ] {
            let bytes = EncodeRequest::new(format).encode(&grid, Unstoppable).unwrap();
            let back = DecodeRequest::new(&bytes, format)
                .decode(Unstoppable)
                .unwrap();
            assert_eq!(back, grid, "{format}");
        }
    }
}
