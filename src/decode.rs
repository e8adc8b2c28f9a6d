use enough::Stop;

use crate::error::PixmapError;
use crate::format::ImageFormat;
use crate::limits::Limits;
use crate::pixel::PixelGrid;
use crate::pnm::PlainFormat;

/// Decode request for one document in a known format.
///
/// ```
/// use zenpixmap::{DecodeRequest, ImageFormat, Limits, Unstoppable};
///
/// let limits = Limits {
///     max_pixels: Some(1 << 20),
///     ..Limits::default()
/// };
/// let grid = DecodeRequest::new(b"P3 1 1 255 10 20 30", ImageFormat::P3)
///     .with_limits(&limits)
///     .decode(Unstoppable)?;
/// assert_eq!(grid.pixel(0, 0), Some(zenpixmap::Color::new(10, 20, 30)));
/// # Ok::<(), zenpixmap::PixmapError>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    format: ImageFormat,
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8], format: ImageFormat) -> Self {
        Self {
            data,
            format,
            limits: None,
        }
    }

    /// Reject documents whose header exceeds `limits` before allocating.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn decode(self, stop: impl Stop) -> Result<PixelGrid, PixmapError> {
        self.decode_with(&stop)
    }

    pub(crate) fn decode_with(self, stop: &dyn Stop) -> Result<PixelGrid, PixmapError> {
        let (data, limits) = (self.data, self.limits);
        match self.format {
            ImageFormat::P1 => crate::pnm::decode(data, PlainFormat::Pbm, limits, stop),
            ImageFormat::P2 => crate::pnm::decode(data, PlainFormat::Pgm, limits, stop),
            ImageFormat::P3 => crate::pnm::decode(data, PlainFormat::Ppm, limits, stop),
            ImageFormat::Xpm => crate::xpm::decode(data, limits, stop),
            ImageFormat::Sixel => crate::sixel::decode(data, limits, stop),
            ImageFormat::Bmp => crate::bmp::decode(data, limits, stop),
            ImageFormat::Base64 => crate::b64::decode(data, limits, stop),
        }
    }
}
