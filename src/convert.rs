//! Tag-pair dispatch: direct base64/bitmap transforms, otherwise a
//! decode -> encode pipeline through [`PixelGrid`](crate::PixelGrid).

use alloc::borrow::Cow;
use alloc::vec::Vec;
use enough::Stop;

use crate::decode::DecodeRequest;
use crate::encode::EncodeRequest;
use crate::error::PixmapError;
use crate::format::ImageFormat;
use crate::limits::Limits;

/// How one input format becomes another.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Conversion {
    /// `b64` -> `bmp`: base64-decode the bytes, no grid.
    UnwrapBase64,
    /// `bmp` -> `b64`: base64-encode the bytes, no grid.
    WrapBase64,
    /// Decode with one codec, encode with another.
    Transcode { from: ImageFormat, to: ImageFormat },
}

impl Conversion {
    pub fn new(from: ImageFormat, to: ImageFormat) -> Self {
        match (from, to) {
            (ImageFormat::Base64, ImageFormat::Bmp) => Conversion::UnwrapBase64,
            (ImageFormat::Bmp, ImageFormat::Base64) => Conversion::WrapBase64,
            (from, to) => Conversion::Transcode { from, to },
        }
    }

    /// Resolve a pair of case-insensitive tags.
    ///
    /// Fails with [`PixmapError::UnsupportedFormat`] naming the first unknown
    /// tag.
    pub fn resolve(input: &str, output: &str) -> Result<Self, PixmapError> {
        Ok(Self::new(input.parse()?, output.parse()?))
    }

    pub fn input(&self) -> ImageFormat {
        match *self {
            Conversion::UnwrapBase64 => ImageFormat::Base64,
            Conversion::WrapBase64 => ImageFormat::Bmp,
            Conversion::Transcode { from, .. } => from,
        }
    }

    pub fn output(&self) -> ImageFormat {
        match *self {
            Conversion::UnwrapBase64 => ImageFormat::Bmp,
            Conversion::WrapBase64 => ImageFormat::Base64,
            Conversion::Transcode { to, .. } => to,
        }
    }

    /// Run the conversion on one complete document.
    ///
    /// `sxl` input has its CR and LF removed first; lines need a separating
    /// space to stay apart.
    pub fn run(
        &self,
        data: &[u8],
        limits: Option<&Limits>,
        stop: impl Stop,
    ) -> Result<Vec<u8>, PixmapError> {
        match *self {
            Conversion::UnwrapBase64 => {
                log::debug!("b64 -> bmp: direct unwrap of {} bytes", data.len());
                crate::b64::unwrap(data)
            }
            Conversion::WrapBase64 => {
                log::debug!("bmp -> b64: direct wrap of {} bytes", data.len());
                Ok(crate::b64::wrap(data).into_bytes())
            }
            Conversion::Transcode { from, to } => {
                log::debug!("{from} -> {to}: decoding {} bytes", data.len());
                let input = if from == ImageFormat::Sixel {
                    strip_line_breaks(data)
                } else {
                    Cow::Borrowed(data)
                };
                let mut request = DecodeRequest::new(&input, from);
                if let Some(limits) = limits {
                    request = request.with_limits(limits);
                }
                let grid = request.decode_with(&stop)?;
                log::debug!("{from} -> {to}: {}x{} grid", grid.width(), grid.height());
                EncodeRequest::new(to).encode_with(&grid, &stop)
            }
        }
    }
}

/// Sixel input arrives with its line breaks removed.
fn strip_line_breaks(data: &[u8]) -> Cow<'_, [u8]> {
    if data.iter().any(|&b| b == b'\r' || b == b'\n') {
        Cow::Owned(
            data.iter()
                .copied()
                .filter(|&b| b != b'\r' && b != b'\n')
                .collect(),
        )
    } else {
        Cow::Borrowed(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use enough::Unstoppable;

    #[test]
    fn base64_pair_is_direct() {
        assert_eq!(
            Conversion::resolve("B64", "bmp").unwrap(),
            Conversion::UnwrapBase64
        );
        assert_eq!(
            Conversion::resolve("bmp", "b64").unwrap(),
            Conversion::WrapBase64
        );
        assert_eq!(
            Conversion::resolve("p3", "b64").unwrap(),
            Conversion::Transcode {
                from: ImageFormat::P3,
                to: ImageFormat::Base64
            }
        );
    }

    #[test]
    fn unknown_tag_is_reported() {
        match Conversion::resolve("p3", "foo") {
            Err(PixmapError::UnsupportedFormat(tag)) => assert_eq!(tag, "foo"),
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
    }

    #[test]
    fn wrap_does_not_validate_bitmap() {
        let out = Conversion::WrapBase64
            .run(b"not a bitmap", None, Unstoppable)
            .unwrap();
        assert_eq!(out, b"bm90IGEgYml0bWFw");
    }

    #[test]
    fn unwrap_empty_payload() {
        assert!(matches!(
            Conversion::UnwrapBase64.run(b"", None, Unstoppable),
            Err(PixmapError::EmptyPayload)
        ));
    }

    #[test]
    fn sixel_line_breaks_are_removed() {
        assert_eq!(&*strip_line_breaks(b"a\r\nb\nc"), b"abc");
        assert!(matches!(strip_line_breaks(b"abc"), Cow::Borrowed(_)));
        let out = Conversion::resolve("sxl", "p3")
            .unwrap()
            .run(b"#0;1,2,3 \r\n0;0 \r\n", None, Unstoppable)
            .unwrap();
        assert_eq!(out, b"P3\n2 1\n255\n1 2 3 1 2 3");
    }

    #[test]
    fn sixel_lines_without_spaces_run_together() {
        let result = Conversion::resolve("sxl", "p3")
            .unwrap()
            .run(b"#0;1,2,3\n0;0", None, Unstoppable);
        assert!(matches!(
            result,
            Err(PixmapError::PixelDataError {
                cause: crate::error::PixelCause::InvalidNumber { .. },
                ..
            })
        ));
    }

    #[test]
    fn identity_pair_normalizes() {
        let out = Conversion::resolve("p1", "P1")
            .unwrap()
            .run(b"P1 2 2 1011", None, Unstoppable)
            .unwrap();
        assert_eq!(out, b"P1\n2 2\n1 0\n1 1");
    }
}
