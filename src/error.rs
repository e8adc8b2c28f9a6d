use alloc::string::String;
use core::num::ParseIntError;
use enough::StopReason;

use crate::format::ImageFormat;

/// Errors from pixmap decoding, encoding and conversion.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PixmapError {
    #[error("format tag mismatch: expected '{expected}', found '{found}'")]
    FormatMismatch {
        expected: &'static str,
        found: String,
    },

    #[error("malformed header: {0}")]
    MalformedHeader(String),

    #[error("invalid max color value: expected {expected}, found {found}")]
    InvalidMaxColor { expected: u32, found: u32 },

    #[error("invalid {format} pixel data: {cause}")]
    PixelDataError {
        format: ImageFormat,
        #[source]
        cause: PixelCause,
    },

    #[error("invalid bitmap: {0}")]
    InvalidBitmap(String),

    #[error("decoded payload is empty")]
    EmptyPayload,

    #[error("unsupported format: '{0}'")]
    UnsupportedFormat(String),

    #[error("invalid base64 payload: {0}")]
    InvalidBase64(base64::DecodeError),

    #[error("input is not valid UTF-8 text")]
    NotText(#[source] core::str::Utf8Error),

    #[error("invalid grid: {width}x{height} does not hold {pixels} pixels")]
    InvalidDimensions { width: u32, height: u32, pixels: usize },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for PixmapError {
    fn from(r: StopReason) -> Self {
        PixmapError::Cancelled(r)
    }
}

impl PixmapError {
    pub(crate) fn pixel_data(format: ImageFormat, cause: PixelCause) -> Self {
        PixmapError::PixelDataError { format, cause }
    }
}

/// Underlying cause of a [`PixmapError::PixelDataError`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PixelCause {
    #[error("'{token}' is not an integer")]
    InvalidNumber {
        token: String,
        #[source]
        source: ParseIntError,
    },

    #[error("value {value} is outside 0..={max}")]
    OutOfRange { value: u32, max: u32 },

    #[error("expected {expected} pixels, found {actual}")]
    CountMismatch { expected: usize, actual: usize },

    #[error("unknown palette code '{0}'")]
    UnknownCode(String),

    #[error("malformed palette entry: {0}")]
    MalformedEntry(String),
}
