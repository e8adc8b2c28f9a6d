//! Base64-wrapped bitmap.
//!
//! Standard alphabet with padding. Whitespace in the payload is ignored on
//! decode so line-wrapped text is accepted.

use alloc::string::String;
use alloc::vec::Vec;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use enough::Stop;

use crate::error::PixmapError;
use crate::limits::Limits;
use crate::pixel::PixelGrid;

/// Base64 text of raw bitmap bytes, no grid involved.
pub(crate) fn wrap(bitmap: &[u8]) -> String {
    STANDARD.encode(bitmap)
}

/// Raw bytes carried by a base64 payload. Fails on an empty result.
pub(crate) fn unwrap(data: &[u8]) -> Result<Vec<u8>, PixmapError> {
    let compact: Vec<u8> = data
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    let bytes = STANDARD
        .decode(&compact)
        .map_err(PixmapError::InvalidBase64)?;
    if bytes.is_empty() {
        return Err(PixmapError::EmptyPayload);
    }
    log::trace!("b64 payload: {} bytes", bytes.len());
    Ok(bytes)
}

pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<PixelGrid, PixmapError> {
    let bitmap = unwrap(data)?;
    crate::bmp::decode(&bitmap, limits, stop)
}

pub(crate) fn encode(grid: &PixelGrid, stop: &dyn Stop) -> Result<Vec<u8>, PixmapError> {
    let bitmap = crate::bmp::encode(grid, stop)?;
    Ok(wrap(&bitmap).into_bytes())
}
