use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::ToString;
use alloc::vec::Vec;
use enough::Stop;

use crate::error::{PixelCause, PixmapError};
use crate::format::ImageFormat;
use crate::limits::{self, Limits};
use crate::pixel::{Color, PixelGrid};
use crate::text::{parse_sample, tokenize};

fn malformed(msg: alloc::string::String) -> PixmapError {
    PixmapError::pixel_data(ImageFormat::Sixel, PixelCause::MalformedEntry(msg))
}

fn parse_index(token: &str) -> Result<u32, PixmapError> {
    token.parse::<u32>().map_err(|source| {
        PixmapError::pixel_data(
            ImageFormat::Sixel,
            PixelCause::InvalidNumber {
                token: token.to_string(),
                source,
            },
        )
    })
}

/// Parse `index;R,G,B` (without the leading `#`).
fn parse_entry(entry: &str) -> Result<(u32, Color), PixmapError> {
    let (index, rgb) = entry
        .split_once(';')
        .ok_or_else(|| malformed(format!("'#{entry}' is missing ';'")))?;
    let index = parse_index(index)?;
    let channels: Vec<&str> = rgb.split(',').collect();
    let [r, g, b] = channels[..] else {
        return Err(malformed(format!(
            "'#{entry}' needs exactly three channels"
        )));
    };
    let r = parse_sample(r, 255, ImageFormat::Sixel)? as u8;
    let g = parse_sample(g, 255, ImageFormat::Sixel)? as u8;
    let b = parse_sample(b, 255, ImageFormat::Sixel)? as u8;
    Ok((index, Color::new(r, g, b)))
}

/// Width is the longest row; cells past the end of a shorter row stay at
/// `Color::default()`.
pub(crate) fn decode_sixel(
    text: &str,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<PixelGrid, PixmapError> {
    let tokens = tokenize(text);

    let mut palette: BTreeMap<u32, Color> = BTreeMap::new();
    let mut rows: Vec<&str> = Vec::new();
    for token in tokens {
        match token.strip_prefix('#') {
            Some(entry) => {
                let (index, color) = parse_entry(entry)?;
                if palette.insert(index, color).is_some() {
                    return Err(malformed(format!("duplicate palette index {index}")));
                }
            }
            None => rows.push(token),
        }
    }

    if rows.is_empty() {
        return Err(PixmapError::pixel_data(
            ImageFormat::Sixel,
            PixelCause::CountMismatch {
                expected: 1,
                actual: 0,
            },
        ));
    }

    let w = rows
        .iter()
        .map(|r| r.split(';').count())
        .max()
        .unwrap_or(0);
    let h = rows.len();
    let (width, height) = match (u32::try_from(w), u32::try_from(h)) {
        (Ok(width), Ok(height)) => (width, height),
        _ => {
            return Err(PixmapError::DimensionsTooLarge {
                width: u32::MAX,
                height: u32::MAX,
            });
        }
    };
    limits::check(limits, width, height)?;
    log::debug!(
        "sxl document: {} palette entries, {width}x{height}",
        palette.len()
    );

    // Width and height both grow with the input, so the product can dwarf it.
    let count = w
        .checked_mul(h)
        .ok_or(PixmapError::DimensionsTooLarge { width, height })?;
    let mut pixels = Vec::new();
    pixels.try_reserve_exact(count).map_err(|_| {
        PixmapError::LimitExceeded(format!("cannot allocate a {width}x{height} grid"))
    })?;
    pixels.resize(count, Color::default());
    for (y, (row, out)) in rows.iter().zip(pixels.chunks_exact_mut(w)).enumerate() {
        if y % 16 == 0 {
            stop.check()?;
        }
        for (field, px) in row.split(';').zip(out.iter_mut()) {
            let index = parse_index(field)?;
            *px = *palette.get(&index).ok_or_else(|| {
                PixmapError::pixel_data(
                    ImageFormat::Sixel,
                    PixelCause::UnknownCode(field.to_string()),
                )
            })?;
        }
    }

    PixelGrid::new(width, height, pixels)
}
