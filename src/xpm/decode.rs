use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::ToString;
use alloc::vec::Vec;
use enough::Stop;

use super::MAGIC;
use crate::error::{PixelCause, PixmapError};
use crate::format::ImageFormat;
use crate::limits::{self, Limits};
use crate::pixel::{Color, PixelGrid};
use crate::text::{parse_header, tokenize};

fn malformed(msg: alloc::string::String) -> PixmapError {
    PixmapError::pixel_data(ImageFormat::Xpm, PixelCause::MalformedEntry(msg))
}

pub(crate) fn decode_xpm(
    text: &str,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<PixelGrid, PixmapError> {
    let tokens = tokenize(text);
    let header = parse_header(&tokens, MAGIC, true)?;
    let colors = header.max_color as usize;

    let cpp = match tokens.get(header.size) {
        Some(t) => match t.parse::<usize>() {
            Ok(n) if n > 0 => n,
            _ => {
                return Err(PixmapError::MalformedHeader(format!(
                    "chars per pixel '{t}' is not a positive integer"
                )));
            }
        },
        None => {
            return Err(PixmapError::MalformedHeader(
                "missing chars per pixel".into(),
            ));
        }
    };

    limits::check(limits, header.width, header.height)?;
    stop.check()?;

    // Each color-table entry is three tokens: code, `c`, `#RRGGBB`.
    let table_start = header.size + 1;
    let table_end = colors
        .checked_mul(3)
        .and_then(|n| n.checked_add(table_start))
        .filter(|&end| end <= tokens.len())
        .ok_or_else(|| {
            malformed(format!(
                "color table declares {colors} entries but the document ends early"
            ))
        })?;

    let mut table: BTreeMap<&str, Color> = BTreeMap::new();
    for entry in tokens[table_start..table_end].chunks_exact(3) {
        let (code, key, value) = (entry[0], entry[1], entry[2]);
        if code.len() != cpp || !code.is_ascii() {
            return Err(malformed(format!(
                "code '{code}' is not {cpp} characters wide"
            )));
        }
        if key != "c" {
            return Err(malformed(format!(
                "entry '{code}' has key '{key}', expected 'c'"
            )));
        }
        let color = parse_hex_color(value)
            .ok_or_else(|| malformed(format!("entry '{code}' has invalid color '{value}'")))?;
        if table.insert(code, color).is_some() {
            return Err(malformed(format!("duplicate code '{code}'")));
        }
    }

    let rows = &tokens[table_end..];
    let w = header.width as usize;
    let h = header.height as usize;
    if rows.len() != h {
        let found: usize = rows.iter().map(|r| r.len() / cpp).sum();
        return Err(PixmapError::pixel_data(
            ImageFormat::Xpm,
            PixelCause::CountMismatch {
                expected: w * h,
                actual: found,
            },
        ));
    }

    let row_len = w
        .checked_mul(cpp)
        .ok_or(PixmapError::DimensionsTooLarge {
            width: header.width,
            height: header.height,
        })?;
    // Every row must be present and full before the pixel buffer is sized
    // from the header.
    if let Some((y, row)) = rows
        .iter()
        .enumerate()
        .find(|(_, row)| row.len() != row_len || !row.is_ascii())
    {
        return Err(malformed(format!(
            "row {y} is {} characters, expected {row_len}",
            row.len()
        )));
    }

    let mut pixels = Vec::with_capacity(w * h);
    for (y, row) in rows.iter().enumerate() {
        if y % 16 == 0 {
            stop.check()?;
        }
        for x in 0..w {
            let code = &row[x * cpp..(x + 1) * cpp];
            let color = table.get(code).ok_or_else(|| {
                PixmapError::pixel_data(ImageFormat::Xpm, PixelCause::UnknownCode(code.to_string()))
            })?;
            pixels.push(*color);
        }
    }

    PixelGrid::new(header.width, header.height, pixels)
}

/// Parse `#RRGGBB` (either hex case).
fn parse_hex_color(value: &str) -> Option<Color> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::new(channel(0)?, channel(2)?, channel(4)?))
}
