//! Plain PNM decoder: P1, P2, P3.

use alloc::vec::Vec;
use enough::Stop;

use super::PlainFormat;
use crate::error::{PixelCause, PixmapError};
use crate::limits::{self, Limits};
use crate::pixel::{BLACK, Color, PixelGrid, WHITE};
use crate::text::{parse_header, parse_sample, tokenize};

pub(crate) fn decode_plain(
    text: &str,
    fmt: PlainFormat,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<PixelGrid, PixmapError> {
    let tokens = tokenize(text);
    let header = parse_header(&tokens, fmt.magic(), fmt.has_max_color())?;
    if fmt.has_max_color() && header.max_color != fmt.max_color() {
        return Err(PixmapError::InvalidMaxColor {
            expected: fmt.max_color(),
            found: header.max_color,
        });
    }

    limits::check(limits, header.width, header.height)?;
    stop.check()?;

    let w = header.width as usize;
    let expected = w
        .checked_mul(header.height as usize)
        .ok_or(PixmapError::DimensionsTooLarge {
            width: header.width,
            height: header.height,
        })?;
    let body = &tokens[header.size..];
    // Rows between cancellation checks, in pixels.
    let check_every = w.saturating_mul(16).max(1);

    let pixels = match fmt {
        PlainFormat::Pbm => decode_pbm(body, expected, check_every, stop)?,
        PlainFormat::Pgm => decode_pgm(body, expected, check_every, stop)?,
        PlainFormat::Ppm => decode_ppm(body, expected, check_every, stop)?,
    };

    PixelGrid::new(header.width, header.height, pixels)
}

fn count_mismatch(fmt: PlainFormat, expected: usize, actual: usize) -> PixmapError {
    PixmapError::pixel_data(
        fmt.image_format(),
        PixelCause::CountMismatch { expected, actual },
    )
}

fn decode_pbm(
    body: &[&str],
    expected: usize,
    check_every: usize,
    stop: &dyn Stop,
) -> Result<Vec<Color>, PixmapError> {
    let actual: usize = body.iter().map(|t| t.chars().count()).sum();
    if actual != expected {
        return Err(count_mismatch(PlainFormat::Pbm, expected, actual));
    }

    let mut pixels = Vec::with_capacity(expected);
    for ch in body.iter().flat_map(|t| t.chars()) {
        if pixels.len() % check_every == 0 {
            stop.check()?;
        }
        pixels.push(if ch == '1' { WHITE } else { BLACK });
    }
    Ok(pixels)
}

fn decode_pgm(
    body: &[&str],
    expected: usize,
    check_every: usize,
    stop: &dyn Stop,
) -> Result<Vec<Color>, PixmapError> {
    if body.len() != expected {
        return Err(count_mismatch(PlainFormat::Pgm, expected, body.len()));
    }

    let mut pixels = Vec::with_capacity(expected);
    for (i, token) in body.iter().enumerate() {
        if i % check_every == 0 {
            stop.check()?;
        }
        let v = parse_sample(token, 255, PlainFormat::Pgm.image_format())? as u8;
        pixels.push(Color::new(v, v, v));
    }
    Ok(pixels)
}

fn decode_ppm(
    body: &[&str],
    expected: usize,
    check_every: usize,
    stop: &dyn Stop,
) -> Result<Vec<Color>, PixmapError> {
    let samples = expected
        .checked_mul(3)
        .ok_or_else(|| count_mismatch(PlainFormat::Ppm, expected, body.len().div_ceil(3)))?;
    if body.len() != samples {
        return Err(count_mismatch(
            PlainFormat::Ppm,
            expected,
            body.len().div_ceil(3),
        ));
    }

    let format = PlainFormat::Ppm.image_format();
    let mut pixels = Vec::with_capacity(expected);
    for (i, rgb) in body.chunks_exact(3).enumerate() {
        if i % check_every == 0 {
            stop.check()?;
        }
        let r = parse_sample(rgb[0], 255, format)? as u8;
        let g = parse_sample(rgb[1], 255, format)? as u8;
        let b = parse_sample(rgb[2], 255, format)? as u8;
        pixels.push(Color::new(r, g, b));
    }
    Ok(pixels)
}
