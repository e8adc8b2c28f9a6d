//! Plain PNM encoder: P1, P2, P3.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write as _;
use enough::Stop;

use super::PlainFormat;
use crate::error::PixmapError;
use crate::pixel::{PixelGrid, WHITE};

/// Header lines, then one line per row. Rows are joined by `\n` with no
/// trailing newline.
pub(crate) fn encode_plain(
    grid: &PixelGrid,
    fmt: PlainFormat,
    stop: &dyn Stop,
) -> Result<Vec<u8>, PixmapError> {
    let (width, height) = (grid.width(), grid.height());
    let mut out = match fmt {
        PlainFormat::Pbm => alloc::format!("P1\n{width} {height}\n"),
        PlainFormat::Pgm => alloc::format!("P2\n{width} {height}\n255\n"),
        PlainFormat::Ppm => alloc::format!("P3\n{width} {height}\n255\n"),
    };
    let per_pixel = match fmt {
        PlainFormat::Pbm => 2,
        PlainFormat::Pgm => 4,
        PlainFormat::Ppm => 12,
    };
    out.reserve(grid.pixels().len().saturating_mul(per_pixel));

    for (y, row) in grid.rows().enumerate() {
        if y % 16 == 0 {
            stop.check()?;
        }
        if y > 0 {
            out.push('\n');
        }
        for (x, px) in row.iter().enumerate() {
            if x > 0 {
                out.push(' ');
            }
            match fmt {
                PlainFormat::Pbm => out.push(if *px == WHITE { '1' } else { '0' }),
                PlainFormat::Pgm => {
                    let grey = (u32::from(px.r) + u32::from(px.g) + u32::from(px.b)) / 3;
                    push_fmt(&mut out, format_args!("{grey}"));
                }
                PlainFormat::Ppm => {
                    push_fmt(&mut out, format_args!("{} {} {}", px.r, px.g, px.b));
                }
            }
        }
    }

    Ok(out.into_bytes())
}

fn push_fmt(out: &mut String, args: core::fmt::Arguments<'_>) {
    // Writing into a String cannot fail.
    let _ = out.write_fmt(args);
}
