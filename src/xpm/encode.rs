use alloc::vec::Vec;
use core::fmt::Write as _;
use enough::Stop;

use super::{MAGIC, chars_per_pixel};
use crate::error::PixmapError;
use crate::palette::Palette;
use crate::pixel::PixelGrid;

/// Encode as XPM2. The declared color count is the real palette size and the
/// declared chars per pixel is the width of every code written.
pub(crate) fn encode_xpm(grid: &PixelGrid, stop: &dyn Stop) -> Result<Vec<u8>, PixmapError> {
    let (palette, indices) = Palette::index_grid(grid);
    let cpp = chars_per_pixel(palette.len());
    let w = grid.width() as usize;

    let mut out = alloc::format!(
        "{MAGIC}\n{} {}\n{}\n{cpp}\n",
        grid.width(),
        grid.height(),
        palette.len()
    );
    out.reserve(palette.len() * (cpp + 11) + indices.len() * cpp + grid.height() as usize);

    // Writing into a String cannot fail.
    for (i, c) in palette.colors().iter().enumerate() {
        let _ = writeln!(out, "{i:0cpp$X} c #{:02X}{:02X}{:02X}", c.r, c.g, c.b);
    }

    for (y, row) in indices.chunks_exact(w).enumerate() {
        if y % 16 == 0 {
            stop.check()?;
        }
        for idx in row {
            let _ = write!(out, "{idx:0cpp$X}");
        }
        out.push('\n');
    }

    Ok(out.into_bytes())
}
