use alloc::vec::Vec;
use core::fmt::Write as _;
use enough::Stop;

use crate::error::PixmapError;
use crate::palette::Palette;
use crate::pixel::PixelGrid;

/// Palette lines, then one line of `;`-joined indices per row.
///
/// Every line ends in `" \n"`: the space keeps entries apart when a
/// transport strips line breaks before the document is decoded.
pub(crate) fn encode_sixel(grid: &PixelGrid, stop: &dyn Stop) -> Result<Vec<u8>, PixmapError> {
    let (palette, indices) = Palette::index_grid(grid);
    let w = grid.width() as usize;

    let mut out = alloc::string::String::with_capacity(palette.len() * 16 + indices.len() * 4);

    // Writing into a String cannot fail.
    for (i, c) in palette.colors().iter().enumerate() {
        let _ = writeln!(out, "#{i};{},{},{} ", c.r, c.g, c.b);
    }

    for (y, row) in indices.chunks_exact(w).enumerate() {
        if y % 16 == 0 {
            stop.check()?;
        }
        for (x, idx) in row.iter().enumerate() {
            if x > 0 {
                out.push(';');
            }
            let _ = write!(out, "{idx}");
        }
        out.push_str(" \n");
    }

    Ok(out.into_bytes())
}
