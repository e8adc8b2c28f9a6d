//! BMP encoder: uncompressed 24-bit, bottom-up.

use alloc::vec::Vec;
use enough::Stop;

use crate::error::PixmapError;
use crate::pixel::PixelGrid;

pub(crate) fn encode_bmp(grid: &PixelGrid, stop: &dyn Stop) -> Result<Vec<u8>, PixmapError> {
    let (width, height) = (grid.width(), grid.height());
    let w = width as usize;
    let h = height as usize;
    if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
        return Err(PixmapError::DimensionsTooLarge { width, height });
    }

    let row_stride = w
        .checked_mul(3)
        .and_then(|r| r.checked_add(3))
        .map(|r| r & !3)
        .ok_or(PixmapError::DimensionsTooLarge { width, height })?;
    let pixel_data_size = row_stride
        .checked_mul(h)
        .ok_or(PixmapError::DimensionsTooLarge { width, height })?;
    let file_size = pixel_data_size
        .checked_add(54)
        .filter(|&n| u32::try_from(n).is_ok())
        .ok_or(PixmapError::DimensionsTooLarge { width, height })?;

    let mut out = Vec::with_capacity(file_size);
    write_bmp_header(&mut out, file_size, pixel_data_size, width, height);

    let pad_bytes = row_stride - w * 3;
    for (n, row) in grid.rows().rev().enumerate() {
        if n % 16 == 0 {
            stop.check()?;
        }
        for px in row.iter() {
            out.extend_from_slice(&[px.b, px.g, px.r]);
        }
        out.extend(core::iter::repeat_n(0u8, pad_bytes));
    }

    Ok(out)
}

fn write_bmp_header(
    out: &mut Vec<u8>,
    file_size: usize,
    pixel_data_size: usize,
    width: u32,
    height: u32,
) {
    // File header (14 bytes)
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&(file_size as u32).to_le_bytes());
    out.extend_from_slice(&[0u8; 4]); // reserved
    out.extend_from_slice(&54u32.to_le_bytes()); // data offset

    // DIB header (BITMAPINFOHEADER, 40 bytes)
    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&(width as i32).to_le_bytes());
    out.extend_from_slice(&(height as i32).to_le_bytes()); // positive = bottom-up
    out.extend_from_slice(&1u16.to_le_bytes()); // planes
    out.extend_from_slice(&24u16.to_le_bytes()); // bpp
    out.extend_from_slice(&0u32.to_le_bytes()); // compression
    out.extend_from_slice(&(pixel_data_size as u32).to_le_bytes());
    out.extend_from_slice(&2835u32.to_le_bytes()); // h resolution (72 DPI)
    out.extend_from_slice(&2835u32.to_le_bytes()); // v resolution
    out.extend_from_slice(&0u32.to_le_bytes()); // colors used
    out.extend_from_slice(&0u32.to_le_bytes()); // important colors
}
