//! BMP decoder: uncompressed 1/2/4/8-bit palettized, 16, 24 and 32-bit.
//!
//! Header handling follows zune-bmp 0.5.2 by Caleb Etemesi
//! (MIT/Apache-2.0/Zlib). Every failure is reported as
//! [`PixmapError::InvalidBitmap`].

use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use enough::Stop;

use super::utils::{ChannelMask, expand_bits_to_byte};
use crate::error::PixmapError;
use crate::limits::{self, Limits};
use crate::pixel::{Color, PixelGrid};

fn invalid(msg: impl Into<String>) -> PixmapError {
    PixmapError::InvalidBitmap(msg.into())
}

// ── Cursor for reading from &[u8] ───────────────────────────────────

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn set_position(&mut self, pos: usize) -> Result<(), PixmapError> {
        if pos > self.data.len() {
            return Err(invalid("offset past end of data"));
        }
        self.pos = pos;
        Ok(())
    }

    fn read_fixed_bytes<const N: usize>(&mut self) -> Result<[u8; N], PixmapError> {
        let bytes = self
            .data
            .get(self.pos..self.pos.saturating_add(N))
            .ok_or_else(|| invalid("unexpected end of data"))?;
        let mut buf = [0u8; N];
        buf.copy_from_slice(bytes);
        self.pos += N;
        Ok(buf)
    }

    fn get_u16_le(&mut self) -> Result<u16, PixmapError> {
        self.read_fixed_bytes::<2>().map(u16::from_le_bytes)
    }

    fn get_u32_le(&mut self) -> Result<u32, PixmapError> {
        self.read_fixed_bytes::<4>().map(u32::from_le_bytes)
    }
}

// ── Parsed header ───────────────────────────────────────────────────

#[derive(Debug, Eq, PartialEq, Copy, Clone)]
enum Compression {
    Rgb,
    Bitfields,
}

/// How one stored row maps to pixels.
#[derive(Debug, Clone)]
enum RowLayout {
    /// 1, 2, 4 or 8-bit indices into the palette.
    Indexed { depth: u16, palette: Vec<Color> },
    /// 16 or 32-bit packed pixels.
    Packed {
        depth: u16,
        masks: [ChannelMask; 3],
    },
    /// 24-bit BGR.
    Bgr,
    /// 32-bit BGRX.
    Bgrx,
}

struct BmpHeader {
    width: u32,
    height: u32,
    top_down: bool,
    depth: u16,
    layout: RowLayout,
    data_offset: usize,
}

fn parse_header(data: &[u8]) -> Result<BmpHeader, PixmapError> {
    if data.is_empty() {
        return Err(invalid("empty input"));
    }
    let mut bytes = Cursor::new(data);

    if bytes.read_fixed_bytes::<2>()? != *b"BM" {
        return Err(invalid("missing 'BM' signature"));
    }
    let _file_size = bytes.get_u32_le()?;
    let _reserved = bytes.get_u32_le()?;
    let hsize = bytes.get_u32_le()?;
    let ihsize = bytes.get_u32_le()?;

    if ihsize.saturating_add(14) > hsize {
        return Err(invalid("pixel data offset overlaps the header"));
    }

    let (raw_width, raw_height, planes, depth, compression, colors_used);
    match ihsize {
        12 => {
            // OS/2 BMPv1: unsigned 16-bit dimensions, always bottom-up
            raw_width = i32::from(bytes.get_u16_le()?);
            raw_height = i32::from(bytes.get_u16_le()?);
            planes = bytes.get_u16_le()?;
            depth = bytes.get_u16_le()?;
            compression = Compression::Rgb;
            colors_used = 0;
        }
        16 | 40 | 52 | 56 | 64 | 108 | 124 => {
            raw_width = bytes.get_u32_le()? as i32;
            raw_height = bytes.get_u32_le()? as i32;
            planes = bytes.get_u16_le()?;
            depth = bytes.get_u16_le()?;
            compression = if ihsize >= 40 {
                match bytes.get_u32_le()? {
                    0 => Compression::Rgb,
                    3 | 6 => Compression::Bitfields,
                    1 | 2 => return Err(invalid("RLE compression is not supported")),
                    other => return Err(invalid(format!("unsupported compression {other}"))),
                }
            } else {
                Compression::Rgb
            };
            colors_used = if ihsize >= 40 {
                let _image_size = bytes.get_u32_le()?;
                let _x_ppm = bytes.get_u32_le()?;
                let _y_ppm = bytes.get_u32_le()?;
                let used = bytes.get_u32_le()?;
                let _important = bytes.get_u32_le()?;
                used
            } else {
                0
            };
        }
        _ => return Err(invalid(format!("unknown info header size {ihsize}"))),
    }

    if planes != 1 {
        return Err(invalid(format!("planes field is {planes}, expected 1")));
    }
    if raw_width <= 0 {
        return Err(invalid(format!("width is {raw_width}")));
    }
    if raw_height == 0 {
        return Err(invalid("height is 0"));
    }
    let width = raw_width as u32;
    let height = raw_height.unsigned_abs();
    let top_down = raw_height < 0;

    // Masks are embedded in V2+ headers and follow a 40-byte header when
    // compression is BI_BITFIELDS.
    let masks = if compression == Compression::Bitfields {
        let r = bytes.get_u32_le()?;
        let g = bytes.get_u32_le()?;
        let b = bytes.get_u32_le()?;
        Some([r, g, b])
    } else {
        None
    };

    let layout = match (depth, masks) {
        (1 | 2 | 4 | 8, None) => {
            let palette = read_palette(&mut bytes, ihsize, hsize, depth, colors_used)?;
            RowLayout::Indexed { depth, palette }
        }
        (16, None) => RowLayout::Packed {
            depth,
            masks: [0x7C00, 0x03E0, 0x001F].map(ChannelMask::new),
        },
        (16 | 32, Some(m)) => RowLayout::Packed {
            depth,
            masks: m.map(ChannelMask::new),
        },
        (24, None) => RowLayout::Bgr,
        (32, None) => RowLayout::Bgrx,
        (d, Some(_)) => return Err(invalid(format!("bitfields with {d}-bit depth"))),
        (d, None) => return Err(invalid(format!("{d}-bit depth is not supported"))),
    };

    Ok(BmpHeader {
        width,
        height,
        top_down,
        depth,
        layout,
        data_offset: hsize as usize,
    })
}

fn read_palette(
    bytes: &mut Cursor<'_>,
    ihsize: u32,
    hsize: u32,
    depth: u16,
    colors_used: u32,
) -> Result<Vec<Color>, PixmapError> {
    let max_colors = 1u32 << depth;
    if colors_used > max_colors {
        return Err(invalid(format!(
            "palette count {colors_used} exceeds max for {depth}-bit depth ({max_colors})"
        )));
    }
    let declared = if colors_used == 0 {
        max_colors
    } else {
        colors_used
    };

    // OS/2 entries are BGR, later headers use BGRX.
    let entry_size = if ihsize == 12 { 3 } else { 4 };
    let room = (hsize - 14 - ihsize) / entry_size;
    let count = declared.min(room) as usize;
    if count == 0 {
        return Err(invalid(format!("{depth}-bit image has no palette")));
    }

    bytes.set_position(14 + ihsize as usize)?;
    let mut palette = Vec::with_capacity(count);
    for _ in 0..count {
        let [b, g, r] = bytes.read_fixed_bytes::<3>()?;
        if entry_size == 4 {
            bytes.read_fixed_bytes::<1>()?;
        }
        palette.push(Color::new(r, g, b));
    }
    Ok(palette)
}

// ── Full decode ─────────────────────────────────────────────────────

pub(crate) fn decode_bmp(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<PixelGrid, PixmapError> {
    let header = parse_header(data)?;
    limits::check(limits, header.width, header.height)?;
    stop.check()?;

    let w = header.width as usize;
    let h = header.height as usize;
    let row_bytes = w
        .checked_mul(usize::from(header.depth))
        .map(|bits| bits.div_ceil(8))
        .ok_or(PixmapError::DimensionsTooLarge {
            width: header.width,
            height: header.height,
        })?;
    let stride = row_bytes.div_ceil(4) * 4;

    // The final row may omit its padding.
    let needed = stride
        .checked_mul(h - 1)
        .and_then(|n| n.checked_add(row_bytes))
        .ok_or(PixmapError::DimensionsTooLarge {
            width: header.width,
            height: header.height,
        })?;
    let pixel_data = data
        .get(header.data_offset..)
        .filter(|d| d.len() >= needed)
        .ok_or_else(|| invalid("truncated pixel data"))?;

    log::debug!(
        "bmp {}x{} depth {} {}",
        header.width,
        header.height,
        header.depth,
        if header.top_down { "top-down" } else { "bottom-up" }
    );

    let mut pixels = vec![Color::default(); w * h];
    let mut indices = vec![0u8; w];
    for file_row in 0..h {
        if file_row % 16 == 0 {
            stop.check()?;
        }
        let start = file_row * stride;
        let src = &pixel_data[start..start + row_bytes];
        let y = if header.top_down {
            file_row
        } else {
            h - 1 - file_row
        };
        let out = &mut pixels[y * w..(y + 1) * w];

        match &header.layout {
            RowLayout::Indexed { depth, palette } => {
                if *depth == 8 {
                    indices.copy_from_slice(&src[..w]);
                } else {
                    expand_bits_to_byte(usize::from(*depth), src, &mut indices);
                }
                for (px, &idx) in out.iter_mut().zip(indices.iter()) {
                    *px = *palette.get(usize::from(idx)).ok_or_else(|| {
                        invalid(format!(
                            "palette index {idx} out of range (palette has {} entries)",
                            palette.len()
                        ))
                    })?;
                }
            }
            RowLayout::Packed { depth, masks } => {
                let [r, g, b] = *masks;
                let size = usize::from(*depth / 8);
                for (px, raw) in out.iter_mut().zip(src.chunks_exact(size)) {
                    let v = match raw {
                        &[lo, hi] => u32::from(u16::from_le_bytes([lo, hi])),
                        &[b0, b1, b2, b3] => u32::from_le_bytes([b0, b1, b2, b3]),
                        _ => 0,
                    };
                    *px = Color::new(r.extract(v), g.extract(v), b.extract(v));
                }
            }
            RowLayout::Bgr => {
                for (px, bgr) in out.iter_mut().zip(src.chunks_exact(3)) {
                    *px = Color::new(bgr[2], bgr[1], bgr[0]);
                }
            }
            RowLayout::Bgrx => {
                for (px, bgrx) in out.iter_mut().zip(src.chunks_exact(4)) {
                    *px = Color::new(bgrx[2], bgrx[1], bgrx[0]);
                }
            }
        }
    }

    PixelGrid::new(header.width, header.height, pixels)
}
