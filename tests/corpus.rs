//! Test corpus: roundtrips with various patterns, sizes, and formats.

use enough::Unstoppable;
use zenpixmap::*;

fn checkerboard(w: u32, h: u32) -> PixelGrid {
    let mut pixels = Vec::with_capacity((w * h) as usize);
    for y in 0..h {
        for x in 0..w {
            pixels.push(if (x + y) % 2 == 0 {
                Color::new(200, 220, 240)
            } else {
                Color::new(10, 40, 70)
            });
        }
    }
    PixelGrid::new(w, h, pixels).unwrap()
}

fn noise_pattern(w: u32, h: u32) -> PixelGrid {
    let mut state: u32 = 0xDEAD_BEEF;
    let mut next = || {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        state as u8
    };
    let pixels = (0..w * h)
        .map(|_| Color::new(next(), next(), next()))
        .collect();
    PixelGrid::new(w, h, pixels).unwrap()
}

/// Few distinct colors so palettes stay small.
fn stripes(w: u32, h: u32, colors: u8) -> PixelGrid {
    let pixels = (0..w * h)
        .map(|i| {
            let c = (i % w) as u8 % colors;
            Color::new(c * 30, 255 - c * 20, c)
        })
        .collect();
    PixelGrid::new(w, h, pixels).unwrap()
}

fn roundtrip(grid: &PixelGrid, format: ImageFormat) -> PixelGrid {
    let encoded = encode(grid, format, Unstoppable).unwrap();
    decode(&encoded, format, Unstoppable).unwrap()
}

// ── Lossless roundtrips ──────────────────────────────────────────────

#[test]
fn flat_p3_roundtrip() {
    let grid = checkerboard(8, 6);
    assert_eq!(roundtrip(&grid, ImageFormat::P3), grid);
}

#[test]
fn noise_p3_roundtrip() {
    let grid = noise_pattern(13, 7);
    assert_eq!(roundtrip(&grid, ImageFormat::P3), grid);
}

#[test]
fn stripes_xpm_roundtrip() {
    let grid = stripes(9, 4, 5);
    assert_eq!(roundtrip(&grid, ImageFormat::Xpm), grid);
}

#[test]
fn noise_xpm_roundtrip_three_char_codes() {
    // 20x20 noise has more than 256 distinct colors
    let grid = noise_pattern(20, 20);
    let encoded = String::from_utf8(encode_xpm(&grid, Unstoppable).unwrap()).unwrap();
    assert_eq!(encoded.lines().nth(3), Some("3"));
    assert_eq!(decode_xpm(encoded.as_bytes(), Unstoppable).unwrap(), grid);
}

#[test]
fn noise_sixel_roundtrip() {
    let grid = noise_pattern(10, 10);
    assert_eq!(roundtrip(&grid, ImageFormat::Sixel), grid);
}

#[test]
fn flat_bmp_roundtrip() {
    let grid = checkerboard(10, 8);
    assert_eq!(roundtrip(&grid, ImageFormat::Bmp), grid);
}

#[test]
fn noise_base64_roundtrip() {
    let grid = noise_pattern(7, 5);
    assert_eq!(roundtrip(&grid, ImageFormat::Base64), grid);
}

// ── Lossy formats ────────────────────────────────────────────────────

#[test]
fn p1_keeps_only_white() {
    let grid = checkerboard(4, 4);
    let mut pixels = grid.pixels().to_vec();
    pixels[0] = Color::new(255, 255, 255);
    pixels[5] = Color::new(255, 255, 254);
    let grid = PixelGrid::new(4, 4, pixels).unwrap();

    let back = roundtrip(&grid, ImageFormat::P1);
    for (orig, got) in grid.pixels().iter().zip(back.pixels()) {
        let white = *orig == Color::new(255, 255, 255);
        let expected = if white {
            Color::new(255, 255, 255)
        } else {
            Color::new(0, 0, 0)
        };
        assert_eq!(*got, expected);
    }
}

#[test]
fn p2_stores_channel_mean() {
    let grid = noise_pattern(6, 3);
    let back = roundtrip(&grid, ImageFormat::P2);
    for (orig, got) in grid.pixels().iter().zip(back.pixels()) {
        let mean = ((u32::from(orig.r) + u32::from(orig.g) + u32::from(orig.b)) / 3) as u8;
        assert_eq!(*got, Color::new(mean, mean, mean));
    }
}

// ── Edge cases ───────────────────────────────────────────────────────

#[test]
fn single_pixel_every_format() {
    let grid = PixelGrid::filled(1, 1, Color::new(255, 255, 255)).unwrap();
    for format in ImageFormat::ALL {
        assert_eq!(roundtrip(&grid, format), grid, "{format}");
    }
}

#[test]
fn wide_image_xpm() {
    let grid = stripes(300, 1, 7);
    assert_eq!(roundtrip(&grid, ImageFormat::Xpm), grid);
}

#[test]
fn tall_image_sixel() {
    let grid = stripes(1, 300, 3);
    assert_eq!(roundtrip(&grid, ImageFormat::Sixel), grid);
}

#[test]
fn bmp_odd_width_padding() {
    for w in 1..=5 {
        let grid = noise_pattern(w, 3);
        let encoded = encode_bmp(&grid, Unstoppable).unwrap();
        let stride = (w as usize * 3).div_ceil(4) * 4;
        assert_eq!(encoded.len(), 54 + stride * 3);
        assert_eq!(decode_bmp(&encoded, Unstoppable).unwrap(), grid);
    }
}

#[test]
fn crlf_text_documents_decode() {
    let grid = decode_p3(b"P3\r\n2 1\r\n255\r\n1 2 3\r\n4 5 6\r\n", Unstoppable).unwrap();
    assert_eq!(grid.pixels(), &[Color::new(1, 2, 3), Color::new(4, 5, 6)]);
}

#[test]
fn non_utf8_text_is_rejected() {
    assert!(matches!(
        decode_p2(b"P2 1 1 255 \xff", Unstoppable),
        Err(PixmapError::NotText(_))
    ));
}

// ── Limits ───────────────────────────────────────────────────────────

#[test]
fn limits_max_width() {
    let encoded = encode_p3(&checkerboard(10, 2), Unstoppable).unwrap();
    let limits = Limits {
        max_width: Some(9),
        ..Default::default()
    };
    let result = DecodeRequest::new(&encoded, ImageFormat::P3)
        .with_limits(&limits)
        .decode(Unstoppable);
    assert!(matches!(result, Err(PixmapError::LimitExceeded(_))));
}

#[test]
fn limits_max_pixels_xpm() {
    let encoded = encode_xpm(&stripes(4, 4, 2), Unstoppable).unwrap();
    let limits = Limits {
        max_pixels: Some(15),
        ..Default::default()
    };
    let result = DecodeRequest::new(&encoded, ImageFormat::Xpm)
        .with_limits(&limits)
        .decode(Unstoppable);
    assert!(matches!(result, Err(PixmapError::LimitExceeded(_))));
}

#[test]
fn limits_max_memory_base64() {
    let encoded = encode_base64(&checkerboard(10, 10), Unstoppable).unwrap();
    let limits = Limits {
        max_memory_bytes: Some(299),
        ..Default::default()
    };
    let result = DecodeRequest::new(&encoded, ImageFormat::Base64)
        .with_limits(&limits)
        .decode(Unstoppable);
    assert!(matches!(result, Err(PixmapError::LimitExceeded(_))));

    let limits = Limits {
        max_memory_bytes: Some(300),
        ..Default::default()
    };
    assert!(
        DecodeRequest::new(&encoded, ImageFormat::Base64)
            .with_limits(&limits)
            .decode(Unstoppable)
            .is_ok()
    );
}

#[test]
fn limits_pass_through_conversion() {
    let encoded = encode_sixel(&checkerboard(3, 3), Unstoppable).unwrap();
    let limits = Limits {
        max_height: Some(2),
        ..Default::default()
    };
    let result = Conversion::resolve("sxl", "p3")
        .unwrap()
        .run(&encoded, Some(&limits), Unstoppable);
    assert!(matches!(result, Err(PixmapError::LimitExceeded(_))));
}

// ── Cancellation ─────────────────────────────────────────────────────

struct Cancelled;

impl Stop for Cancelled {
    fn check(&self) -> Result<(), StopReason> {
        Err(StopReason::Cancelled)
    }
}

#[test]
fn cancelled_stop_aborts_every_codec() {
    let grid = checkerboard(4, 4);
    for format in ImageFormat::ALL {
        assert!(
            matches!(
                encode(&grid, format, Cancelled),
                Err(PixmapError::Cancelled(_))
            ),
            "encode {format}"
        );
        let encoded = encode(&grid, format, Unstoppable).unwrap();
        assert!(
            matches!(
                decode(&encoded, format, Cancelled),
                Err(PixmapError::Cancelled(_))
            ),
            "decode {format}"
        );
    }
}
