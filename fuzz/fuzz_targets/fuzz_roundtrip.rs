#![no_main]
use libfuzzer_sys::fuzz_target;
use zenpixmap::*;

fuzz_target!(|data: &[u8]| {
    // Any grid a decoder accepts must survive the lossless encoders unchanged
    let Some((&selector, doc)) = data.split_first() else {
        return;
    };
    let format = ImageFormat::ALL[usize::from(selector) % ImageFormat::ALL.len()];
    let limits = Limits {
        max_pixels: Some(1 << 16),
        ..Default::default()
    };
    let Ok(grid) = DecodeRequest::new(doc, format)
        .with_limits(&limits)
        .decode(enough::Unstoppable)
    else {
        return;
    };

    for out in [ImageFormat::P3, ImageFormat::Xpm, ImageFormat::Sixel, ImageFormat::Bmp] {
        let encoded = encode(&grid, out, enough::Unstoppable)
            .unwrap_or_else(|e| panic!("{out} encode failed: {e}"));
        let Ok(back) = decode(&encoded, out, enough::Unstoppable) else {
            panic!("re-encoded {out} failed to decode");
        };
        assert_eq!(back, grid, "{format} -> {out} roundtrip mismatch");
    }
});
