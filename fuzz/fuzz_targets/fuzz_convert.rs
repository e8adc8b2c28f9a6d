#![no_main]
use libfuzzer_sys::fuzz_target;
use zenpixmap::*;

fuzz_target!(|data: &[u8]| {
    // Arbitrary tag pairs over arbitrary bytes: errors are fine, panics are not
    let [a, b, doc @ ..] = data else {
        return;
    };
    let n = ImageFormat::ALL.len();
    let from = ImageFormat::ALL[usize::from(*a) % n];
    let to = ImageFormat::ALL[usize::from(*b) % n];
    let limits = Limits {
        max_pixels: Some(1 << 16),
        ..Default::default()
    };
    let _ = Conversion::new(from, to).run(doc, Some(&limits), enough::Unstoppable);
});
