#![no_main]
use libfuzzer_sys::fuzz_target;
use zenpixmap::ImageFormat;

fuzz_target!(|data: &[u8]| {
    // Every decoder must reject garbage without panicking
    for format in ImageFormat::ALL {
        let _ = zenpixmap::decode(data, format, enough::Unstoppable);
    }
});
