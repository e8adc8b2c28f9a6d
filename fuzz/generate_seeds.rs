#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    fs::write(format!("{dir}/p1_2x2.txt"), b"P1\n2 2\n1 0\n0 1").unwrap();
    fs::write(format!("{dir}/p2_3x1.txt"), b"P2\n3 1\n255\n0 128 255").unwrap();
    fs::write(format!("{dir}/p3_1x1.txt"), b"P3 1 1 255 10 20 30").unwrap();
    fs::write(
        format!("{dir}/xpm_2x2.txt"),
        b"XPM2\n2 2\n2\n1\n0 c #FF0000\n1 c #00FF00\n01\n10\n",
    )
    .unwrap();
    fs::write(
        format!("{dir}/sxl_2x2.txt"),
        b"#0;10,20,30 \n#1;40,50,60 \n0;1 \n1 \n",
    )
    .unwrap();

    // Minimal BMP 1x1 24-bit
    let mut bmp = vec![0u8; 58]; // 54 header + 4 pixel (3 + 1 padding)
    bmp[0] = b'B'; bmp[1] = b'M';
    bmp[2..6].copy_from_slice(&58u32.to_le_bytes()); // file size
    bmp[10..14].copy_from_slice(&54u32.to_le_bytes()); // data offset
    bmp[14..18].copy_from_slice(&40u32.to_le_bytes()); // DIB header size
    bmp[18..22].copy_from_slice(&1i32.to_le_bytes()); // width
    bmp[22..26].copy_from_slice(&1i32.to_le_bytes()); // height
    bmp[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    bmp[28..30].copy_from_slice(&24u16.to_le_bytes()); // bpp
    bmp[54] = 0xff; bmp[55] = 0x00; bmp[56] = 0x00; // BGR
    fs::write(format!("{dir}/bmp_1x1.bmp"), bmp).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/just_p3.txt"), b"P3").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    fs::write(format!("{dir}/xpm_no_table.txt"), b"XPM2 1 1 4 1").unwrap();

    println!("Generated seed corpus in {dir}/");
}

