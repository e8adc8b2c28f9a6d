//! BMP bit unpacking and bitfield scaling.
//!
//! Scaling tables from zune-bmp 0.5.2 by Caleb Etemesi (MIT/Apache-2.0/Zlib).

/// Unpack sub-byte palette indices (1, 2 or 4 bits, MSB first) into bytes.
///
/// Fills every slot of `out`; missing input bytes read as index 0.
pub(crate) fn expand_bits_to_byte(depth: usize, input: &[u8], out: &mut [u8]) {
    debug_assert!(matches!(depth, 1 | 2 | 4));
    let per_byte = 8 / depth;
    let mask = (1u8 << depth) - 1;
    for (i, idx) in out.iter_mut().enumerate() {
        let byte = input.get(i / per_byte).copied().unwrap_or(0);
        let shift = 8 - depth * (i % per_byte + 1);
        *idx = (byte >> shift) & mask;
    }
}

/// Bitfield shift/scale table for converting N-bit values to 8-bit.
const MUL_TABLE: [u32; 9] = [
    0,    // 0 bits
    0xff, // 1 bit:  0b11111111
    0x55, // 2 bits: 0b01010101
    0x49, // 3 bits: 0b01001001
    0x11, // 4 bits: 0b00010001
    0x21, // 5 bits: 0b00100001
    0x41, // 6 bits: 0b01000001
    0x81, // 7 bits: 0b10000001
    0x01, // 8 bits: 0b00000001
];

const SHIFT_TABLE: [i32; 9] = [0, 0, 0, 1, 0, 2, 4, 6, 0];

/// One channel of a BI_BITFIELDS layout.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ChannelMask {
    mask: u32,
    shift: i32,
    bits: u32,
}

impl ChannelMask {
    pub fn new(mask: u32) -> Self {
        Self {
            mask,
            shift: (32u32.wrapping_sub(mask.leading_zeros())).wrapping_sub(8) as i32,
            bits: mask.count_ones(),
        }
    }

    /// Extract this channel from a packed pixel, scaled to 0..=255.
    pub fn extract(self, packed: u32) -> u8 {
        let mut v = packed & self.mask;
        if self.shift < 0 {
            v <<= -self.shift;
        } else {
            v >>= self.shift;
        }
        let bits = self.bits.min(8);
        v >>= 8 - bits;
        ((v.wrapping_mul(MUL_TABLE[bits as usize])) >> SHIFT_TABLE[bits as usize]) as u8
    }
}
