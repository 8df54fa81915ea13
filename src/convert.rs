//! Pure, dependency-free conversion laws between pixel representations.
//!
//! These do not touch files or process boundaries; they exist so a caller
//! that already has 8-bit or RGB samples in hand can get them into the
//! 16-bit grayscale representation the rest of the core works with.

/// Widens an 8-bit sample to 16 bits.
pub fn u8_to_u16(value: u8) -> u16 {
    value as u16 * 255
}

/// Narrows a 16-bit sample produced by [`u8_to_u16`] back to 8 bits.
///
/// Only exact for inputs that are themselves a multiple of 255; other values
/// round down, same as integer division.
pub fn u16_to_u8(value: u16) -> u8 {
    (value / 255) as u8
}

/// Collapses an RGB triple to a single grayscale sample via arithmetic mean.
pub fn rgb_to_mono(r: u8, g: u8, b: u8) -> u16 {
    let mean = (r as u32 + g as u32 + b as u32) / 3;
    u8_to_u16(mean as u8)
}

/// Packs an RGB triple into a single 16-bit value.
///
/// `(R | G<<8 | B<<16) * 2/3`, scaled down to fit 16 bits. This fixes a
/// source bug that assigned the same byte to every channel instead of
/// spreading the three input bytes across the packed word.
pub fn rgb_to_color(r: u8, g: u8, b: u8) -> u16 {
    let packed = r as u64 | (g as u64) << 8 | (b as u64) << 16;
    ((packed * 2 / 3) & 0xFFFF) as u16
}
