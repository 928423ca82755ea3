//! Grayscale conversion using ITU-R BT.601 luma weights.
//!
//! Binarize and deskew both work on a single intensity channel. The weights
//! are applied in 14-bit fixed point so that the result is bit-exact across
//! platforms:
//!
//! ```text
//! Y = (4899 * R + 9617 * G + 1868 * B + 8192) >> 14
//! ```
//!
//! which is `0.299 R + 0.587 G + 0.114 B` rounded to the nearest integer.

/// ITU-R BT.601 coefficient for the red channel.
pub const LUMA_R: f32 = 0.299;

/// ITU-R BT.601 coefficient for the green channel.
pub const LUMA_G: f32 = 0.587;

/// ITU-R BT.601 coefficient for the blue channel.
pub const LUMA_B: f32 = 0.114;

const FIXED_SHIFT: u32 = 14;
const FIXED_R: u32 = 4899;
const FIXED_G: u32 = 9617;
const FIXED_B: u32 = 1868;

/// Calculate BT.601 luma from u8 RGB values (0 to 255).
#[inline]
pub fn luma_u8(r: u8, g: u8, b: u8) -> u8 {
    let y = FIXED_R * r as u32 + FIXED_G * g as u32 + FIXED_B * b as u32 + (1 << (FIXED_SHIFT - 1));
    // The weights sum to 1 << 14, so the shifted value never exceeds 255.
    (y >> FIXED_SHIFT) as u8
}

/// Convert an interleaved RGB buffer to one luma byte per pixel.
pub fn rgb_to_luma(pixels: &[u8]) -> Vec<u8> {
    pixels
        .chunks_exact(3)
        .map(|px| luma_u8(px[0], px[1], px[2]))
        .collect()
}
