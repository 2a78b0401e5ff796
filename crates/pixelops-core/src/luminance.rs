//! Luminance calculation using ITU-R BT.601 coefficients.
//!
//! Used when a color operand has to be reduced to grayscale before being
//! combined with a grayscale one. BT.601 is the weighting conventional
//! 8-bit "L" conversions use, so a color image converted here matches what
//! other tools produce for the same file.

/// ITU-R BT.601 coefficient for the red channel.
pub const LUMA_R: f32 = 0.299;

/// ITU-R BT.601 coefficient for the green channel.
pub const LUMA_G: f32 = 0.587;

/// ITU-R BT.601 coefficient for the blue channel.
pub const LUMA_B: f32 = 0.114;

/// Calculate luminance from normalized RGB values (0.0 to 1.0).
#[inline]
pub fn calculate_luminance(r: f32, g: f32, b: f32) -> f32 {
    LUMA_R * r + LUMA_G * g + LUMA_B * b
}

/// Calculate luminance from u8 RGB values, rounded to the nearest level.
#[inline]
pub fn calculate_luminance_u8(r: u8, g: u8, b: u8) -> u8 {
    let lum = calculate_luminance(r as f32, g as f32, b as f32);
    lum.clamp(0.0, 255.0).round() as u8
}
