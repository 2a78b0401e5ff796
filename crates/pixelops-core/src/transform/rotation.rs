//! Image rotation about the center with an expand-to-fit canvas.
//!
//! Right angles are exact index permutations. Every other angle uses
//! inverse mapping: for each pixel in the output we find where it came from
//! in the source and interpolate there.
//!
//! For a counter-clockwise rotation by `a` in image coordinates (y down),
//! the inverse transform is:
//! ```text
//! src_x = dx * cos(a) - dy * sin(a) + src_cx
//! src_y = dx * sin(a) + dy * cos(a) + src_cy
//! ```
//! where `(dx, dy)` is the output pixel center relative to the output center.
//!
//! The public entry point takes clockwise degrees and negates them before
//! calling the counter-clockwise primitive.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{TransformError, TransformResult};
use crate::raster::RasterImage;

/// Sample value written where the rotated content does not cover the canvas.
///
/// Zero in every channel: black for Gray/RGB, transparent black for RGBA.
pub const BACKGROUND_SAMPLE: u8 = 0;

/// A rotation angle in whole degrees, clockwise for positive values.
///
/// Valid angles lie strictly between -360 and 360.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct RotationAngle(i32);

impl RotationAngle {
    /// Smallest accepted angle.
    pub const MIN: i32 = -359;
    /// Largest accepted angle.
    pub const MAX: i32 = 359;

    pub fn new(degrees: i32) -> TransformResult<Self> {
        if !(-360 < degrees && degrees < 360) {
            return Err(TransformError::invalid(format!(
                "angle {} outside ({}, {}) degrees",
                degrees,
                Self::MIN,
                Self::MAX
            )));
        }
        Ok(Self(degrees))
    }

    #[inline]
    pub fn degrees(self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for RotationAngle {
    type Error = TransformError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RotationAngle> for i32 {
    fn from(angle: RotationAngle) -> Self {
        angle.0
    }
}

/// Interpolation filter for non-right-angle rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationFilter {
    /// Pick the closest source pixel. Hard edges, no new sample values.
    Nearest,
    /// Weight the four surrounding source pixels.
    #[default]
    Bilinear,
}

/// Compute the dimensions of the bounding box for a rotated image.
///
/// When an image is rotated, the corners extend beyond the original bounds.
/// This returns the smallest canvas containing the entire rotated image.
/// The sign of the angle does not matter.
///
/// # Example
///
/// ```
/// use pixelops_core::transform::compute_rotated_bounds;
///
/// // 90-degree rotation swaps dimensions
/// assert_eq!(compute_rotated_bounds(100, 50, 90.0), (50, 100));
/// ```
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    let angle_normalized = angle_degrees.rem_euclid(360.0);

    // Fast paths for near-right angles avoid floating-point growth
    for (right, swaps) in [(0.0, false), (90.0, true), (180.0, false), (270.0, true), (360.0, false)] {
        if (angle_normalized - right).abs() < 0.001 {
            return if swaps { (height, width) } else { (width, height) };
        }
    }

    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos().abs();
    let sin = angle_rad.sin().abs();

    let w = width as f64;
    let h = height as f64;

    // new_w = |w*cos| + |h*sin|, new_h = |w*sin| + |h*cos|
    let new_w = (w * cos + h * sin).round() as u32;
    let new_h = (w * sin + h * cos).round() as u32;

    (new_w.max(1), new_h.max(1))
}

/// Rotate an image clockwise by a validated angle.
///
/// Uses bilinear interpolation for angles that are not multiples of 90.
pub fn rotate(image: &RasterImage, angle: RotationAngle) -> RasterImage {
    rotate_with_filter(image, angle, InterpolationFilter::default())
}

/// Rotate an image clockwise by a validated angle using the given filter.
pub fn rotate_with_filter(
    image: &RasterImage,
    angle: RotationAngle,
    filter: InterpolationFilter,
) -> RasterImage {
    debug!(
        angle = angle.degrees(),
        ?filter,
        width = image.width(),
        height = image.height(),
        "rotate"
    );
    rotate_counter_clockwise(image, -(angle.degrees() as f64), filter)
}

/// Rotate an image counter-clockwise by `angle_degrees`.
///
/// The canvas expands to hold the whole rotated image. Pixels not covered by
/// the source are filled with [`BACKGROUND_SAMPLE`].
pub fn rotate_counter_clockwise(
    image: &RasterImage,
    angle_degrees: f64,
    filter: InterpolationFilter,
) -> RasterImage {
    let normalized = angle_degrees.rem_euclid(360.0);
    let whole = normalized.round();
    if (normalized - whole).abs() < 1e-9 && (whole as i64) % 90 == 0 {
        return rotate_quarter_turns(image, (whole as i64 / 90) as u32);
    }

    let (dst_w, dst_h) = compute_rotated_bounds(image.width(), image.height(), angle_degrees);
    let channels = image.channels();

    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos();
    let sin = angle_rad.sin();

    let src_cx = image.width() as f64 / 2.0;
    let src_cy = image.height() as f64 / 2.0;
    let dst_cx = dst_w as f64 / 2.0;
    let dst_cy = dst_h as f64 / 2.0;

    let mut output = vec![BACKGROUND_SAMPLE; dst_w as usize * dst_h as usize * channels];
    let mut pixel = vec![0u8; channels];

    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            // Work with pixel centers so the mapping is symmetric
            let dx = dst_x as f64 + 0.5 - dst_cx;
            let dy = dst_y as f64 + 0.5 - dst_cy;

            let src_x = dx * cos - dy * sin + src_cx - 0.5;
            let src_y = dx * sin + dy * cos + src_cy - 0.5;

            let covered = match filter {
                InterpolationFilter::Nearest => sample_nearest(image, src_x, src_y, &mut pixel),
                InterpolationFilter::Bilinear => sample_bilinear(image, src_x, src_y, &mut pixel),
            };

            if covered {
                let dst_idx = (dst_y as usize * dst_w as usize + dst_x as usize) * channels;
                output[dst_idx..dst_idx + channels].copy_from_slice(&pixel);
            }
        }
    }

    RasterImage::from_parts(dst_w, dst_h, image.layout(), output)
}

/// Rotate counter-clockwise by `turns` quarter turns without resampling.
fn rotate_quarter_turns(image: &RasterImage, turns: u32) -> RasterImage {
    let (w, h) = (image.width(), image.height());
    let turns = turns % 4;
    if turns == 0 {
        return image.clone();
    }

    let (dst_w, dst_h) = if turns % 2 == 1 { (h, w) } else { (w, h) };
    let channels = image.channels();
    let mut output = Vec::with_capacity(image.samples().len());

    for y in 0..dst_h {
        for x in 0..dst_w {
            let (sx, sy) = match turns {
                // Right column becomes the top row
                1 => (w - 1 - y, x),
                2 => (w - 1 - x, h - 1 - y),
                // Left column becomes the top row
                _ => (y, h - 1 - x),
            };
            output.extend_from_slice(image.pixel(sx, sy));
        }
    }

    debug_assert_eq!(output.len(), dst_w as usize * dst_h as usize * channels);
    RasterImage::from_parts(dst_w, dst_h, image.layout(), output)
}

/// Sample the closest source pixel. Returns false outside the source.
fn sample_nearest(image: &RasterImage, x: f64, y: f64, out: &mut [u8]) -> bool {
    let px = x.round();
    let py = y.round();
    if px < 0.0 || py < 0.0 || px >= image.width() as f64 || py >= image.height() as f64 {
        return false;
    }
    out.copy_from_slice(image.pixel(px as u32, py as u32));
    true
}

/// Sample using bilinear interpolation.
///
/// Neighbors that fall outside the source contribute the background value,
/// so edges fade into the fill instead of being cut hard. Returns false when
/// no neighbor lies inside the source.
fn sample_bilinear(image: &RasterImage, x: f64, y: f64, out: &mut [u8]) -> bool {
    let (w, h) = (image.width() as i64, image.height() as i64);

    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;
    if x0 + 1 < 0 || y0 + 1 < 0 || x0 >= w || y0 >= h {
        return false;
    }

    // Fractional distances
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let corners = [
        (x0, y0, (1.0 - fx) * (1.0 - fy)),
        (x0 + 1, y0, fx * (1.0 - fy)),
        (x0, y0 + 1, (1.0 - fx) * fy),
        (x0 + 1, y0 + 1, fx * fy),
    ];

    for (c, sample) in out.iter_mut().enumerate() {
        let mut v = 0.0;
        for &(px, py, weight) in &corners {
            let s = if px >= 0 && px < w && py >= 0 && py < h {
                image.pixel(px as u32, py as u32)[c] as f64
            } else {
                BACKGROUND_SAMPLE as f64
            };
            v += s * weight;
        }
        *sample = v.clamp(0.0, 255.0).round() as u8;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::PixelLayout;

    /// Create a test image where every sample is unique to its position.
    fn test_image(width: u32, height: u32, layout: PixelLayout) -> RasterImage {
        let c = layout.channels() as u32;
        let samples = (0..width * height * c)
            .map(|i| (i % 251) as u8)
            .collect();
        RasterImage::new(width, height, layout, samples).unwrap()
    }

    fn angle(d: i32) -> RotationAngle {
        RotationAngle::new(d).unwrap()
    }

    #[test]
    fn test_angle_validation() {
        assert!(RotationAngle::new(0).is_ok());
        assert!(RotationAngle::new(359).is_ok());
        assert!(RotationAngle::new(-359).is_ok());
        assert!(matches!(
            RotationAngle::new(360),
            Err(TransformError::InvalidParameter(_))
        ));
        assert!(matches!(
            RotationAngle::new(-360),
            Err(TransformError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_no_rotation_is_identity() {
        let img = test_image(10, 7, PixelLayout::Rgb);
        assert_eq!(rotate(&img, angle(0)), img);
    }

    #[test]
    fn test_90_clockwise_moves_left_column_to_top() {
        // 3x2 gray image:
        // 1 2 3
        // 4 5 6
        let img = RasterImage::new(3, 2, PixelLayout::Gray, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let result = rotate(&img, angle(90));

        assert_eq!(result.width(), 2);
        assert_eq!(result.height(), 3);
        // Clockwise:
        // 4 1
        // 5 2
        // 6 3
        assert_eq!(result.samples(), &[4, 1, 5, 2, 6, 3]);
    }

    #[test]
    fn test_90_counter_clockwise_moves_right_column_to_top() {
        let img = RasterImage::new(3, 2, PixelLayout::Gray, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let result = rotate(&img, angle(-90));
        // 3 6
        // 2 5
        // 1 4
        assert_eq!(result.samples(), &[3, 6, 2, 5, 1, 4]);
    }

    #[test]
    fn test_180_reverses_pixels() {
        let img = RasterImage::new(3, 2, PixelLayout::Gray, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let result = rotate(&img, angle(180));
        assert_eq!(result.samples(), &[6, 5, 4, 3, 2, 1]);
        assert_eq!(rotate(&img, angle(-180)), result);
    }

    #[test]
    fn test_270_equals_minus_90() {
        let img = test_image(5, 3, PixelLayout::Rgba);
        assert_eq!(rotate(&img, angle(270)), rotate(&img, angle(-90)));
        assert_eq!(rotate(&img, angle(-270)), rotate(&img, angle(90)));
    }

    #[test]
    fn test_right_angle_round_trip_exact() {
        let img = test_image(9, 4, PixelLayout::Rgb);
        let there = rotate(&img, angle(90));
        let back = rotate(&there, angle(-90));
        assert_eq!(back, img);
    }

    #[test]
    fn test_90_degree_rotation_bounds() {
        assert_eq!(compute_rotated_bounds(100, 50, 90.0), (50, 100));
        assert_eq!(compute_rotated_bounds(100, 50, -90.0), (50, 100));
    }

    #[test]
    fn test_180_degree_rotation_bounds() {
        assert_eq!(compute_rotated_bounds(100, 50, 180.0), (100, 50));
    }

    #[test]
    fn test_45_degree_rotation_bounds() {
        let (w, h) = compute_rotated_bounds(100, 100, 45.0);
        // Diagonal of 100x100 square is ~141.4
        assert!(w > 140 && w < 143, "width was {}", w);
        assert!(h > 140 && h < 143, "height was {}", h);
    }

    #[test]
    fn test_negative_rotation_bounds() {
        assert_eq!(
            compute_rotated_bounds(100, 50, 30.0),
            compute_rotated_bounds(100, 50, -30.0)
        );
    }

    #[test]
    fn test_bounds_never_zero() {
        for a in [1.0, 15.0, 45.0, 89.0, 90.0, 135.0, 179.0, 180.0, 270.0, 359.0] {
            let (w, h) = compute_rotated_bounds(10, 10, a);
            assert!(w > 0 && h > 0, "angle {}", a);
        }
    }

    #[test]
    fn test_rotation_expands_canvas() {
        let img = test_image(100, 100, PixelLayout::Rgb);
        let result = rotate(&img, angle(45));
        assert!(result.width() > img.width());
        assert!(result.height() > img.height());
        assert_eq!(result.layout(), PixelLayout::Rgb);
    }

    #[test]
    fn test_corners_filled_with_background() {
        let img = RasterImage::filled(40, 40, PixelLayout::Rgba, 255).unwrap();
        let result = rotate(&img, angle(45));
        // The top-left corner of the expanded canvas is outside the source
        assert_eq!(result.pixel(0, 0), &[0, 0, 0, 0]);
        // The center is fully covered
        let (cx, cy) = (result.width() / 2, result.height() / 2);
        assert_eq!(result.pixel(cx, cy), &[255, 255, 255, 255]);
    }

    #[test]
    fn test_nearest_produces_only_source_values() {
        let img = RasterImage::new(2, 2, PixelLayout::Gray, vec![10, 20, 30, 40]).unwrap();
        let result = rotate_with_filter(&img, angle(30), InterpolationFilter::Nearest);
        for &v in result.samples() {
            assert!([0, 10, 20, 30, 40].contains(&v), "unexpected sample {}", v);
        }
    }

    #[test]
    fn test_arbitrary_round_trip_within_tolerance() {
        // Smooth gradient so bilinear resampling error stays small
        let mut samples = Vec::new();
        for y in 0..32u32 {
            for x in 0..32u32 {
                samples.push((x * 4 + y * 2) as u8);
            }
        }
        let img = RasterImage::new(32, 32, PixelLayout::Gray, samples).unwrap();
        let there = rotate(&img, angle(30));
        let back = rotate(&there, angle(-30));

        // Compare the interior, away from the faded borders
        let off_x = (back.width() - img.width()) / 2;
        let off_y = (back.height() - img.height()) / 2;
        for y in 8..24 {
            for x in 8..24 {
                let a = img.pixel(x, y)[0] as i32;
                let b = back.pixel(x + off_x, y + off_y)[0] as i32;
                assert!((a - b).abs() <= 8, "({}, {}): {} vs {}", x, y, a, b);
            }
        }
    }

    #[test]
    fn test_1x1_image_rotation() {
        let img = RasterImage::new(1, 1, PixelLayout::Rgb, vec![128, 128, 128]).unwrap();
        let result = rotate(&img, angle(45));
        assert!(result.width() >= 1);
        assert!(result.height() >= 1);
    }

    #[test]
    fn test_very_thin_image_rotation() {
        let img = test_image(100, 1, PixelLayout::Gray);
        let result = rotate(&img, angle(45));
        assert!(result.width() > 0);
        assert!(result.height() > 0);
    }

    #[test]
    fn test_angle_serde_rejects_out_of_range() {
        let ok: RotationAngle = serde_json::from_str("-45").unwrap();
        assert_eq!(ok.degrees(), -45);
        assert!(serde_json::from_str::<RotationAngle>("720").is_err());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
