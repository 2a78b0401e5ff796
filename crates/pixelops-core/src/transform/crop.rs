//! Rectangular cropping in pixel coordinates.
//!
//! # Coordinate System
//!
//! - (0, 0) = top-left corner
//! - The rectangle is half-open: `[x1, x2) x [y1, y2)`
//!
//! A rectangle either fits the image exactly as given or is rejected.
//! Nothing is clamped.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{TransformError, TransformResult};
use crate::raster::RasterImage;

/// A crop region given by its top-left and exclusive bottom-right corners.
///
/// Coordinates are signed so that caller input can be represented as-is and
/// rejected by [`CropRect::is_valid_for`] rather than at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRect {
    pub x1: i64,
    pub y1: i64,
    pub x2: i64,
    pub y2: i64,
}

impl CropRect {
    pub fn new(x1: i64, y1: i64, x2: i64, y2: i64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Check the rectangle against image dimensions.
    ///
    /// All six bounds must hold:
    /// `0 <= x1 < width`, `0 < x2 <= width`, `0 <= y1 < height`,
    /// `0 < y2 <= height`, `x1 < x2`, `y1 < y2`.
    pub fn is_valid_for(&self, width: u32, height: u32) -> bool {
        let (w, h) = (width as i64, height as i64);
        (0..w).contains(&self.x1)
            && (1..=w).contains(&self.x2)
            && (0..h).contains(&self.y1)
            && (1..=h).contains(&self.y2)
            && self.x1 < self.x2
            && self.y1 < self.y2
    }

    /// Width of the region. Only meaningful for a valid rectangle.
    pub fn width(&self) -> i64 {
        self.x2 - self.x1
    }

    /// Height of the region. Only meaningful for a valid rectangle.
    pub fn height(&self) -> i64 {
        self.y2 - self.y1
    }
}

/// Extract the sub-image covered by `rect`.
///
/// # Errors
///
/// Returns `TransformError::InvalidCropRectangle` if any bound is violated.
/// The error does not say which one.
pub fn crop(image: &RasterImage, rect: CropRect) -> TransformResult<RasterImage> {
    debug!(
        x1 = rect.x1,
        y1 = rect.y1,
        x2 = rect.x2,
        y2 = rect.y2,
        width = image.width(),
        height = image.height(),
        "crop"
    );

    if !rect.is_valid_for(image.width(), image.height()) {
        return Err(TransformError::InvalidCropRectangle);
    }

    // Bounds were checked above, so these are non-negative and in range
    let (x1, y1) = (rect.x1 as usize, rect.y1 as usize);
    let out_width = rect.width() as usize;
    let out_height = rect.height() as usize;

    let channels = image.channels();
    let stride = image.row_stride();
    let row_bytes = out_width * channels;
    let mut output = Vec::with_capacity(out_height * row_bytes);

    // Copy pixel data row by row
    for y in y1..y1 + out_height {
        let start = y * stride + x1 * channels;
        output.extend_from_slice(&image.samples()[start..start + row_bytes]);
    }

    Ok(RasterImage::from_parts(
        out_width as u32,
        out_height as u32,
        image.layout(),
        output,
    ))
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::raster::PixelLayout;
    use proptest::prelude::*;

    /// Create a gray test image with unique sample values based on position.
    fn create_test_image(width: u32, height: u32) -> RasterImage {
        let samples = (0..width * height).map(|i| (i % 256) as u8).collect();
        RasterImage::new(width, height, PixelLayout::Gray, samples).unwrap()
    }

    /// Strategy producing image dimensions and a rectangle that fits inside.
    fn valid_crop_strategy() -> impl Strategy<Value = (u32, u32, CropRect)> {
        (1u32..=40, 1u32..=40).prop_flat_map(|(w, h)| {
            (0..w, 0..h).prop_flat_map(move |(x1, y1)| {
                ((x1 + 1)..=w, (y1 + 1)..=h).prop_map(move |(x2, y2)| {
                    (w, h, CropRect::new(x1 as i64, y1 as i64, x2 as i64, y2 as i64))
                })
            })
        })
    }

    proptest! {
        /// Property: output size equals the rectangle size.
        #[test]
        fn prop_output_dimensions((w, h, rect) in valid_crop_strategy()) {
            let img = create_test_image(w, h);
            let result = crop(&img, rect).unwrap();

            prop_assert_eq!(result.width() as i64, rect.x2 - rect.x1);
            prop_assert_eq!(result.height() as i64, rect.y2 - rect.y1);
        }

        /// Property: every output pixel equals the source pixel at offset (x1, y1).
        #[test]
        fn prop_pixels_from_offset((w, h, rect) in valid_crop_strategy()) {
            let img = create_test_image(w, h);
            let result = crop(&img, rect).unwrap();

            for y in 0..result.height() {
                for x in 0..result.width() {
                    let src = img.pixel(x + rect.x1 as u32, y + rect.y1 as u32);
                    prop_assert_eq!(result.pixel(x, y), src);
                }
            }
        }

        /// Property: a rectangle that overruns the right edge is always rejected.
        #[test]
        fn prop_overrun_rejected(
            (w, h) in (1u32..=40, 1u32..=40),
            extra in 1i64..=10,
        ) {
            let img = create_test_image(w, h);
            let rect = CropRect::new(0, 0, w as i64 + extra, h as i64);
            prop_assert_eq!(crop(&img, rect), Err(TransformError::InvalidCropRectangle));
        }
    }
}
