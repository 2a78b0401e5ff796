//! WASM bindings for the geometric and compositing operations.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const rotated = rotate(image, 90, false);
//! const mirrored = flip(rotated, 'horizontal');
//! const cropped = crop(mirrored, 0, 0, 100, 80);
//! const mixed = blend(cropped, other, 30);
//! ```

use crate::types::{raster_or_js_error, JsRasterImage};
use pixelops_core::transform::{self, CropRect, FlipMode, InterpolationFilter, RotationAngle};
use pixelops_core::{composite, BlendAlpha};
use wasm_bindgen::prelude::*;

/// Rotate an image by whole degrees, positive = clockwise.
///
/// The canvas grows to fit the rotated content; uncovered corners are 0.
///
/// # Arguments
///
/// * `image` - Source image
/// * `angle_degrees` - Rotation angle, strictly between -360 and 360
/// * `use_nearest` - Nearest-neighbor sampling instead of bilinear
#[wasm_bindgen]
pub fn rotate(
    image: &JsRasterImage,
    angle_degrees: i32,
    use_nearest: bool,
) -> Result<JsRasterImage, JsValue> {
    let angle = RotationAngle::new(angle_degrees).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let filter = if use_nearest {
        InterpolationFilter::Nearest
    } else {
        InterpolationFilter::Bilinear
    };

    let src = raster_or_js_error(image)?;
    Ok(JsRasterImage::from_raster(transform::rotate_with_filter(
        &src, angle, filter,
    )))
}

/// Mirror an image. `mode` is `"horizontal"` or `"vertical"`.
#[wasm_bindgen]
pub fn flip(image: &JsRasterImage, mode: &str) -> Result<JsRasterImage, JsValue> {
    let mode: FlipMode = mode.parse().map_err(|e: pixelops_core::TransformError| {
        JsValue::from_str(&e.to_string())
    })?;
    let src = raster_or_js_error(image)?;
    Ok(JsRasterImage::from_raster(transform::flip(&src, mode)))
}

/// Crop to the half-open pixel rectangle `[x1, x2) x [y1, y2)`.
///
/// Rectangles that do not fit inside the image are rejected, never clamped.
#[wasm_bindgen]
pub fn crop(
    image: &JsRasterImage,
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
) -> Result<JsRasterImage, JsValue> {
    let rect = CropRect::new(x1.into(), y1.into(), x2.into(), y2.into());
    let src = raster_or_js_error(image)?;
    transform::crop(&src, rect)
        .map(JsRasterImage::from_raster)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Blend two images; `alpha` is the weight of `other` in percent (0-100).
///
/// Images of different sizes or layouts are harmonized first.
#[wasm_bindgen]
pub fn blend(
    image: &JsRasterImage,
    other: &JsRasterImage,
    alpha: f64,
) -> Result<JsRasterImage, JsValue> {
    let alpha = BlendAlpha::new(alpha).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let a = raster_or_js_error(image)?;
    let b = raster_or_js_error(other)?;
    composite::blend(&a, &b, alpha)
        .map(JsRasterImage::from_raster)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}


/// WASM-specific tests for the error paths, which build a `JsValue`.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn gray(width: u32, height: u32) -> JsRasterImage {
        JsRasterImage::new(width, height, 1, vec![0; (width * height) as usize]).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_rotate_rejects_full_turn() {
        assert!(rotate(&gray(4, 4), 360, false).is_err());
        assert!(rotate(&gray(4, 4), -360, false).is_err());
    }

    #[wasm_bindgen_test]
    fn test_flip_rejects_unknown_mode() {
        assert!(flip(&gray(4, 4), "diagonal").is_err());
    }

    #[wasm_bindgen_test]
    fn test_crop_rejects_out_of_bounds() {
        let err = crop(&gray(100, 100), 0, 0, 100, 101).err().unwrap();
        assert_eq!(err.as_string().unwrap(), "Crop dimensions not valid");
    }

    #[wasm_bindgen_test]
    fn test_blend_rejects_alpha_out_of_range() {
        assert!(blend(&gray(2, 2), &gray(2, 2), 100.5).is_err());
    }
}
