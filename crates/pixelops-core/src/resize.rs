//! Image resampling used for canvas harmonization.
//!
//! Wraps the `image` crate's separable resize so that every pixel layout
//! goes through the same filter. All functions return new `RasterImage`
//! instances without modifying the input.

use serde::{Deserialize, Serialize};

use crate::error::{TransformError, TransformResult};
use crate::raster::RasterImage;

/// Filter type for resize operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    /// Nearest neighbor (fastest, blocky).
    Nearest,
    /// Bilinear (fast, soft).
    Bilinear,
    /// Lanczos3 (slower, highest quality). Used for blending.
    #[default]
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Resize an image to exact dimensions.
///
/// Aspect ratio is not preserved; the image is stretched to fit. The pixel
/// layout of the output matches the input.
///
/// # Errors
///
/// Returns `TransformError::InvalidParameter` if either target dimension is zero.
pub fn resize(
    image: &RasterImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> TransformResult<RasterImage> {
    if width == 0 || height == 0 {
        return Err(TransformError::invalid(format!(
            "resize target {}x{} must be non-zero",
            width, height
        )));
    }

    // Same size: skip resampling so the samples stay bit-exact
    if image.width() == width && image.height() == height {
        return Ok(image.clone());
    }

    let resized = image
        .to_dynamic()
        .resize_exact(width, height, filter.to_image_filter());

    // resize_exact keeps the color type, so the layout survives the round trip
    Ok(RasterImage::from_dynamic(resized))
}
