//! Two-image blending.
//!
//! Blending runs in three steps:
//! 1. Canvas harmonization: both images are resized (Lanczos3) to the larger
//!    width and the larger height of the pair. Aspect ratio is not kept.
//! 2. Depth harmonization: a gray operand pulls the other one down to gray;
//!    an RGB operand next to an RGBA one gains an opaque alpha channel.
//! 3. Linear interpolation per sample:
//!    `out = a * (1 - t) + b * t` with `t = alpha / 100`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{TransformError, TransformResult};
use crate::raster::{PixelLayout, RasterImage};
use crate::resize::{resize, FilterType};

/// Blend weight of the second image, as a percentage in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct BlendAlpha(f64);

impl BlendAlpha {
    pub fn new(percent: f64) -> TransformResult<Self> {
        if !(0.0..=100.0).contains(&percent) {
            return Err(TransformError::invalid(format!(
                "alpha {} outside 0-100",
                percent
            )));
        }
        Ok(Self(percent))
    }

    #[inline]
    pub fn percent(self) -> f64 {
        self.0
    }

    /// Weight of the second image in `[0, 1]`.
    #[inline]
    pub fn fraction(self) -> f64 {
        self.0 / 100.0
    }
}

impl TryFrom<f64> for BlendAlpha {
    type Error = TransformError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BlendAlpha> for f64 {
    fn from(alpha: BlendAlpha) -> Self {
        alpha.0
    }
}

/// Bring two images to a shared size and layout.
///
/// Returns the operands exactly as they enter interpolation. Images already
/// at the shared size are not resampled.
pub fn harmonize(a: &RasterImage, b: &RasterImage) -> TransformResult<(RasterImage, RasterImage)> {
    let width = a.width().max(b.width());
    let height = a.height().max(b.height());

    let a = resize(a, width, height, FilterType::Lanczos3)?;
    let b = resize(b, width, height, FilterType::Lanczos3)?;

    let pair = match (a.layout(), b.layout()) {
        (la, lb) if la == lb => (a, b),
        (PixelLayout::Gray, _) => {
            let b = b.to_gray();
            (a, b)
        }
        (_, PixelLayout::Gray) => {
            let a = a.to_gray();
            (a, b)
        }
        // Rgb next to Rgba
        _ => (a.to_rgba(), b.to_rgba()),
    };

    Ok(pair)
}

/// Blend two images.
///
/// `alpha = 0` reproduces `a` on the common canvas, `alpha = 100`
/// reproduces `b`.
///
/// # Example
///
/// ```
/// use pixelops_core::composite::{blend, BlendAlpha};
/// use pixelops_core::raster::{PixelLayout, RasterImage};
///
/// let black = RasterImage::filled(4, 4, PixelLayout::Rgb, 0).unwrap();
/// let white = RasterImage::filled(4, 4, PixelLayout::Rgb, 200).unwrap();
/// let mid = blend(&black, &white, BlendAlpha::new(50.0).unwrap()).unwrap();
/// assert_eq!(mid.samples()[0], 100);
/// ```
pub fn blend(a: &RasterImage, b: &RasterImage, alpha: BlendAlpha) -> TransformResult<RasterImage> {
    debug!(
        alpha = alpha.percent(),
        a_width = a.width(),
        a_height = a.height(),
        b_width = b.width(),
        b_height = b.height(),
        "blend"
    );

    let (a, b) = harmonize(a, b)?;
    let t = alpha.fraction();

    let samples = a
        .samples()
        .iter()
        .zip(b.samples())
        .map(|(&sa, &sb)| {
            let v = sa as f64 * (1.0 - t) + sb as f64 * t;
            v.clamp(0.0, 255.0).round() as u8
        })
        .collect();

    Ok(RasterImage::from_parts(a.width(), a.height(), a.layout(), samples))
}
