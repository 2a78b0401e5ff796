//! WASM bindings for the noise models.
//!
//! `kind` is one of `gaussian`, `salt_pepper`, `poisson` or `speckle`
//! (`gauss` and `s&p` are accepted too).
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const grainy = apply_noise(image, 'speckle');
//! const repeatable = apply_noise_seeded(image, 's&p', 42);
//! const heavy = apply_noise_with_settings(image, 's&p', { salt_pepper_amount: 0.5 });
//! ```

use crate::types::{raster_or_js_error, JsRasterImage};
use pixelops_core::noise::{self, NoiseKind, NoiseSettings};
use wasm_bindgen::prelude::*;

fn run(
    image: &JsRasterImage,
    kind: &str,
    settings: &NoiseSettings,
) -> Result<JsRasterImage, JsValue> {
    let kind: NoiseKind = kind
        .parse()
        .map_err(|e: pixelops_core::TransformError| JsValue::from_str(&e.to_string()))?;
    let src = raster_or_js_error(image)?;
    noise::apply_noise(&src, kind, settings)
        .map(JsRasterImage::from_raster)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Apply a noise model with default settings and fresh randomness.
#[wasm_bindgen]
pub fn apply_noise(image: &JsRasterImage, kind: &str) -> Result<JsRasterImage, JsValue> {
    run(image, kind, &NoiseSettings::default())
}

/// Apply a noise model with a fixed seed, for reproducible output.
#[wasm_bindgen]
pub fn apply_noise_seeded(
    image: &JsRasterImage,
    kind: &str,
    seed: u32,
) -> Result<JsRasterImage, JsValue> {
    run(image, kind, &NoiseSettings::default().with_seed(seed.into()))
}

/// Apply a noise model with settings from a plain JS object.
///
/// Missing fields take their defaults: `salt_pepper_amount` (0.004),
/// `salt_vs_pepper` (0.5), `blur_kernel_size` (11), `seed` (none).
#[wasm_bindgen]
pub fn apply_noise_with_settings(
    image: &JsRasterImage,
    kind: &str,
    settings: JsValue,
) -> Result<JsRasterImage, JsValue> {
    let settings: NoiseSettings = serde_wasm_bindgen::from_value(settings)
        .map_err(|e| JsValue::from_str(&format!("Invalid noise settings: {}", e)))?;
    run(image, kind, &settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixelops_core::{PixelLayout, RasterImage};

    fn test_image() -> JsRasterImage {
        let samples = (0..16 * 16 * 3).map(|i| (i * 7 % 256) as u8).collect();
        JsRasterImage::from_raster(RasterImage::new(16, 16, PixelLayout::Rgb, samples).unwrap())
    }

    #[test]
    fn test_every_kind_keeps_shape() {
        let img = test_image();
        for kind in ["gaussian", "salt_pepper", "poisson", "speckle", "gauss", "s&p"] {
            let out = apply_noise(&img, kind).unwrap();
            assert_eq!(out.width(), 16, "{}", kind);
            assert_eq!(out.height(), 16, "{}", kind);
            assert_eq!(out.channels(), 3, "{}", kind);
        }
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let img = test_image();
        let a = apply_noise_seeded(&img, "poisson", 9).unwrap();
        let b = apply_noise_seeded(&img, "poisson", 9).unwrap();
        assert_eq!(a.samples(), b.samples());
    }

    #[test]
    fn test_blur_is_deterministic() {
        let img = test_image();
        let a = apply_noise(&img, "gaussian").unwrap();
        let b = apply_noise(&img, "gaussian").unwrap();
        assert_eq!(a.samples(), b.samples());
    }
}
