//! Decode and encode WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! if (!is_supported_file(file.name)) throw new Error('jpg, png or bmp only');
//! const image = decode_image(new Uint8Array(await file.arrayBuffer()));
//! const png = encode_png(rotate(image, 90, false));
//! ```

use crate::types::{raster_or_js_error, JsRasterImage};
use pixelops_core::codec;
use wasm_bindgen::prelude::*;

/// Decode JPEG, PNG or BMP bytes. The format is detected from content.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsRasterImage, JsValue> {
    codec::decode(bytes)
        .map(JsRasterImage::from_raster)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode an image as PNG bytes.
#[wasm_bindgen]
pub fn encode_png(image: &JsRasterImage) -> Result<Vec<u8>, JsValue> {
    let src = raster_or_js_error(image)?;
    codec::encode_png(&src).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Check whether a file name has a jpg, jpeg, png or bmp extension.
#[wasm_bindgen]
pub fn is_supported_file(name: &str) -> bool {
    codec::is_supported_file(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixelops_core::{PixelLayout, RasterImage};

    #[test]
    fn test_png_round_trip() {
        let samples = (0..6 * 4 * 4).map(|i| (i * 5 % 256) as u8).collect();
        let img = JsRasterImage::from_raster(
            RasterImage::new(6, 4, PixelLayout::Rgba, samples).unwrap(),
        );
        let bytes = encode_png(&img).unwrap();
        let decoded = decode_image(&bytes).unwrap();
        assert_eq!(decoded.channels(), 4);
        assert_eq!(decoded.samples(), img.samples());
    }

    #[test]
    fn test_is_supported_file() {
        assert!(is_supported_file("a.JPG"));
        assert!(is_supported_file("b.png"));
        assert!(!is_supported_file("c.gif"));
    }
}
