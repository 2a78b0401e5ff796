//! WASM-compatible wrapper types for raster data.
//!
//! This module provides JavaScript-friendly types that wrap the core
//! `RasterImage`, handling the conversion between Rust and JavaScript data
//! representations.

use pixelops_core::{PixelLayout, RasterError, RasterImage};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// A raster image wrapper for JavaScript.
///
/// # Memory Management
///
/// The samples live in WASM memory. `samples()` copies them out to a
/// `Uint8Array`, so keep images on the WASM side between operations and only
/// pull samples when you need to draw them.
#[wasm_bindgen]
pub struct JsRasterImage {
    width: u32,
    height: u32,
    channels: usize,
    samples: Vec<u8>,
}

/// Plain summary of an image, serialized to a JS object by `info()`.
#[derive(Debug, Serialize)]
struct ImageInfo {
    width: u32,
    height: u32,
    channels: usize,
    layout: PixelLayout,
}

#[wasm_bindgen]
impl JsRasterImage {
    /// Create an image from dimensions, channel count (1, 3 or 4) and
    /// interleaved samples.
    #[wasm_bindgen(constructor)]
    pub fn new(
        width: u32,
        height: u32,
        channels: usize,
        samples: Vec<u8>,
    ) -> Result<JsRasterImage, JsValue> {
        let layout =
            PixelLayout::from_channels(channels).map_err(|e| JsValue::from_str(&e.to_string()))?;
        RasterImage::new(width, height, layout, samples)
            .map(JsRasterImage::from_raster)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Samples per pixel: 1 (gray), 3 (RGB) or 4 (RGBA).
    #[wasm_bindgen(getter)]
    pub fn channels(&self) -> usize {
        self.channels
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.samples.len()
    }

    /// Returns the interleaved samples as a Uint8Array (copied).
    pub fn samples(&self) -> Vec<u8> {
        self.samples.clone()
    }

    /// `{ width, height, channels, layout }` as a plain JS object.
    pub fn info(&self) -> Result<JsValue, JsValue> {
        let layout =
            PixelLayout::from_channels(self.channels).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let info = ImageInfo {
            width: self.width,
            height: self.height,
            channels: self.channels,
            layout,
        };
        serde_wasm_bindgen::to_value(&info).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Explicitly free WASM memory.
    ///
    /// Optional: wasm-bindgen's finalizer handles cleanup otherwise.
    pub fn free(self) {}
}

impl JsRasterImage {
    pub(crate) fn from_raster(image: RasterImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            channels: image.channels(),
            samples: image.into_samples(),
        }
    }

    /// Rebuild the core image. Clones the samples.
    pub(crate) fn to_raster(&self) -> Result<RasterImage, RasterError> {
        let layout = PixelLayout::from_channels(self.channels)?;
        RasterImage::new(self.width, self.height, layout, self.samples.clone())
    }
}

/// Rebuild the core image for a binding that reports errors as `JsValue`.
pub(crate) fn raster_or_js_error(image: &JsRasterImage) -> Result<RasterImage, JsValue> {
    image
        .to_raster()
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
