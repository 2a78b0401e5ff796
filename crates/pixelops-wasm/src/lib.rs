//! Pixelops WASM - WebAssembly bindings for Pixelops
//!
//! This crate exposes the pixelops-core operations to JavaScript/TypeScript.
//! It only converts parameters and errors; all pixel work happens in the
//! core crate.
//!
//! # Module Structure
//!
//! - `types` - `JsRasterImage`, the JS-side image handle
//! - `transform` - rotate, flip, crop and blend
//! - `noise` - the four noise models
//! - `codec` - decode image bytes, encode PNG
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, rotate, encode_png } from '@pixelops/wasm';
//!
//! await init();
//!
//! const image = decode_image(new Uint8Array(await file.arrayBuffer()));
//! const png = encode_png(rotate(image, -30, false));
//! ```
//!
//! Errors are thrown as strings carrying the core error message.

use wasm_bindgen::prelude::*;

mod codec;
mod noise;
mod transform;
mod types;

pub use codec::{decode_image, encode_png, is_supported_file};
pub use noise::{apply_noise, apply_noise_seeded, apply_noise_with_settings};
pub use transform::{blend, crop, flip, rotate};
pub use types::JsRasterImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
