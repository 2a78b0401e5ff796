//! Pixelops Core - Raster transformation engine
//!
//! This crate provides stateless pixel-level operations on decoded 8-bit
//! images: rotation, flipping, cropping, two-image blending and four noise
//! models, plus the codec glue to get bytes in and PNG bytes out.
//!
//! Every operation borrows a [`RasterImage`] and returns a new one.

pub mod codec;
pub mod composite;
pub mod error;
pub mod luminance;
pub mod noise;
pub mod ops;
pub mod raster;
pub mod resize;
pub mod transform;

pub use codec::{decode, encode_png, is_supported_file, CodecError, ImageFormat};
pub use composite::{blend, harmonize, BlendAlpha};
pub use error::{TransformError, TransformResult};
pub use noise::{apply_noise, apply_noise_with_rng, NoiseKind, NoiseSettings};
pub use ops::Operation;
pub use raster::{PixelLayout, RasterError, RasterImage};
pub use resize::{resize, FilterType};
pub use transform::{
    compute_rotated_bounds, crop, flip, rotate, rotate_with_filter, CropRect, FlipMode,
    InterpolationFilter, RotationAngle,
};
