//! Decoding and encoding at the edges of the engine.
//!
//! The transforms only ever see a [`RasterImage`]. This module turns file
//! bytes into one and turns a result back into PNG bytes.
//!
//! Accepted inputs are JPEG, PNG and BMP, gated by file extension with
//! [`ImageFormat::from_path`] and sniffed from content by [`decode`].

use std::io::Cursor;
use std::path::Path;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageReader};
use thiserror::Error;
use tracing::debug;

use crate::raster::{PixelLayout, RasterError, RasterImage};

/// Errors that can occur while decoding or encoding.
#[derive(Debug, Error)]
pub enum CodecError {
    /// File extension is not one of jpg, jpeg, png or bmp.
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// Bytes could not be decoded as an image.
    #[error("Failed to decode image: {0}")]
    Decode(String),

    /// PNG encoding failed.
    #[error("PNG encoding failed: {0}")]
    Encode(String),

    /// Decoded image cannot be represented as a raster buffer.
    #[error(transparent)]
    Raster(#[from] RasterError),
}

/// Input formats accepted by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Bmp,
}

impl ImageFormat {
    /// Match a bare extension such as `"JPG"` or `"png"` (no leading dot).
    pub fn from_extension(ext: &str) -> Result<Self, CodecError> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(ImageFormat::Jpeg),
            "png" => Ok(ImageFormat::Png),
            "bmp" => Ok(ImageFormat::Bmp),
            _ => Err(CodecError::UnsupportedFormat(ext.to_string())),
        }
    }

    /// Match the extension of a file name or path.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CodecError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| CodecError::UnsupportedFormat(path.display().to_string()))?;
        Self::from_extension(ext)
    }

    /// Canonical lowercase extension.
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Png => "png",
            ImageFormat::Bmp => "bmp",
        }
    }
}

/// Check whether a file name has an accepted image extension.
pub fn is_supported_file(name: &str) -> bool {
    ImageFormat::from_path(name).is_ok()
}

/// Decode image bytes into a raster buffer.
///
/// The format is guessed from the content, not from any file name.
/// Gray+alpha inputs decode to `Gray` with the alpha dropped, so they
/// blend as grayscale.
///
/// # Errors
///
/// Returns `CodecError::Decode` if the bytes are not a readable image.
pub fn decode(bytes: &[u8]) -> Result<RasterImage, CodecError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| CodecError::Decode(e.to_string()))?;

    let img = reader
        .decode()
        .map_err(|e| CodecError::Decode(e.to_string()))?;

    if img.width() == 0 || img.height() == 0 {
        return Err(RasterError::InvalidDimensions {
            width: img.width(),
            height: img.height(),
        }
        .into());
    }

    let raster = RasterImage::from_dynamic(img);
    debug!(
        width = raster.width(),
        height = raster.height(),
        layout = ?raster.layout(),
        "decoded image"
    );
    Ok(raster)
}

/// Encode a raster buffer as PNG.
pub fn encode_png(image: &RasterImage) -> Result<Vec<u8>, CodecError> {
    let color = match image.layout() {
        PixelLayout::Gray => ExtendedColorType::L8,
        PixelLayout::Rgb => ExtendedColorType::Rgb8,
        PixelLayout::Rgba => ExtendedColorType::Rgba8,
    };

    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(image.samples(), image.width(), image.height(), color)
        .map_err(|e| CodecError::Encode(e.to_string()))?;

    Ok(buffer.into_inner())
}
