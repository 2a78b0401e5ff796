//! Core raster buffer type shared by every transformation.

use image::DynamicImage;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::luminance::calculate_luminance_u8;

/// Errors raised when constructing a raster buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RasterError {
    /// Width or height is zero.
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Sample buffer length doesn't match width * height * channels.
    #[error("Invalid sample data: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Channel count is not 1, 3 or 4.
    #[error("Unsupported channel count: {0} (expected 1, 3 or 4)")]
    UnsupportedChannelCount(usize),
}

/// Sample layout of a raster buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelLayout {
    /// One luminance sample per pixel.
    Gray,
    /// Red, green, blue.
    Rgb,
    /// Red, green, blue, alpha.
    Rgba,
}

impl PixelLayout {
    /// Number of interleaved samples per pixel.
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            PixelLayout::Gray => 1,
            PixelLayout::Rgb => 3,
            PixelLayout::Rgba => 4,
        }
    }

    #[inline]
    pub fn has_alpha(self) -> bool {
        self == PixelLayout::Rgba
    }

    /// True for layouts that carry color (3 or more channels).
    #[inline]
    pub fn is_color(self) -> bool {
        self.channels() >= 3
    }

    /// Map a channel count to a layout.
    pub fn from_channels(channels: usize) -> Result<Self, RasterError> {
        match channels {
            1 => Ok(PixelLayout::Gray),
            3 => Ok(PixelLayout::Rgb),
            4 => Ok(PixelLayout::Rgba),
            other => Err(RasterError::UnsupportedChannelCount(other)),
        }
    }
}

/// A decoded 8-bit image held entirely in memory.
///
/// Samples are interleaved in row-major order. The buffer is immutable once
/// built: transformations borrow it and return a fresh `RasterImage`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    layout: PixelLayout,
    samples: Vec<u8>,
}

impl RasterImage {
    /// Create a raster image, validating dimensions and buffer length.
    pub fn new(
        width: u32,
        height: u32,
        layout: PixelLayout,
        samples: Vec<u8>,
    ) -> Result<Self, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::InvalidDimensions { width, height });
        }
        let expected = width as usize * height as usize * layout.channels();
        if samples.len() != expected {
            return Err(RasterError::BufferSizeMismatch {
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self {
            width,
            height,
            layout,
            samples,
        })
    }

    /// Create an image filled with a single sample value.
    pub fn filled(
        width: u32,
        height: u32,
        layout: PixelLayout,
        value: u8,
    ) -> Result<Self, RasterError> {
        let len = width as usize * height as usize * layout.channels();
        Self::new(width, height, layout, vec![value; len])
    }

    /// Internal constructor for buffers whose size is correct by construction.
    pub(crate) fn from_parts(width: u32, height: u32, layout: PixelLayout, samples: Vec<u8>) -> Self {
        debug_assert_eq!(
            samples.len(),
            width as usize * height as usize * layout.channels(),
            "Sample buffer size mismatch"
        );
        Self {
            width,
            height,
            layout,
            samples,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.layout.channels()
    }

    /// All samples, row-major and interleaved.
    #[inline]
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Consume the image and return its sample buffer.
    pub fn into_samples(self) -> Vec<u8> {
        self.samples
    }

    /// Number of bytes in one row.
    #[inline]
    pub fn row_stride(&self) -> usize {
        self.width as usize * self.channels()
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Samples of the pixel at `(x, y)`.
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let c = self.channels();
        let idx = (y as usize * self.width as usize + x as usize) * c;
        &self.samples[idx..idx + c]
    }

    /// Convert to single-channel luminance. Alpha is dropped.
    pub fn to_gray(&self) -> RasterImage {
        let samples = match self.layout {
            PixelLayout::Gray => return self.clone(),
            PixelLayout::Rgb | PixelLayout::Rgba => self
                .samples
                .chunks_exact(self.channels())
                .map(|p| calculate_luminance_u8(p[0], p[1], p[2]))
                .collect(),
        };
        RasterImage::from_parts(self.width, self.height, PixelLayout::Gray, samples)
    }

    /// Convert to RGBA. Missing alpha becomes fully opaque.
    pub fn to_rgba(&self) -> RasterImage {
        let mut samples = Vec::with_capacity(self.pixel_count() * 4);
        match self.layout {
            PixelLayout::Rgba => return self.clone(),
            PixelLayout::Rgb => {
                for p in self.samples.chunks_exact(3) {
                    samples.extend_from_slice(&[p[0], p[1], p[2], u8::MAX]);
                }
            }
            PixelLayout::Gray => {
                for &v in &self.samples {
                    samples.extend_from_slice(&[v, v, v, u8::MAX]);
                }
            }
        }
        RasterImage::from_parts(self.width, self.height, PixelLayout::Rgba, samples)
    }

    /// Build a raster image from any decoded `image` crate buffer.
    ///
    /// Grayscale stays grayscale (gray+alpha loses its alpha), color with
    /// an alpha channel becomes RGBA, and everything else becomes RGB.
    /// Deeper sample types are reduced to 8 bits.
    pub fn from_dynamic(img: DynamicImage) -> Self {
        let color = img.color();
        if !color.has_color() {
            let luma = img.into_luma8();
            let (width, height) = luma.dimensions();
            Self::from_parts(width, height, PixelLayout::Gray, luma.into_raw())
        } else if color.has_alpha() {
            let rgba = img.into_rgba8();
            let (width, height) = rgba.dimensions();
            Self::from_parts(width, height, PixelLayout::Rgba, rgba.into_raw())
        } else {
            let rgb = img.into_rgb8();
            let (width, height) = rgb.dimensions();
            Self::from_parts(width, height, PixelLayout::Rgb, rgb.into_raw())
        }
    }

    /// Convert to a `DynamicImage` for use with `image` crate routines.
    pub fn to_dynamic(&self) -> DynamicImage {
        let (w, h, samples) = (self.width, self.height, self.samples.clone());
        // Buffer length is validated at construction, so from_raw cannot fail here.
        match self.layout {
            PixelLayout::Gray => image::GrayImage::from_raw(w, h, samples)
                .map(DynamicImage::ImageLuma8),
            PixelLayout::Rgb => image::RgbImage::from_raw(w, h, samples)
                .map(DynamicImage::ImageRgb8),
            PixelLayout::Rgba => image::RgbaImage::from_raw(w, h, samples)
                .map(DynamicImage::ImageRgba8),
        }
        .unwrap_or_else(|| DynamicImage::new(w, h, self.color_type()))
    }

    fn color_type(&self) -> image::ColorType {
        match self.layout {
            PixelLayout::Gray => image::ColorType::L8,
            PixelLayout::Rgb => image::ColorType::Rgb8,
            PixelLayout::Rgba => image::ColorType::Rgba8,
        }
    }
}
