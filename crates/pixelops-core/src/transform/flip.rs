//! Mirror an image along one axis.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::TransformError;
use crate::raster::RasterImage;

/// Axis to mirror along.
///
/// Deserialization goes through [`FromStr`], so serialized requests accept
/// the same spellings as string parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum FlipMode {
    /// Mirror columns left-right.
    Horizontal,
    /// Mirror rows top-bottom.
    Vertical,
}

impl FlipMode {
    pub fn as_str(self) -> &'static str {
        match self {
            FlipMode::Horizontal => "horizontal",
            FlipMode::Vertical => "vertical",
        }
    }
}

impl fmt::Display for FlipMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for FlipMode {
    type Error = TransformError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl FromStr for FlipMode {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "horizontal" => Ok(FlipMode::Horizontal),
            "vertical" => Ok(FlipMode::Vertical),
            other => Err(TransformError::invalid(format!(
                "flip mode '{}' not supported (vertical - horizontal)",
                other
            ))),
        }
    }
}

/// Mirror an image. Applying the same flip twice restores the input.
pub fn flip(image: &RasterImage, mode: FlipMode) -> RasterImage {
    debug!(%mode, width = image.width(), height = image.height(), "flip");

    let stride = image.row_stride();
    let channels = image.channels();
    let mut output = Vec::with_capacity(image.samples().len());

    match mode {
        FlipMode::Horizontal => {
            for row in image.samples().chunks_exact(stride) {
                for px in row.chunks_exact(channels).rev() {
                    output.extend_from_slice(px);
                }
            }
        }
        FlipMode::Vertical => {
            for row in image.samples().chunks_exact(stride).rev() {
                output.extend_from_slice(row);
            }
        }
    }

    RasterImage::from_parts(image.width(), image.height(), image.layout(), output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::PixelLayout;

    fn grid() -> RasterImage {
        // 1 2 3
        // 4 5 6
        RasterImage::new(3, 2, PixelLayout::Gray, vec![1, 2, 3, 4, 5, 6]).unwrap()
    }

    #[test]
    fn test_horizontal_flip() {
        let result = flip(&grid(), FlipMode::Horizontal);
        assert_eq!(result.samples(), &[3, 2, 1, 6, 5, 4]);
    }

    #[test]
    fn test_vertical_flip() {
        let result = flip(&grid(), FlipMode::Vertical);
        assert_eq!(result.samples(), &[4, 5, 6, 1, 2, 3]);
    }

    #[test]
    fn test_horizontal_flip_keeps_pixel_channels_together() {
        let img = RasterImage::new(2, 1, PixelLayout::Rgb, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let result = flip(&img, FlipMode::Horizontal);
        assert_eq!(result.samples(), &[4, 5, 6, 1, 2, 3]);
    }

    #[test]
    fn test_parse_modes() {
        assert_eq!("horizontal".parse::<FlipMode>().unwrap(), FlipMode::Horizontal);
        assert_eq!("Vertical".parse::<FlipMode>().unwrap(), FlipMode::Vertical);
        assert_eq!(" vertical ".parse::<FlipMode>().unwrap(), FlipMode::Vertical);
    }

    #[test]
    fn test_parse_unknown_mode() {
        let err = "diagonal".parse::<FlipMode>().unwrap_err();
        assert!(matches!(err, TransformError::InvalidParameter(_)));
    }

    #[test]
    fn test_serde_accepts_parser_spellings() {
        let mode: FlipMode = serde_json::from_str(r#""Vertical""#).unwrap();
        assert_eq!(mode, FlipMode::Vertical);
        let mode: FlipMode = serde_json::from_str(r#"" horizontal ""#).unwrap();
        assert_eq!(mode, FlipMode::Horizontal);
        assert!(serde_json::from_str::<FlipMode>(r#""diagonal""#).is_err());
        assert_eq!(
            serde_json::to_string(&FlipMode::Vertical).unwrap(),
            r#""vertical""#
        );
    }

    #[test]
    fn test_display_round_trips() {
        for mode in [FlipMode::Horizontal, FlipMode::Vertical] {
            assert_eq!(mode.to_string().parse::<FlipMode>().unwrap(), mode);
        }
    }
}
