//! Single entry point over the whole operation set.
//!
//! Adapters that receive an operation name plus parameters build an
//! [`Operation`] and call [`Operation::apply`] instead of matching on every
//! transform themselves.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::composite::{blend, BlendAlpha};
use crate::error::{TransformError, TransformResult};
use crate::noise::{apply_noise, NoiseKind, NoiseSettings};
use crate::raster::RasterImage;
use crate::transform::{crop, flip, rotate, CropRect, FlipMode, RotationAngle};

/// One transformation with its validated parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    Rotate { angle: RotationAngle },
    Flip { mode: FlipMode },
    Crop { rect: CropRect },
    /// The second image is supplied to [`Operation::apply`].
    Blend { alpha: BlendAlpha },
    Noise { kind: NoiseKind },
}

impl Operation {
    /// Operation tag.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Rotate { .. } => "rotate",
            Operation::Flip { .. } => "flip",
            Operation::Crop { .. } => "crop",
            Operation::Blend { .. } => "blend",
            Operation::Noise { .. } => "noise",
        }
    }

    /// Run the operation.
    ///
    /// `overlay` is the second image for `Blend` and is ignored otherwise.
    /// `settings` is only read by `Noise`.
    ///
    /// # Errors
    ///
    /// Propagates the operation's own error. A `Blend` without an overlay
    /// returns `TransformError::InvalidParameter`.
    pub fn apply(
        &self,
        image: &RasterImage,
        overlay: Option<&RasterImage>,
        settings: &NoiseSettings,
    ) -> TransformResult<RasterImage> {
        debug!(op = self.name(), "apply");
        match self {
            Operation::Rotate { angle } => Ok(rotate(image, *angle)),
            Operation::Flip { mode } => Ok(flip(image, *mode)),
            Operation::Crop { rect } => crop(image, *rect),
            Operation::Blend { alpha } => {
                let other = overlay
                    .ok_or_else(|| TransformError::invalid("blend requires a second image"))?;
                blend(image, other, *alpha)
            }
            Operation::Noise { kind } => apply_noise(image, *kind, settings),
        }
    }
}
