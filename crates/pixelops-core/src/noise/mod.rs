//! Statistical noise models.
//!
//! Four models are available, selected by [`NoiseKind`]:
//!
//! | kind          | effect                                              |
//! |---------------|-----------------------------------------------------|
//! | `gaussian`    | Gaussian *blur* (smoothing), not additive noise      |
//! | `salt_pepper` | impulse noise: random samples forced to 255 or 0    |
//! | `poisson`     | shot noise with the sample value as rate            |
//! | `speckle`     | multiplicative normal noise, `v + v * n`            |
//!
//! The `gaussian` tag is kept for compatibility with existing callers even
//! though the model smooths the image. Internally it lives in [`blur`].
//!
//! # Randomness
//!
//! Each call owns its random source. [`apply_noise`] builds a `StdRng`
//! from [`NoiseSettings::seed`] (or fresh entropy), and
//! [`apply_noise_with_rng`] takes any caller-supplied generator. Nothing is
//! shared between calls.

pub mod blur;
pub mod poisson;
pub mod salt_pepper;
pub mod speckle;

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{TransformError, TransformResult};
use crate::raster::RasterImage;

/// Default fraction of samples hit by salt-and-pepper noise.
pub const DEFAULT_SALT_PEPPER_AMOUNT: f64 = 0.004;

/// Heavier salt-and-pepper fraction, for callers that want an obvious effect.
pub const HEAVY_SALT_PEPPER_AMOUNT: f64 = 0.5;

/// Default share of salt-and-pepper draws that become salt.
pub const DEFAULT_SALT_VS_PEPPER: f64 = 0.5;

/// Default side length of the square blur kernel.
pub const DEFAULT_BLUR_KERNEL_SIZE: usize = 11;

/// Largest accepted blur kernel side length.
pub const MAX_BLUR_KERNEL_SIZE: usize = 255;

/// The closed set of noise models.
///
/// Serializes to the canonical tag; deserializes through [`FromStr`], so
/// the `gauss` and `s&p` aliases work in serialized requests too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum NoiseKind {
    /// Gaussian smoothing.
    Gaussian,
    /// Impulse noise.
    SaltPepper,
    /// Shot noise.
    Poisson,
    /// Multiplicative noise.
    Speckle,
}

impl NoiseKind {
    pub const ALL: [NoiseKind; 4] = [
        NoiseKind::Gaussian,
        NoiseKind::SaltPepper,
        NoiseKind::Poisson,
        NoiseKind::Speckle,
    ];

    /// Canonical tag.
    pub fn as_str(self) -> &'static str {
        match self {
            NoiseKind::Gaussian => "gaussian",
            NoiseKind::SaltPepper => "salt_pepper",
            NoiseKind::Poisson => "poisson",
            NoiseKind::Speckle => "speckle",
        }
    }
}

impl fmt::Display for NoiseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for NoiseKind {
    type Error = TransformError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl FromStr for NoiseKind {
    type Err = TransformError;

    /// Accepts the canonical tags plus the short forms `gauss` and `s&p`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gaussian" | "gauss" => Ok(NoiseKind::Gaussian),
            "salt_pepper" | "s&p" => Ok(NoiseKind::SaltPepper),
            "poisson" => Ok(NoiseKind::Poisson),
            "speckle" => Ok(NoiseKind::Speckle),
            other => Err(TransformError::invalid(format!(
                "noise kind '{}' not supported (gaussian, salt_pepper, poisson, speckle)",
                other
            ))),
        }
    }
}

/// Fixed constants used by the noise models.
///
/// Missing fields take their defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseSettings {
    /// Fraction of all samples drawn for salt-and-pepper (0.0 to 1.0).
    pub salt_pepper_amount: f64,
    /// Share of those draws that become salt (0.0 to 1.0).
    pub salt_vs_pepper: f64,
    /// Blur kernel side length (odd, 1 to `MAX_BLUR_KERNEL_SIZE`).
    pub blur_kernel_size: usize,
    /// Seed for reproducible output. `None` draws fresh entropy per call.
    pub seed: Option<u64>,
}

impl Default for NoiseSettings {
    fn default() -> Self {
        Self {
            salt_pepper_amount: DEFAULT_SALT_PEPPER_AMOUNT,
            salt_vs_pepper: DEFAULT_SALT_VS_PEPPER,
            blur_kernel_size: DEFAULT_BLUR_KERNEL_SIZE,
            seed: None,
        }
    }
}

impl NoiseSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same settings with a fixed seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every field against its domain.
    pub fn validate(&self) -> TransformResult<()> {
        if !(0.0..=1.0).contains(&self.salt_pepper_amount) {
            return Err(TransformError::invalid(format!(
                "salt_pepper_amount {} outside 0-1",
                self.salt_pepper_amount
            )));
        }
        if !(0.0..=1.0).contains(&self.salt_vs_pepper) {
            return Err(TransformError::invalid(format!(
                "salt_vs_pepper {} outside 0-1",
                self.salt_vs_pepper
            )));
        }
        if self.blur_kernel_size == 0 || self.blur_kernel_size % 2 == 0 {
            return Err(TransformError::invalid(format!(
                "blur_kernel_size {} must be odd and positive",
                self.blur_kernel_size
            )));
        }
        if self.blur_kernel_size > MAX_BLUR_KERNEL_SIZE {
            return Err(TransformError::invalid(format!(
                "blur_kernel_size {} exceeds {}",
                self.blur_kernel_size, MAX_BLUR_KERNEL_SIZE
            )));
        }
        Ok(())
    }

    /// Random source for one call.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Apply a noise model using the random source described by `settings`.
///
/// # Errors
///
/// Returns `TransformError::InvalidParameter` if `settings` is invalid. The
/// input is never modified.
pub fn apply_noise(
    image: &RasterImage,
    kind: NoiseKind,
    settings: &NoiseSettings,
) -> TransformResult<RasterImage> {
    settings.validate()?;
    let mut rng = settings.rng();
    Ok(dispatch(image, kind, settings, &mut rng))
}

/// Apply a noise model with a caller-supplied random source.
///
/// `settings.seed` is ignored here; `rng` is used as given.
pub fn apply_noise_with_rng<R: Rng + ?Sized>(
    image: &RasterImage,
    kind: NoiseKind,
    settings: &NoiseSettings,
    rng: &mut R,
) -> TransformResult<RasterImage> {
    settings.validate()?;
    Ok(dispatch(image, kind, settings, rng))
}

fn dispatch<R: Rng + ?Sized>(
    image: &RasterImage,
    kind: NoiseKind,
    settings: &NoiseSettings,
    rng: &mut R,
) -> RasterImage {
    debug!(
        %kind,
        width = image.width(),
        height = image.height(),
        channels = image.channels(),
        "noise"
    );

    match kind {
        NoiseKind::Gaussian => blur::gaussian_blur(image, settings.blur_kernel_size),
        NoiseKind::SaltPepper => salt_pepper::salt_and_pepper(
            image,
            settings.salt_pepper_amount,
            settings.salt_vs_pepper,
            rng,
        ),
        NoiseKind::Poisson => poisson::poisson_noise(image, rng),
        NoiseKind::Speckle => speckle::speckle_noise(image, rng),
    }
}
