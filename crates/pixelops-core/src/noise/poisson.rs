//! Poisson (shot) noise.
//!
//! The image is quantized to `levels = 2^ceil(log2(unique))` levels, where
//! `unique` is the number of distinct sample values. Every sample `v` is
//! replaced by `Poisson(v * levels) / levels`, then clamped to `[0, 255]`
//! and truncated to 8 bits.

use rand::Rng;
use rand_distr::{Distribution, Poisson};
use tracing::trace;

use crate::raster::RasterImage;

/// Quantization level count for a sample buffer.
pub fn quantization_levels(samples: &[u8]) -> u32 {
    let mut seen = [false; 256];
    let mut unique = 0u32;
    for &v in samples {
        if !seen[v as usize] {
            seen[v as usize] = true;
            unique += 1;
        }
    }
    unique.max(1).next_power_of_two()
}

/// Apply Poisson noise to every channel.
pub fn poisson_noise<R: Rng + ?Sized>(image: &RasterImage, rng: &mut R) -> RasterImage {
    let levels = quantization_levels(image.samples());
    let scale = levels as f64;
    trace!(levels, "poisson quantization");

    // One distribution per sample value. A zero rate always yields zero.
    let distributions: Vec<Option<Poisson<f64>>> = (0..=u8::MAX)
        .map(|v| {
            let lambda = v as f64 * scale;
            if lambda > 0.0 {
                Poisson::new(lambda).ok()
            } else {
                None
            }
        })
        .collect();

    let output = image
        .samples()
        .iter()
        .map(|&v| match &distributions[v as usize] {
            Some(dist) => {
                let draw: f64 = dist.sample(rng);
                (draw / scale).clamp(0.0, 255.0) as u8
            }
            None => 0,
        })
        .collect();

    RasterImage::from_parts(image.width(), image.height(), image.layout(), output)
}
