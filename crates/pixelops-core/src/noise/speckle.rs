//! Speckle (multiplicative) noise: `v + v * n` with `n ~ N(0, 1)` drawn
//! independently per sample, clamped to `[0, 255]` and truncated.

use rand::Rng;
use rand_distr::StandardNormal;

use crate::raster::RasterImage;

/// Apply speckle noise to every channel.
pub fn speckle_noise<R: Rng + ?Sized>(image: &RasterImage, rng: &mut R) -> RasterImage {
    let output = image
        .samples()
        .iter()
        .map(|&v| {
            let n: f64 = rng.sample(StandardNormal);
            let v = v as f64;
            (v + v * n).clamp(0.0, 255.0) as u8
        })
        .collect();

    RasterImage::from_parts(image.width(), image.height(), image.layout(), output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::PixelLayout;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_black_stays_black() {
        let img = RasterImage::filled(12, 12, PixelLayout::Rgba, 0).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(speckle_noise(&img, &mut rng), img);
    }

    #[test]
    fn test_noise_scales_with_intensity() {
        // Dark samples move less than bright ones
        let dark = RasterImage::filled(32, 32, PixelLayout::Gray, 4).unwrap();
        let bright = RasterImage::filled(32, 32, PixelLayout::Gray, 120).unwrap();
        let mut rng = StdRng::seed_from_u64(2);

        let spread = |img: &RasterImage, out: &RasterImage| -> f64 {
            img.samples()
                .iter()
                .zip(out.samples())
                .map(|(&a, &b)| (a as f64 - b as f64).abs())
                .sum::<f64>()
                / img.samples().len() as f64
        };

        let dark_out = speckle_noise(&dark, &mut rng);
        let bright_out = speckle_noise(&bright, &mut rng);
        assert!(spread(&dark, &dark_out) < spread(&bright, &bright_out));
        assert!(dark_out.samples().iter().all(|&v| v <= 40));
    }

    #[test]
    fn test_saturates_at_white() {
        let img = RasterImage::filled(32, 32, PixelLayout::Gray, 200).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let out = speckle_noise(&img, &mut rng);
        // P(n > 0.275) ~ 0.39: plenty of samples clip to 255
        assert!(out.samples().iter().any(|&v| v == 255));
        // P(n < -1) ~ 0.16: some clip to 0
        assert!(out.samples().iter().any(|&v| v == 0));
    }
}
