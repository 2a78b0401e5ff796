//! Separable Gaussian smoothing.
//!
//! The kernel sigma is derived from the kernel size the same way common
//! vision libraries do when no sigma is given:
//! ```text
//! sigma = 0.3 * ((size - 1) * 0.5 - 1) + 0.8
//! ```
//! which gives sigma = 2.0 for the default 11x11 kernel.
//!
//! Borders use reflect-101 (`gfedcb|abcdefgh|gfedcba`): the edge sample
//! is not repeated.

use tracing::trace;

use crate::raster::RasterImage;

/// Sigma implied by a kernel size.
pub fn sigma_for_kernel_size(size: usize) -> f64 {
    0.3 * ((size as f64 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Normalized 1-D Gaussian kernel of odd length `size`.
pub fn gaussian_kernel_1d(size: usize) -> Vec<f64> {
    let sigma = sigma_for_kernel_size(size);
    let half = (size / 2) as f64;
    let two_sigma2 = 2.0 * sigma * sigma;

    let mut kernel: Vec<f64> = (0..size)
        .map(|i| {
            let d = i as f64 - half;
            (-(d * d) / two_sigma2).exp()
        })
        .collect();

    let sum: f64 = kernel.iter().sum();
    for w in &mut kernel {
        *w /= sum;
    }
    kernel
}

/// Map an out-of-range index into `[0, len)` by reflect-101.
#[inline]
fn reflect_101(i: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let period = 2 * (len as isize - 1);
    let mut i = i.rem_euclid(period);
    if i >= len as isize {
        i = period - i;
    }
    i as usize
}

/// Blur every channel (alpha included) with a `size` x `size` Gaussian.
///
/// `size` must be odd; callers validate it through `NoiseSettings`.
pub fn gaussian_blur(image: &RasterImage, size: usize) -> RasterImage {
    let kernel = gaussian_kernel_1d(size);
    let radius = (size / 2) as isize;
    let (w, h) = (image.width() as usize, image.height() as usize);
    let c = image.channels();
    let src = image.samples();

    trace!(size, sigma = sigma_for_kernel_size(size), "gaussian kernel");

    // Horizontal pass into a float buffer
    let mut horizontal = vec![0.0f64; src.len()];
    for y in 0..h {
        let row = y * w * c;
        for x in 0..w {
            for (k, &weight) in kernel.iter().enumerate() {
                let sx = reflect_101(x as isize + k as isize - radius, w);
                let s = row + sx * c;
                let d = row + x * c;
                for ch in 0..c {
                    horizontal[d + ch] += src[s + ch] as f64 * weight;
                }
            }
        }
    }

    // Vertical pass, rounded back to 8 bits
    let mut output = vec![0u8; src.len()];
    let mut acc = vec![0.0f64; c];
    for y in 0..h {
        for x in 0..w {
            acc.iter_mut().for_each(|v| *v = 0.0);
            for (k, &weight) in kernel.iter().enumerate() {
                let sy = reflect_101(y as isize + k as isize - radius, h);
                let s = (sy * w + x) * c;
                for ch in 0..c {
                    acc[ch] += horizontal[s + ch] * weight;
                }
            }
            let d = (y * w + x) * c;
            for ch in 0..c {
                output[d + ch] = acc[ch].clamp(0.0, 255.0).round() as u8;
            }
        }
    }

    RasterImage::from_parts(image.width(), image.height(), image.layout(), output)
}
