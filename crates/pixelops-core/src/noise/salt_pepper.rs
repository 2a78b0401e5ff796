//! Salt-and-pepper impulse noise.
//!
//! Two passes over a copy of the image:
//! - salt: `ceil(amount * total * salt_vs_pepper)` draws set to 255
//! - pepper: `ceil(amount * total * (1 - salt_vs_pepper))` draws set to 0
//!
//! where `total` is the number of samples. Each draw picks a row, a column
//! and a channel independently, with replacement, so the same sample can be
//! hit more than once and pepper may overwrite salt.
//!
//! Every axis index is drawn from `[0, len - 1)`: the last row, the last
//! column and the last channel are never touched (for RGB, blue is left
//! alone). An axis of length 1 draws index 0.

use rand::Rng;
use tracing::trace;

use crate::raster::RasterImage;

/// Number of draws for one pass.
pub fn draw_count(total_samples: usize, amount: f64, share: f64) -> usize {
    (amount * total_samples as f64 * share).ceil() as usize
}

/// Apply salt-and-pepper noise.
///
/// `amount` and `salt_vs_pepper` must be in `[0, 1]`; callers validate them
/// through `NoiseSettings`.
pub fn salt_and_pepper<R: Rng + ?Sized>(
    image: &RasterImage,
    amount: f64,
    salt_vs_pepper: f64,
    rng: &mut R,
) -> RasterImage {
    let mut out = image.samples().to_vec();
    let total = out.len();

    let num_salt = draw_count(total, amount, salt_vs_pepper);
    let num_pepper = draw_count(total, amount, 1.0 - salt_vs_pepper);
    trace!(num_salt, num_pepper, total, "salt and pepper draws");

    scatter(image, &mut out, num_salt, u8::MAX, rng);
    scatter(image, &mut out, num_pepper, u8::MIN, rng);

    RasterImage::from_parts(image.width(), image.height(), image.layout(), out)
}

/// Exclusive upper bound for indices drawn along an axis of length `len`.
#[inline]
fn axis_bound(len: usize) -> usize {
    len.saturating_sub(1).max(1)
}

/// Set `count` randomly drawn samples to `value`, one index per axis.
fn scatter<R: Rng + ?Sized>(
    image: &RasterImage,
    out: &mut [u8],
    count: usize,
    value: u8,
    rng: &mut R,
) {
    let (w, h, c) = (
        image.width() as usize,
        image.height() as usize,
        image.channels(),
    );
    for _ in 0..count {
        let row = rng.gen_range(0..axis_bound(h));
        let col = rng.gen_range(0..axis_bound(w));
        let ch = rng.gen_range(0..axis_bound(c));
        out[(row * w + col) * c + ch] = value;
    }
}
