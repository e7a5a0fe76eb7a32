//! Adaptive mean thresholding for the coloring-page variant.
//!
//! A single global threshold fails on photographic input: uneven
//! lighting turns whole regions solid black or solid white. Here each
//! pixel is instead compared against the mean of its own `block ×
//! block` neighborhood, minus a small offset, so the binarization
//! adapts to locally varying illumination.
//!
//! The local mean is computed with a summed-area table, making the
//! whole pass O(W×H) regardless of block size.

use image::{GrayImage, Luma};

use crate::kernel::Kernel;

/// Offset subtracted from the local mean before comparison.
///
/// A pixel is ink only when it is at least this much darker than its
/// neighborhood, which keeps near-uniform regions from dithering into
/// noise.
pub const MEAN_OFFSET: f64 = 2.0;

/// Binarize against the local neighborhood mean.
///
/// For each pixel, the mean of the `block.size() × block.size()`
/// window (clamped at the image borders) is computed; the output is
/// ink (0) where the pixel value is at most `mean - c` and background
/// (255) strictly above it, matching binary threshold convention
/// (background only when the pixel exceeds the threshold). Dark lines
/// on any locally lighter surround survive
/// as ink regardless of overall exposure.
///
/// Accumulation uses u64 sums and an f64 mean, so no block size can
/// overflow; output is plain 8-bit binary.
#[must_use = "returns the binarized image"]
pub fn adaptive_mean_threshold(image: &GrayImage, block: Kernel, c: f64) -> GrayImage {
    let (width, height) = image.dimensions();
    let integral = integral_table(image);
    let radius = block.radius();

    GrayImage::from_fn(width, height, |x, y| {
        let mean = window_mean(&integral, width, height, x, y, radius);
        if f64::from(image.get_pixel(x, y).0[0]) <= mean - c {
            Luma([0])
        } else {
            Luma([255])
        }
    })
}

/// Summed-area table with a zero-padded border.
///
/// `table[y * (width + 1) + x]` holds the sum of all pixels in the
/// half-open rectangle `[0, x) × [0, y)`, so any window sum is four
/// lookups.
fn integral_table(image: &GrayImage) -> Vec<u64> {
    let (w, h) = image.dimensions();
    let stride = (w + 1) as usize;
    let mut table = vec![0_u64; stride * (h + 1) as usize];

    for y in 0..h {
        let mut row_sum: u64 = 0;
        for x in 0..w {
            row_sum += u64::from(image.get_pixel(x, y).0[0]);
            let idx = (y + 1) as usize * stride + (x + 1) as usize;
            let above = y as usize * stride + (x + 1) as usize;
            table[idx] = row_sum + table[above];
        }
    }

    table
}

/// Mean pixel value of the window centred on `(cx, cy)`, clamped to
/// the image bounds.
#[allow(clippy::cast_precision_loss)]
fn window_mean(
    integral: &[u64],
    width: u32,
    height: u32,
    cx: u32,
    cy: u32,
    radius: u32,
) -> f64 {
    let stride = (width + 1) as usize;

    let x1 = cx.saturating_sub(radius) as usize;
    let y1 = cy.saturating_sub(radius) as usize;
    let x2 = ((cx + radius).min(width - 1) + 1) as usize;
    let y2 = ((cy + radius).min(height - 1) + 1) as usize;

    let sum = integral[y2 * stride + x2] + integral[y1 * stride + x1]
        - integral[y1 * stride + x2]
        - integral[y2 * stride + x1];
    let count = (x2 - x1) * (y2 - y1);

    sum as f64 / count as f64
}
