//! Canny edge detection and edge map inversion.
//!
//! Wraps the vendored detector in `canny` (imageproc's `canny` with
//! patched hysteresis) to detect edges in the smoothed grayscale
//! image. The raw edge map is white-on-black (255 = edge); [`invert`]
//! flips it to the stencil print convention of black ink lines on
//! white paper.

use image::GrayImage;

/// Minimum allowed Canny threshold.
///
/// A threshold of zero treats every pixel with any gradient at all as
/// a potential edge, producing a degenerate near-solid edge map. Both
/// thresholds are clamped to at least this value.
pub const MIN_THRESHOLD: f32 = 1.0;
const _: () = assert!(MIN_THRESHOLD > 0.0);

/// Detect edges using the Canny algorithm.
///
/// Returns a binary image: 255 for edge pixels, 0 for non-edge.
///
/// Internally, Canny performs Sobel gradient computation, non-maximum
/// suppression, and hysteresis thresholding. Pixels with gradient
/// magnitude above `high_threshold` are definite edges; those between
/// `low_threshold` and `high_threshold` are kept only if 8-connected
/// to a definite edge. The exact tie-breaking at connectivity
/// boundaries is the detector's; callers should compare results within
/// tolerance, not bit-exactly against other Canny implementations.
///
/// Both thresholds are clamped to a minimum of [`MIN_THRESHOLD`] and
/// `low_threshold` is clamped to be at most `high_threshold`.
#[must_use = "returns the binary edge map"]
pub fn canny(image: &GrayImage, low_threshold: f32, high_threshold: f32) -> GrayImage {
    let high = high_threshold.max(MIN_THRESHOLD);
    let low = low_threshold.max(MIN_THRESHOLD).min(high);
    crate::canny::canny(image, low, high)
}

/// Invert a binary image (bitwise NOT).
///
/// Swaps edge pixels (255 → 0) and background pixels (0 → 255), so the
/// output prints as black lines on white paper.
#[must_use = "returns the inverted image"]
pub fn invert(image: &GrayImage) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        image::Luma([!image.get_pixel(x, y).0[0]])
    })
}
