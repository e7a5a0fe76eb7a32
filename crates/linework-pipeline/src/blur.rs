//! Smoothing filters applied before binarization.
//!
//! The edge-detect variant uses [`gaussian_blur`] to suppress sensor
//! and compression noise that would otherwise register as spurious
//! gradients. The adaptive-threshold variant uses [`median_blur`],
//! which removes speckle while keeping hard edges hard — better line
//! art than a Gaussian would give for that operator.
//!
//! Both take an odd [`Kernel`]; the 1×1 kernel is identity.

use image::GrayImage;

use crate::kernel::Kernel;

/// Gaussian sigma derived from the kernel size:
/// `0.3 * ((size - 1) * 0.5 - 1) + 0.8`.
///
/// This is OpenCV's auto-sigma rule for `GaussianBlur` with sigma 0,
/// so a given smoothing kernel selects the same amount of blur the
/// original stencil tool applied.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn auto_sigma(kernel: Kernel) -> f32 {
    0.3_f32.mul_add((kernel.size() - 1) as f32 * 0.5 - 1.0, 0.8)
}

/// Apply Gaussian blur to a grayscale image.
///
/// The sigma is derived from the kernel size via [`auto_sigma`]. The
/// identity kernel returns the image unchanged (the underlying
/// `imageproc` function panics on non-positive sigma, and a 1×1
/// Gaussian window is a no-op anyway).
#[must_use = "returns the blurred image"]
pub fn gaussian_blur(image: &GrayImage, kernel: Kernel) -> GrayImage {
    if kernel.is_identity() {
        return image.clone();
    }

    imageproc::filter::gaussian_blur_f32(image, auto_sigma(kernel))
}

/// Apply median blur to a grayscale image.
///
/// Each pixel is replaced by the median of its `size × size`
/// neighborhood. The identity kernel returns the image unchanged.
#[must_use = "returns the blurred image"]
pub fn median_blur(image: &GrayImage, kernel: Kernel) -> GrayImage {
    if kernel.is_identity() {
        return image.clone();
    }

    imageproc::filter::median_filter(image, kernel.radius(), kernel.radius())
}
