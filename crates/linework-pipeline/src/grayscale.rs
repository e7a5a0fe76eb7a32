//! Image decoding and grayscale conversion.
//!
//! Accepts raw image bytes (PNG, JPEG, BMP, WebP, GIF) and produces the
//! single-channel grayscale image every later stage operates on, plus
//! an RGBA copy of the original for staged previews.
//!
//! Grayscale conversion uses the BT.601 luma weighting
//! `0.299*R + 0.587*G + 0.114*B` — the same weights OpenCV's
//! `COLOR_RGBA2GRAY` applies, so stencil output lines up with tools
//! built on that conversion. The `image` crate's own `to_luma8` uses
//! BT.709 coefficients (0.2126/0.7152/0.0722) and would shift every
//! non-gray pixel, so the conversion is implemented here explicitly.

use image::{DynamicImage, GrayImage, Luma, RgbaImage};

use crate::types::PipelineError;

/// Decode raw image bytes into a [`DynamicImage`].
///
/// # Errors
///
/// Returns [`PipelineError::EmptyInput`] if `bytes` is empty.
/// Returns [`PipelineError::ImageDecode`] if the image format is
/// unrecognized or the data is corrupt.
pub fn decode(bytes: &[u8]) -> Result<DynamicImage, PipelineError> {
    if bytes.is_empty() {
        return Err(PipelineError::EmptyInput);
    }

    Ok(image::load_from_memory(bytes)?)
}

/// BT.601 luma of one RGBA pixel, rounded to u8.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn bt601_luma(pixel: &image::Rgba<u8>) -> u8 {
    let [r, g, b, _] = pixel.0;
    let y = 0.299_f32.mul_add(
        f32::from(r),
        0.587_f32.mul_add(f32::from(g), 0.114 * f32::from(b)),
    );
    y.round().clamp(0.0, 255.0) as u8
}

/// Convert a decoded RGBA image to grayscale with BT.601 luma
/// weighting.
#[must_use]
pub fn to_grayscale(rgba: &RgbaImage) -> GrayImage {
    GrayImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        Luma([bt601_luma(rgba.get_pixel(x, y))])
    })
}

/// Decode raw image bytes and convert to grayscale in one step.
///
/// # Errors
///
/// Same as [`decode`].
pub fn decode_and_grayscale(bytes: &[u8]) -> Result<GrayImage, PipelineError> {
    let image = decode(bytes)?;
    Ok(to_grayscale(&image.to_rgba8()))
}

/// Convert a decoded image to RGBA, preserving color for previews.
#[must_use]
pub fn to_rgba(image: &DynamicImage) -> RgbaImage {
    image.to_rgba8()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Encode a uniform `w`×`h` RGBA image as PNG bytes.
    fn png_of(w: u32, h: u32, rgba: [u8; 4]) -> Vec<u8> {
        let img = RgbaImage::from_pixel(w, h, image::Rgba(rgba));
        let mut buf = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut buf);
        image::ImageEncoder::write_image(
            encoder,
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::Rgba8,
        )
        .unwrap();
        buf
    }

    fn luma_of(rgba: [u8; 4]) -> u8 {
        decode_and_grayscale(&png_of(1, 1, rgba))
            .unwrap()
            .get_pixel(0, 0)
            .0[0]
    }

    #[test]
    fn empty_input_returns_error() {
        assert!(matches!(
            decode_and_grayscale(&[]),
            Err(PipelineError::EmptyInput),
        ));
    }

    #[test]
    fn corrupt_bytes_return_image_decode_error() {
        let result = decode_and_grayscale(&[0xFF, 0xFE, 0x00, 0x01]);
        assert!(matches!(result, Err(PipelineError::ImageDecode(_))));
    }

    #[test]
    fn output_dimensions_match_input() {
        let gray = decode_and_grayscale(&png_of(17, 31, [128, 64, 32, 255])).unwrap();
        assert_eq!(gray.width(), 17);
        assert_eq!(gray.height(), 31);
    }

    #[test]
    fn primary_channels_map_to_bt601_values() {
        // 0.299 * 255 = 76.245, 0.587 * 255 = 149.685,
        // 0.114 * 255 = 29.07 — the fixed points that distinguish
        // BT.601 from BT.709 (which would give 54 / 182 / 18).
        assert_eq!(luma_of([255, 0, 0, 255]), 76, "red");
        assert_eq!(luma_of([0, 255, 0, 255]), 150, "green");
        assert_eq!(luma_of([0, 0, 255, 255]), 29, "blue");
    }

    #[test]
    fn mixed_color_matches_weighted_sum() {
        // 0.299*200 + 0.587*100 + 0.114*50 = 124.2 -> 124.
        assert_eq!(luma_of([200, 100, 50, 255]), 124);
    }

    #[test]
    fn pure_gray_input_is_preserved() {
        // R = G = B means luma weighting must return the same value,
        // within one unit of rounding.
        for v in [0_u8, 7, 64, 127, 128, 200, 255] {
            let out = luma_of([v, v, v, 255]);
            assert!(
                i16::from(out).abs_diff(i16::from(v)) <= 1,
                "gray value {v} mapped to {out}",
            );
        }
    }

    #[test]
    fn luma_weights_order_channels() {
        // Green carries the largest weight, blue the smallest.
        let r = luma_of([255, 0, 0, 255]);
        let g = luma_of([0, 255, 0, 255]);
        let b = luma_of([0, 0, 255, 255]);
        assert!(
            g > r && r > b,
            "expected green > red > blue luminance, got R={r} G={g} B={b}",
        );
    }

    #[test]
    fn to_grayscale_ignores_alpha() {
        let opaque = RgbaImage::from_pixel(1, 1, image::Rgba([90, 140, 30, 255]));
        let transparent = RgbaImage::from_pixel(1, 1, image::Rgba([90, 140, 30, 0]));
        assert_eq!(
            to_grayscale(&opaque).get_pixel(0, 0),
            to_grayscale(&transparent).get_pixel(0, 0),
        );
    }

    #[test]
    fn to_rgba_preserves_dimensions() {
        let decoded = decode(&png_of(5, 9, [10, 20, 30, 255])).unwrap();
        let rgba = to_rgba(&decoded);
        assert_eq!(rgba.dimensions(), (5, 9));
    }
}
