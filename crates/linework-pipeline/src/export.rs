//! PNG export for the binary line-art output.
//!
//! PNG is the right container here: the output is two-valued, so
//! lossless compression is both small and exact, and every print
//! workflow accepts it.

use image::GrayImage;

use crate::types::PipelineError;

/// Encode a grayscale image as PNG bytes.
///
/// # Errors
///
/// Returns [`PipelineError::PngEncode`] if the encoder rejects the
/// image (e.g. a zero-sized buffer).
pub fn to_png_bytes(image: &GrayImage) -> Result<Vec<u8>, PipelineError> {
    let mut buf = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut buf);
    image::ImageEncoder::write_image(
        encoder,
        image.as_raw(),
        image.width(),
        image.height(),
        image::ExtendedColorType::L8,
    )
    .map_err(PipelineError::PngEncode)?;
    Ok(buf)
}
