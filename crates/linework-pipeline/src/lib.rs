//! linework-pipeline: Pure line-art extraction pipeline (sans-IO).
//!
//! Converts raster photographs into printable binary line art through:
//! grayscale -> smoothing -> binarization, with two variants sharing
//! the same shape:
//!
//! - **Edge detect** (tattoo stencil): Gaussian blur, Canny edge
//!   detection with hysteresis thresholds, optional polarity inversion
//!   so edges print as black ink on white paper.
//! - **Adaptive threshold** (coloring page): median blur, then
//!   binarization against the local neighborhood mean, which tolerates
//!   uneven illumination where a global threshold would not.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! byte slices and returns structured data. File and terminal
//! interaction lives in `linework-cli`.
//!
//! Every invocation is independent and deterministic: same bytes, same
//! config, byte-identical output. There is no shared state, no retry,
//! and no partial result — a run either yields a complete image or an
//! error. Debouncing rapid re-invocations (e.g. from a parameter
//! slider) is the caller's policy, not the pipeline's.

pub mod blur;
mod canny;
pub mod diagnostics;
pub mod edge;
pub mod export;
pub mod grayscale;
pub mod kernel;
pub mod pipeline;
pub mod threshold;
pub mod types;

pub use diagnostics::{PipelineDiagnostics, RunSummary};
pub use kernel::Kernel;
pub use pipeline::Pipeline;
pub use types::{Dimensions, PipelineConfig, PipelineError, ProcessResult, StagedResult};

/// Run the full pipeline, keeping only the final output.
///
/// Takes raw image bytes (PNG, JPEG, BMP, WebP, GIF) and a
/// configuration, and produces a [`ProcessResult`] with the binary
/// line-art image at the source dimensions.
///
/// # Errors
///
/// Returns [`PipelineError::InvalidConfig`] if the configuration is
/// rejected, [`PipelineError::EmptyInput`] if `image_bytes` is empty,
/// and [`PipelineError::ImageDecode`] if the bytes are not a
/// recognizable image.
pub fn process(
    image_bytes: &[u8],
    config: &PipelineConfig,
) -> Result<ProcessResult, PipelineError> {
    Ok(Pipeline::new(image_bytes.to_vec(), *config)
        .decode()?
        .smooth()
        .binarize()
        .into_result())
}

/// Run the full pipeline, keeping every intermediate stage.
///
/// Like [`process`], but the returned [`StagedResult`] retains the
/// decoded original, the grayscale conversion, and the smoothed image
/// alongside the output, for previews and debugging dumps.
///
/// # Errors
///
/// Same as [`process`].
pub fn process_staged(
    image_bytes: &[u8],
    config: &PipelineConfig,
) -> Result<StagedResult, PipelineError> {
    Ok(Pipeline::new(image_bytes.to_vec(), *config)
        .decode()?
        .smooth()
        .binarize()
        .into_staged())
}

/// Run the full pipeline, collecting per-stage wall-clock timings.
///
/// # Errors
///
/// Same as [`process`].
pub fn process_timed(
    image_bytes: &[u8],
    config: &PipelineConfig,
) -> Result<(StagedResult, PipelineDiagnostics), PipelineError> {
    let start = std::time::Instant::now();

    let decoded = Pipeline::new(image_bytes.to_vec(), *config).decode()?;
    let decode = start.elapsed();

    let smooth_start = std::time::Instant::now();
    let smoothed = decoded.smooth();
    let smooth = smooth_start.elapsed();

    let binarize_start = std::time::Instant::now();
    let binarized = smoothed.binarize();
    let binarize = binarize_start.elapsed();

    let staged = binarized.into_staged();
    let diagnostics = PipelineDiagnostics {
        decode,
        smooth,
        binarize,
        total: start.elapsed(),
        summary: RunSummary::of_output(&staged.output, staged.dimensions),
    };
    Ok((staged, diagnostics))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Encode an RGBA image as an in-memory PNG.
    fn encode_png(img: &image::RgbaImage) -> Vec<u8> {
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

    /// PNG with a sharp black/white vertical boundary down the middle.
    fn sharp_edge_png(width: u32, height: u32) -> Vec<u8> {
        encode_png(&image::RgbaImage::from_fn(width, height, |x, _y| {
            if x < width / 2 {
                image::Rgba([0, 0, 0, 255])
            } else {
                image::Rgba([255, 255, 255, 255])
            }
        }))
    }

    #[test]
    fn process_empty_input() {
        let result = process(&[], &PipelineConfig::default());
        assert!(matches!(result, Err(PipelineError::EmptyInput)));
    }

    #[test]
    fn process_corrupt_input() {
        let result = process(&[0xFF, 0x00], &PipelineConfig::default());
        assert!(matches!(result, Err(PipelineError::ImageDecode(_))));
    }

    #[test]
    fn process_preserves_dimensions() {
        let png = sharp_edge_png(40, 30);
        for config in [
            PipelineConfig::edge_detect_defaults(),
            PipelineConfig::adaptive_threshold_defaults(),
        ] {
            let result = process(&png, &config).unwrap();
            assert_eq!(
                result.dimensions,
                Dimensions {
                    width: 40,
                    height: 30,
                },
            );
            assert_eq!(result.image.dimensions(), (40, 30));
        }
    }

    #[test]
    fn process_sharp_edge_produces_ink() {
        let result = process(&sharp_edge_png(40, 40), &PipelineConfig::default()).unwrap();
        let ink: u32 = result.image.pixels().map(|p| u32::from(p.0[0] == 0)).sum();
        assert!(ink > 0, "expected ink pixels at the boundary");
    }

    #[test]
    fn process_staged_keeps_intermediates() {
        let staged = process_staged(&sharp_edge_png(40, 40), &PipelineConfig::default()).unwrap();
        assert_eq!(staged.original.dimensions(), (40, 40));
        assert_eq!(staged.grayscale.dimensions(), (40, 40));
        assert_eq!(staged.smoothed.dimensions(), (40, 40));
        assert_eq!(staged.output.dimensions(), (40, 40));
    }

    #[test]
    fn process_timed_matches_untimed_output() {
        let png = sharp_edge_png(40, 40);
        let config = PipelineConfig::default();
        let (staged, diagnostics) = process_timed(&png, &config).unwrap();
        let untimed = process(&png, &config).unwrap();

        assert_eq!(staged.output, untimed.image);
        assert!(diagnostics.total >= diagnostics.smooth);
        assert_eq!(diagnostics.summary.dimensions, untimed.dimensions);
    }

    #[test]
    fn adaptive_variant_produces_line_art() {
        let config = PipelineConfig::adaptive_threshold_defaults();
        let staged = process_staged(&sharp_edge_png(60, 60), &config).unwrap();

        // Binary output: nothing but ink and background values.
        assert!(
            staged.output.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255),
            "adaptive output must be two-valued",
        );
    }
}
