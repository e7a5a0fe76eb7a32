//! Shared types for the linework processing pipeline.

use serde::{Deserialize, Serialize};

use crate::kernel::Kernel;

/// Re-export `GrayImage` so downstream crates can reference
/// intermediate raster data without depending on `image` directly.
pub use image::GrayImage;

/// Re-export `RgbaImage` so downstream crates can reference the
/// original decoded image without depending on `image` directly.
pub use image::RgbaImage;

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Configuration for one pipeline invocation: which line-art variant to
/// run and its parameters.
///
/// The two variants share a decode → grayscale → smooth → binarize
/// shape but differ in the smoothing filter and the binarization
/// operator:
///
/// - [`EdgeDetect`](Self::EdgeDetect): Gaussian blur, then Canny edge
///   detection with hysteresis thresholds, then (by default) polarity
///   inversion so edges print as black ink on white paper. Suited for
///   tattoo stencils.
/// - [`AdaptiveThreshold`](Self::AdaptiveThreshold): median blur (keeps
///   hard edges while removing speckle), then adaptive mean
///   thresholding against the local neighborhood. Suited for coloring
///   pages where illumination varies across the photo.
///
/// All kernel fields are [`Kernel`] values and therefore odd by
/// construction; even sizes supplied through serde or [`Kernel`]
/// constructors round up to the next odd size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "kebab-case")]
pub enum PipelineConfig {
    /// Canny-based stencil extraction.
    EdgeDetect {
        /// Gaussian smoothing kernel applied before edge detection.
        /// Larger kernels suppress more noise and keep fewer, coarser
        /// edges.
        smoothing: Kernel,

        /// Hysteresis low threshold. Pixels with gradient magnitude
        /// between `low_threshold` and `high_threshold` are edges only
        /// if 8-connected to a definite edge.
        low_threshold: f32,

        /// Hysteresis high threshold. Pixels with gradient magnitude
        /// above this value are definite edges.
        high_threshold: f32,

        /// Invert the binary edge map so edges are black (0) on a
        /// white (255) background — the stencil print convention.
        invert: bool,
    },

    /// Adaptive-mean-threshold coloring-page extraction.
    AdaptiveThreshold {
        /// Median blur kernel applied before thresholding.
        smoothing: Kernel,

        /// Neighborhood size for the local mean ("line thickness").
        block_size: Kernel,
    },
}

impl PipelineConfig {
    /// Default Gaussian smoothing radius for the edge-detect variant
    /// (kernel size 7).
    pub const DEFAULT_SMOOTHING_RADIUS: u32 = 3;
    /// Default Canny low threshold.
    pub const DEFAULT_LOW_THRESHOLD: f32 = 50.0;
    /// Default Canny high threshold.
    pub const DEFAULT_HIGH_THRESHOLD: f32 = 100.0;
    /// Default median blur kernel size for the adaptive variant.
    pub const DEFAULT_MEDIAN_KERNEL: u32 = 7;
    /// Default adaptive threshold neighborhood size.
    pub const DEFAULT_BLOCK_SIZE: u32 = 9;

    /// Edge-detect variant with default parameters.
    #[must_use]
    pub const fn edge_detect_defaults() -> Self {
        Self::EdgeDetect {
            smoothing: Kernel::from_radius(Self::DEFAULT_SMOOTHING_RADIUS),
            low_threshold: Self::DEFAULT_LOW_THRESHOLD,
            high_threshold: Self::DEFAULT_HIGH_THRESHOLD,
            invert: true,
        }
    }

    /// Adaptive-threshold variant with default parameters.
    #[must_use]
    pub const fn adaptive_threshold_defaults() -> Self {
        Self::AdaptiveThreshold {
            smoothing: Kernel::force_odd(Self::DEFAULT_MEDIAN_KERNEL),
            block_size: Kernel::force_odd(Self::DEFAULT_BLOCK_SIZE),
        }
    }

    /// The smoothing kernel for either variant.
    #[must_use]
    pub const fn smoothing(&self) -> Kernel {
        match self {
            Self::EdgeDetect { smoothing, .. } | Self::AdaptiveThreshold { smoothing, .. } => {
                *smoothing
            }
        }
    }

    /// Check parameters that the binarization backends would reject.
    ///
    /// Non-finite Canny thresholds would poison the hysteresis
    /// comparisons, and an adaptive neighborhood smaller than 3 pixels
    /// has no neighbors to average — the "local mean" degenerates to
    /// the pixel itself and every pixel classifies as background.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidConfig`] describing the
    /// offending parameter.
    pub fn validate(&self) -> Result<(), PipelineError> {
        match *self {
            Self::EdgeDetect {
                low_threshold,
                high_threshold,
                ..
            } => {
                if !low_threshold.is_finite() || !high_threshold.is_finite() {
                    return Err(PipelineError::InvalidConfig(format!(
                        "Canny thresholds must be finite, got low={low_threshold} high={high_threshold}"
                    )));
                }
                Ok(())
            }
            Self::AdaptiveThreshold { block_size, .. } => {
                if block_size.size() < 3 {
                    return Err(PipelineError::InvalidConfig(format!(
                        "adaptive threshold block size must be at least 3, got {}",
                        block_size.size()
                    )));
                }
                Ok(())
            }
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::edge_detect_defaults()
    }
}

/// Result of running the pipeline: the binary line-art image.
#[derive(Debug, Clone)]
pub struct ProcessResult {
    /// The binarized output. For the edge-detect variant with
    /// `invert = true` (and always for the adaptive variant), ink is
    /// 0 and background is 255.
    pub image: GrayImage,

    /// Dimensions of the source image in pixels. Always equal to the
    /// output image's dimensions.
    pub dimensions: Dimensions,
}

/// Result of running the pipeline with all intermediate stage outputs
/// preserved, for stage previews and debugging dumps.
///
/// Does not derive `PartialEq`; callers that need comparison can
/// compare the individual raster buffers.
#[derive(Debug, Clone)]
pub struct StagedResult {
    /// Stage 0: original decoded RGBA image.
    pub original: RgbaImage,
    /// Stage 1: grayscale conversion.
    pub grayscale: GrayImage,
    /// Stage 2: smoothed image (Gaussian or median, per variant).
    pub smoothed: GrayImage,
    /// Stage 3: binarized line-art output.
    pub output: GrayImage,
    /// Source image dimensions in pixels.
    pub dimensions: Dimensions,
}

/// Errors that can occur during pipeline processing.
///
/// Two classes: decode-class errors ([`EmptyInput`](Self::EmptyInput),
/// [`ImageDecode`](Self::ImageDecode)) mean the input file is the
/// problem and the remediation is a different upload; process-class
/// errors ([`InvalidConfig`](Self::InvalidConfig),
/// [`PngEncode`](Self::PngEncode)) mean this invocation failed and the
/// remediation is adjusted parameters. [`is_decode`](Self::is_decode)
/// distinguishes the two for caller-facing messages. No variant is
/// automatically retryable: the pipeline is deterministic, so the same
/// input and parameters will fail the same way.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to decode the input image.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// The input image bytes were empty.
    #[error("input image data is empty")]
    EmptyInput,

    /// Pipeline configuration was rejected before processing.
    #[error("invalid pipeline configuration: {0}")]
    InvalidConfig(String),

    /// Failed to encode the output image as PNG.
    #[error("failed to encode PNG output: {0}")]
    PngEncode(#[source] image::ImageError),
}

impl PipelineError {
    /// Whether this error means the input could not be loaded (as
    /// opposed to processing having failed).
    #[must_use]
    pub const fn is_decode(&self) -> bool {
        matches!(self, Self::ImageDecode(_) | Self::EmptyInput)
    }
}
