//! Incremental pipeline: advance stage-by-stage, inspecting each
//! intermediate result before continuing.
//!
//! Unlike [`crate::process`] which runs the entire pipeline in one
//! call, [`Pipeline`] lets the caller drive execution one step at a
//! time:
//!
//! ```rust
//! # use linework_pipeline::{Pipeline, PipelineConfig, PipelineError};
//! # fn run(png: Vec<u8>) -> Result<(), PipelineError> {
//! let config = PipelineConfig::default();
//! let binarized = Pipeline::new(png, config)
//!     .decode()?
//!     .smooth()
//!     .binarize();
//!
//! let staged = binarized.into_staged();
//! # Ok(())
//! # }
//! ```
//!
//! Each stage method consumes `self` and returns the next pipeline
//! state, carrying all previously computed intermediates. The caller
//! can inspect the current stage's output via accessor methods at any
//! point.
//!
//! The pipeline object is also the processing capability: everything a
//! run needs (source bytes, parameters, backend operators) is owned by
//! the value being advanced, and a run is "ready" exactly when the
//! value exists. There is no ambient engine state to poll and nothing
//! shared between concurrent invocations.

use crate::types::{
    Dimensions, GrayImage, PipelineConfig, PipelineError, ProcessResult, RgbaImage, StagedResult,
};

/// Entry point for incremental processing.
pub struct Pipeline;

impl Pipeline {
    /// Begin a pipeline run over `source` with `config`.
    ///
    /// Nothing is processed until [`Pending::decode`] is called.
    #[must_use]
    pub const fn new(source: Vec<u8>, config: PipelineConfig) -> Pending {
        Pending { config, source }
    }
}

// ───────────────────────── Stage 0: Pending ──────────────────────────

/// Pipeline state before any processing has occurred.
#[must_use = "pipeline stages are consumed by advancing — call .decode() to continue"]
pub struct Pending {
    config: PipelineConfig,
    source: Vec<u8>,
}

impl Pending {
    /// The raw source image bytes.
    #[must_use]
    pub fn source(&self) -> &[u8] {
        &self.source
    }

    /// Validate the configuration, decode the source image, and
    /// advance to the [`Decoded`] stage.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidConfig`] if the configuration
    /// would be rejected by a later stage,
    /// [`PipelineError::EmptyInput`] if the source bytes are empty, or
    /// [`PipelineError::ImageDecode`] if the image format is
    /// unrecognized or the data is corrupt.
    pub fn decode(self) -> Result<Decoded, PipelineError> {
        self.config.validate()?;
        let image = crate::grayscale::decode(&self.source)?;
        let original = crate::grayscale::to_rgba(&image);
        let grayscale = crate::grayscale::to_grayscale(&original);
        let dimensions = Dimensions {
            width: grayscale.width(),
            height: grayscale.height(),
        };
        Ok(Decoded {
            config: self.config,
            original,
            grayscale,
            dimensions,
        })
    }
}

// ───────────────────────── Stage 1: Decoded ──────────────────────────

/// Pipeline state after decoding and grayscale conversion.
#[must_use = "pipeline stages are consumed by advancing — call .smooth() to continue"]
pub struct Decoded {
    config: PipelineConfig,
    original: RgbaImage,
    grayscale: GrayImage,
    dimensions: Dimensions,
}

impl Decoded {
    /// The original decoded RGBA image.
    #[must_use]
    pub const fn original(&self) -> &RgbaImage {
        &self.original
    }

    /// The grayscale conversion of the source.
    #[must_use]
    pub const fn grayscale(&self) -> &GrayImage {
        &self.grayscale
    }

    /// Source image dimensions.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Apply the variant's smoothing filter and advance to the
    /// [`Smoothed`] stage: Gaussian blur for edge detection, median
    /// blur for adaptive thresholding.
    pub fn smooth(self) -> Smoothed {
        let smoothed = match self.config {
            PipelineConfig::EdgeDetect { smoothing, .. } => {
                crate::blur::gaussian_blur(&self.grayscale, smoothing)
            }
            PipelineConfig::AdaptiveThreshold { smoothing, .. } => {
                crate::blur::median_blur(&self.grayscale, smoothing)
            }
        };
        Smoothed {
            config: self.config,
            original: self.original,
            grayscale: self.grayscale,
            smoothed,
            dimensions: self.dimensions,
        }
    }
}

// ───────────────────────── Stage 2: Smoothed ─────────────────────────

/// Pipeline state after noise-reduction smoothing.
#[must_use = "pipeline stages are consumed by advancing — call .binarize() to continue"]
pub struct Smoothed {
    config: PipelineConfig,
    original: RgbaImage,
    grayscale: GrayImage,
    smoothed: GrayImage,
    dimensions: Dimensions,
}

impl Smoothed {
    /// The smoothed grayscale image.
    #[must_use]
    pub const fn smoothed(&self) -> &GrayImage {
        &self.smoothed
    }

    /// Run the variant's binarization operator and advance to the
    /// final [`Binarized`] stage: Canny plus optional inversion for the
    /// edge-detect variant, local-mean thresholding for the adaptive
    /// variant.
    pub fn binarize(self) -> Binarized {
        let output = match self.config {
            PipelineConfig::EdgeDetect {
                low_threshold,
                high_threshold,
                invert,
                ..
            } => {
                let edges = crate::edge::canny(&self.smoothed, low_threshold, high_threshold);
                if invert {
                    crate::edge::invert(&edges)
                } else {
                    edges
                }
            }
            PipelineConfig::AdaptiveThreshold { block_size, .. } => {
                crate::threshold::adaptive_mean_threshold(
                    &self.smoothed,
                    block_size,
                    crate::threshold::MEAN_OFFSET,
                )
            }
        };
        Binarized {
            original: self.original,
            grayscale: self.grayscale,
            smoothed: self.smoothed,
            output,
            dimensions: self.dimensions,
        }
    }
}

// ───────────────────────── Stage 3: Binarized ────────────────────────

/// Final pipeline state: the binary line-art image is ready.
#[must_use = "consume the result with .into_staged() or .into_result()"]
pub struct Binarized {
    original: RgbaImage,
    grayscale: GrayImage,
    smoothed: GrayImage,
    output: GrayImage,
    dimensions: Dimensions,
}

impl Binarized {
    /// The binary line-art output.
    #[must_use]
    pub const fn output(&self) -> &GrayImage {
        &self.output
    }

    /// Source image dimensions (equal to the output dimensions).
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Consume the pipeline, keeping every intermediate stage.
    #[must_use]
    pub fn into_staged(self) -> StagedResult {
        StagedResult {
            original: self.original,
            grayscale: self.grayscale,
            smoothed: self.smoothed,
            output: self.output,
            dimensions: self.dimensions,
        }
    }

    /// Consume the pipeline, keeping only the final output.
    #[must_use]
    pub fn into_result(self) -> ProcessResult {
        ProcessResult {
            image: self.output,
            dimensions: self.dimensions,
        }
    }
}
