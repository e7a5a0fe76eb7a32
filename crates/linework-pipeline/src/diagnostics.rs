//! Pipeline diagnostics: per-stage timing and output metrics.
//!
//! Collected by [`process_timed`](crate::process_timed) for parameter
//! tuning and bottleneck hunting. Durations are serialized as
//! fractional seconds (`f64`) for JSON compatibility, since
//! [`std::time::Duration`] does not implement serde traits.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::{Dimensions, GrayImage};

/// Serde support for `std::time::Duration` as fractional seconds.
mod duration_serde {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs_f64().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(|_| {
            serde::de::Error::custom(
                "duration seconds must be finite, non-negative, and representable as a Duration",
            )
        })
    }
}

/// Diagnostics collected from a single pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineDiagnostics {
    /// Stage 0+1: decode and grayscale conversion.
    #[serde(with = "duration_serde")]
    pub decode: Duration,
    /// Stage 2: smoothing (Gaussian or median, per variant).
    #[serde(with = "duration_serde")]
    pub smooth: Duration,
    /// Stage 3: binarization (Canny + inversion, or adaptive mean).
    #[serde(with = "duration_serde")]
    pub binarize: Duration,
    /// Wall-clock duration of the entire run.
    #[serde(with = "duration_serde")]
    pub total: Duration,
    /// Summary of the run's output.
    pub summary: RunSummary,
}

/// Output metrics for a completed run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Source (and output) dimensions in pixels.
    pub dimensions: Dimensions,
    /// Number of ink (0-valued) pixels in the output.
    pub ink_pixels: u64,
    /// Ink pixels as a fraction of the whole image, 0.0–1.0.
    pub ink_fraction: f64,
}

impl RunSummary {
    /// Summarize a binary output image.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn of_output(output: &GrayImage, dimensions: Dimensions) -> Self {
        let ink_pixels = output.pixels().filter(|p| p.0[0] == 0).count() as u64;
        let total = u64::from(dimensions.width) * u64::from(dimensions.height);
        let ink_fraction = if total == 0 {
            0.0
        } else {
            ink_pixels as f64 / total as f64
        };
        Self {
            dimensions,
            ink_pixels,
            ink_fraction,
        }
    }
}
