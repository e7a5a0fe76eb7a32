//! linework: convert a photograph into printable line art.
//!
//! Two subcommands map to the two pipeline variants:
//!
//! - `linework stencil` — Canny-based edge extraction, black ink lines
//!   on white, for tattoo stencils.
//! - `linework coloring` — adaptive-mean thresholding, for coloring
//!   book pages.
//!
//! Shared flags dump intermediate stages to a directory
//! (`--stages-dir`) and print per-stage timing diagnostics as JSON
//! (`--json`). `--config-json` accepts a full serialized
//! `PipelineConfig` and overrides the parameter flags, which is handy
//! for replaying a configuration captured from diagnostics output.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use linework_pipeline::{
    Kernel, PipelineConfig, PipelineDiagnostics, PipelineError, StagedResult, export,
    process_timed,
};

/// Convert photographs into printable line art.
#[derive(Parser)]
#[command(name = "linework", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract a tattoo-stencil edge drawing (Canny edge detection).
    Stencil {
        /// Path to the input image (PNG, JPEG, BMP, WebP, GIF).
        input: PathBuf,

        /// Output PNG path.
        #[arg(short, long)]
        output: PathBuf,

        /// Gaussian smoothing radius; the kernel size is `2*radius + 1`.
        #[arg(long, default_value_t = PipelineConfig::DEFAULT_SMOOTHING_RADIUS)]
        smoothing: u32,

        /// Canny hysteresis low threshold.
        #[arg(long, default_value_t = PipelineConfig::DEFAULT_LOW_THRESHOLD)]
        low: f32,

        /// Canny hysteresis high threshold.
        #[arg(long, default_value_t = PipelineConfig::DEFAULT_HIGH_THRESHOLD)]
        high: f32,

        /// Keep the raw white-on-black edge map instead of inverting
        /// to the print convention.
        #[arg(long)]
        no_invert: bool,

        #[command(flatten)]
        shared: Shared,
    },

    /// Convert to a coloring-book page (adaptive mean thresholding).
    Coloring {
        /// Path to the input image (PNG, JPEG, BMP, WebP, GIF).
        input: PathBuf,

        /// Output PNG path.
        #[arg(short, long)]
        output: PathBuf,

        /// Median blur kernel size; even values round up to odd.
        #[arg(long, default_value_t = PipelineConfig::DEFAULT_MEDIAN_KERNEL)]
        smoothing: u32,

        /// Local-mean neighborhood ("line thickness") size; even
        /// values round up to odd.
        #[arg(long, default_value_t = PipelineConfig::DEFAULT_BLOCK_SIZE)]
        block_size: u32,

        #[command(flatten)]
        shared: Shared,
    },
}

/// Flags common to both variants.
#[derive(Args)]
struct Shared {
    /// Write grayscale/smoothed/output intermediates as PNGs into
    /// this directory.
    #[arg(long, value_name = "DIR")]
    stages_dir: Option<PathBuf>,

    /// Print per-stage timing diagnostics as JSON to stdout.
    #[arg(long)]
    json: bool,

    /// Full pipeline config as a JSON string.
    ///
    /// When provided, the other pipeline parameter flags are ignored.
    /// The JSON must be a valid `PipelineConfig` serialization.
    #[arg(long, value_name = "JSON")]
    config_json: Option<String>,
}

impl Command {
    /// Input path for either subcommand.
    fn input(&self) -> &Path {
        match self {
            Self::Stencil { input, .. } | Self::Coloring { input, .. } => input,
        }
    }

    /// Output path for either subcommand.
    fn output(&self) -> &Path {
        match self {
            Self::Stencil { output, .. } | Self::Coloring { output, .. } => output,
        }
    }

    fn shared(&self) -> &Shared {
        match self {
            Self::Stencil { shared, .. } | Self::Coloring { shared, .. } => shared,
        }
    }

    /// Resolve the pipeline config from flags, or from `--config-json`
    /// when given.
    fn config(&self) -> Result<PipelineConfig, String> {
        if let Some(json) = &self.shared().config_json {
            return serde_json::from_str(json).map_err(|e| format!("--config-json: {e}"));
        }

        Ok(match *self {
            Self::Stencil {
                smoothing,
                low,
                high,
                no_invert,
                ..
            } => PipelineConfig::EdgeDetect {
                smoothing: Kernel::from_radius(smoothing),
                low_threshold: low,
                high_threshold: high,
                invert: !no_invert,
            },
            Self::Coloring {
                smoothing,
                block_size,
                ..
            } => PipelineConfig::AdaptiveThreshold {
                smoothing: Kernel::force_odd(smoothing),
                block_size: Kernel::force_odd(block_size),
            },
        })
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: &Command) -> Result<(), String> {
    let config = command.config()?;
    let input = command.input();

    eprintln!("Reading image from {}", input.display());
    let image_bytes =
        std::fs::read(input).map_err(|e| format!("reading {}: {e}", input.display()))?;

    eprintln!("Processing...");
    let (staged, diagnostics) =
        process_timed(&image_bytes, &config).map_err(|e| describe_pipeline_error(&e))?;

    let output = command.output();
    write_png(&staged.output, output)?;
    eprintln!(
        "Wrote {} ({}x{}, {:.1}% ink)",
        output.display(),
        staged.dimensions.width,
        staged.dimensions.height,
        diagnostics.summary.ink_fraction * 100.0,
    );

    let shared = command.shared();
    if let Some(dir) = &shared.stages_dir {
        write_stage_dumps(&staged, dir)?;
    }
    if shared.json {
        print_diagnostics(&diagnostics)?;
    }

    Ok(())
}

/// Attach the remediation that matches the error class: decode-class
/// failures need a different input file, process-class failures need
/// adjusted parameters.
fn describe_pipeline_error(error: &PipelineError) -> String {
    if error.is_decode() {
        format!("{error} (the input file could not be loaded; supply a different image)")
    } else {
        format!("{error} (processing failed; adjust parameters and try again)")
    }
}

/// Encode a grayscale stage image and write it to `path`.
fn write_png(image: &linework_pipeline::types::GrayImage, path: &Path) -> Result<(), String> {
    let bytes = export::to_png_bytes(image).map_err(|e| e.to_string())?;
    std::fs::write(path, bytes).map_err(|e| format!("writing {}: {e}", path.display()))
}

/// Dump the grayscale, smoothed, and output stages as PNGs.
fn write_stage_dumps(staged: &StagedResult, dir: &Path) -> Result<(), String> {
    std::fs::create_dir_all(dir).map_err(|e| format!("creating {}: {e}", dir.display()))?;
    for (name, image) in [
        ("grayscale", &staged.grayscale),
        ("smoothed", &staged.smoothed),
        ("output", &staged.output),
    ] {
        let path = dir.join(format!("{name}.png"));
        write_png(image, &path)?;
        eprintln!("Wrote stage dump {}", path.display());
    }
    Ok(())
}

fn print_diagnostics(diagnostics: &PipelineDiagnostics) -> Result<(), String> {
    let json = serde_json::to_string_pretty(diagnostics)
        .map_err(|e| format!("serializing diagnostics: {e}"))?;
    println!("{json}");
    Ok(())
}
