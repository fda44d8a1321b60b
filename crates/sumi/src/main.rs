//! sumi: CLI bitmap tracer.
//!
//! Decodes a raster image, binarizes it against a fixed or automatic
//! threshold, traces the result into smooth vector paths, and writes
//! an SVG file.
//!
//! # Usage
//!
//! ```text
//! sumi input.png -o output.svg [OPTIONS]
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use image::GenericImageView;

use sumi_export::{SvgMetadata, SvgOptions, to_svg};
use sumi_trace::{Bitmap, TraceConfig, TurnPolicy, trace};

/// Trace a raster image into an SVG vector path.
///
/// Dark pixels become the traced shape; pass `--white-on-black` for
/// inverted artwork. All tracing parameters default to values that
/// work well for scanned line art and logos.
#[derive(Parser)]
#[command(name = "sumi", version)]
struct Cli {
    /// Path to the input image (PNG, JPEG, BMP, WebP).
    input: PathBuf,

    /// Output SVG path. Defaults to the input path with an `.svg`
    /// extension.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Binarization threshold: a luminance value 0-255, or `auto` to
    /// pick one from the image histogram.
    #[arg(long, default_value = "auto", value_parser = parse_threshold)]
    threshold: Threshold,

    /// Trace light shapes on a dark background.
    #[arg(long)]
    white_on_black: bool,

    /// How to resolve ambiguous corners during boundary tracing.
    #[arg(long, value_enum, default_value_t = Policy::Minority)]
    turn_policy: Policy,

    /// Drop contours enclosing this many pixels or fewer.
    #[arg(long, default_value_t = TraceConfig::DEFAULT_TURD_SIZE)]
    turd_size: i64,

    /// Corner threshold; higher values smooth more corners away.
    #[arg(long, default_value_t = TraceConfig::DEFAULT_ALPHA_MAX)]
    alpha_max: f64,

    /// Keep every smoothed segment instead of joining curve runs.
    #[arg(long)]
    no_curve_optimization: bool,

    /// Maximum deviation allowed when joining curve runs, in pixels.
    #[arg(long, default_value_t = TraceConfig::DEFAULT_OPT_TOLERANCE)]
    opt_tolerance: f64,

    /// Uniform output scale factor.
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Fill color of the traced shape.
    #[arg(long, default_value = "black")]
    fill: String,

    /// Background color; omitted when not set.
    #[arg(long)]
    background: Option<String>,
}

/// Binarization threshold selection.
#[derive(Debug, Clone, Copy)]
enum Threshold {
    /// Otsu's method over the luminance histogram.
    Auto,
    /// Fixed luminance cutoff.
    Fixed(u8),
}

fn parse_threshold(raw: &str) -> Result<Threshold, String> {
    if raw.eq_ignore_ascii_case("auto") {
        return Ok(Threshold::Auto);
    }
    raw.parse::<u8>()
        .map(Threshold::Fixed)
        .map_err(|_| format!("expected a value 0-255 or `auto`, got `{raw}`"))
}

/// Turn policy selection.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Policy {
    /// Always favor the set color.
    Black,
    /// Always favor the clear color.
    White,
    /// Always turn left.
    Left,
    /// Always turn right.
    Right,
    /// Favor the color in the minority around the corner.
    Minority,
    /// Favor the color in the majority around the corner.
    Majority,
}

impl From<Policy> for TurnPolicy {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::Black => Self::Black,
            Policy::White => Self::White,
            Policy::Left => Self::Left,
            Policy::Right => Self::Right,
            Policy::Minority => Self::Minority,
            Policy::Majority => Self::Majority,
        }
    }
}

/// Pick a threshold with Otsu's method: maximize the between-class
/// variance of the split luminance histogram. The returned cutoff is
/// exclusive, matching the `luma < cutoff` binarization below.
fn otsu_threshold(histogram: &[u64; 256]) -> u8 {
    let total: u64 = histogram.iter().sum();
    if total == 0 {
        return 128;
    }

    let sum_all: f64 = histogram
        .iter()
        .enumerate()
        .map(|(level, &count)| level as f64 * count as f64)
        .sum();

    let mut sum_bg = 0.0f64;
    let mut weight_bg = 0u64;
    let mut best_level = 0u8;
    let mut best_variance = 0.0f64;

    for (level, &count) in histogram.iter().enumerate() {
        weight_bg += count;
        if weight_bg == 0 {
            continue;
        }
        let weight_fg = total - weight_bg;
        if weight_fg == 0 {
            break;
        }
        sum_bg += level as f64 * count as f64;

        let mean_bg = sum_bg / weight_bg as f64;
        let mean_fg = (sum_all - sum_bg) / weight_fg as f64;
        let variance =
            weight_bg as f64 * weight_fg as f64 * (mean_bg - mean_fg) * (mean_bg - mean_fg);
        if variance > best_variance {
            best_variance = variance;
            best_level = level as u8;
        }
    }

    // The dark class is `..=best_level`; the exclusive cutoff is one
    // above it.
    best_level.saturating_add(1)
}

/// Decode and binarize the input image. Set pixels are the shape to
/// trace.
fn load_bitmap(path: &Path, threshold: Threshold, white_on_black: bool) -> Result<Bitmap, String> {
    let img = image::open(path).map_err(|e| format!("Error decoding {}: {e}", path.display()))?;
    let (width, height) = img.dimensions();
    let luma = img.into_luma8();

    let cutoff = match threshold {
        Threshold::Fixed(value) => value,
        Threshold::Auto => {
            let mut histogram = [0u64; 256];
            for pixel in luma.pixels() {
                histogram[usize::from(pixel.0[0])] += 1;
            }
            otsu_threshold(&histogram)
        }
    };

    let data = luma
        .pixels()
        .map(|pixel| {
            let dark = pixel.0[0] < cutoff;
            u8::from(dark != white_on_black)
        })
        .collect();

    Bitmap::from_raw(width, height, data).map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let bitmap = match load_bitmap(&cli.input, cli.threshold, cli.white_on_black) {
        Ok(bitmap) => bitmap,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };
    let dimensions = bitmap.dimensions();

    let config = TraceConfig {
        turn_policy: cli.turn_policy.into(),
        turd_size: cli.turd_size,
        alpha_max: cli.alpha_max,
        optimize_curve: !cli.no_curve_optimization,
        opt_tolerance: cli.opt_tolerance,
    };

    let paths = match trace(bitmap, &config) {
        Ok(paths) => paths,
        Err(e) => {
            eprintln!("Error tracing {}: {e}", cli.input.display());
            return ExitCode::FAILURE;
        }
    };

    let title = cli
        .input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned());
    let description = format!(
        "turn-policy={:?} turd-size={} alpha-max={} opt-tolerance={}",
        config.turn_policy, config.turd_size, config.alpha_max, config.opt_tolerance,
    );
    let metadata = SvgMetadata {
        title: title.as_deref(),
        description: Some(&description),
    };
    let options = SvgOptions {
        scale: cli.scale,
        fill: &cli.fill,
        background: cli.background.as_deref(),
    };
    let document = to_svg(&paths, dimensions, &options, &metadata);

    let output = cli
        .output
        .unwrap_or_else(|| cli.input.with_extension("svg"));
    if let Err(e) = std::fs::write(&output, document) {
        eprintln!("Error writing {}: {e}", output.display());
        return ExitCode::FAILURE;
    }

    eprintln!(
        "Traced {} contour(s) from {} -> {}",
        paths.len(),
        cli.input.display(),
        output.display(),
    );
    ExitCode::SUCCESS
}
