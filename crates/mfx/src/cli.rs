//! Clap CLI definitions for the `mfx` command.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// mfx -- model-evaluation utilities.
///
/// Decomposes model-formula strings into their structural parts and
/// prepares evaluation-metric density charts.
#[derive(Parser, Debug)]
#[command(
    name = "mfx",
    about = "Model-evaluation utilities",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global flags available to all subcommands.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Output in JSON format.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose/debug output.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output (errors only).
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,
}

/// All available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split model formulas into dependent, fixed, and random parts.
    #[command(alias = "split")]
    Effects(EffectsArgs),

    /// Build an overlay density chart description for an evaluation metric.
    Density(DensityArgs),
}

/// Arguments for `mfx effects`.
#[derive(Args, Debug)]
pub struct EffectsArgs {
    /// Formula strings, e.g. "y ~ x1 + x2 + (1|subject)".
    pub formulas: Vec<String>,

    /// Read formulas one per line from a file ("-" for stdin).
    #[arg(short = 'f', long)]
    pub file: Option<String>,
}

/// Arguments for `mfx density`.
#[derive(Args, Debug)]
pub struct DensityArgs {
    /// JSON frame with the results metric distribution.
    #[arg(long)]
    pub results: Option<PathBuf>,

    /// JSON frame with the baseline metric distribution.
    #[arg(long)]
    pub baseline: Option<PathBuf>,

    /// Metric column to plot; must exist in every supplied frame.
    #[arg(short = 'm', long)]
    pub metric: String,

    /// Fill colors for the Results and Baseline layers.
    #[arg(
        long,
        num_args = 2,
        value_names = ["RESULTS", "BASELINE"],
        default_values = ["#2c7fb8", "#d95f0e"]
    )]
    pub fill: Vec<String>,

    /// Fill opacity, in [0, 1].
    #[arg(long, default_value_t = 0.5)]
    pub alpha: f64,

    /// Fixed x-axis range as "LO,HI".
    #[arg(long, value_parser = parse_xlim, value_name = "LO,HI")]
    pub xlim: Option<(f64, f64)>,

    /// Categorical column to facet by.
    #[arg(long)]
    pub facet: Option<String>,
}

/// Parse an "LO,HI" pair into an x-axis range.
fn parse_xlim(s: &str) -> Result<(f64, f64), String> {
    let Some((lo, hi)) = s.split_once(',') else {
        return Err(format!("expected LO,HI but got {s:?}"));
    };
    let lo: f64 = lo
        .trim()
        .parse()
        .map_err(|_| format!("invalid lower bound {lo:?}"))?;
    let hi: f64 = hi
        .trim()
        .parse()
        .map_err(|_| format!("invalid upper bound {hi:?}"))?;
    Ok((lo, hi))
}
