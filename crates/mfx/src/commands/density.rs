//! `mfx density` -- build an overlay density chart description from
//! evaluation-metric frames.

use std::path::Path;

use anyhow::Context;
use modelfx_plot::density::{DensityChart, DensitySpec, build_density_chart};
use modelfx_plot::frame::EvalFrame;

use crate::cli::{DensityArgs, GlobalArgs};
use crate::output::output_json;

pub fn run(global: &GlobalArgs, args: &DensityArgs) -> anyhow::Result<()> {
    let results = args.results.as_deref().map(load_frame).transpose()?;
    let baseline = args.baseline.as_deref().map(load_frame).transpose()?;

    let spec = DensitySpec {
        results,
        baseline,
        metric: args.metric.clone(),
        fills: [args.fill[0].clone(), args.fill[1].clone()],
        alpha: args.alpha,
        x_range: args.xlim,
        facet: args.facet.clone(),
    };
    let chart = build_density_chart(&spec)?;

    if global.json {
        output_json(&chart);
    } else if !global.quiet {
        print_summary(&chart);
    }
    Ok(())
}

/// Load an [`EvalFrame`] from a JSON file.
fn load_frame(path: &Path) -> anyhow::Result<EvalFrame> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read frame from {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("invalid frame JSON in {}", path.display()))
}

/// Human-readable one-screen summary; the full chart object is `--json`.
fn print_summary(chart: &DensityChart) {
    println!(
        "density chart for {:?}: {} layer(s), alpha {}",
        chart.metric,
        chart.layers.len(),
        chart.alpha
    );
    for layer in &chart.layers {
        println!(
            "  {}: {} observations, fill {}",
            layer.source,
            layer.values.len(),
            layer.fill
        );
    }
    if let Some((lo, hi)) = chart.x_range {
        println!("  x-range: [{lo}, {hi}]");
    }
    if let Some(ref facet) = chart.facet {
        println!("  faceted by {facet:?}");
    }
}
