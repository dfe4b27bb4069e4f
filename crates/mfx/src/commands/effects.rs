//! `mfx effects` -- split model formulas into structural parts.

use std::io::Read;

use anyhow::{Context, bail};
use modelfx_formula::splitter::extract_model_effects;
use modelfx_formula::types::EffectsTable;

use crate::cli::{EffectsArgs, GlobalArgs};
use crate::output::{output_json, output_table};

pub fn run(global: &GlobalArgs, args: &EffectsArgs) -> anyhow::Result<()> {
    let formulas = collect_formulas(args)?;
    if formulas.is_empty() {
        bail!("no formulas given: pass them as arguments or via --file");
    }
    tracing::debug!(count = formulas.len(), "splitting formula batch");

    let table = extract_model_effects(&formulas)?;

    if global.json {
        output_json(&table);
    } else if !global.quiet {
        print_table(&table);
    }
    Ok(())
}

/// Gather formulas from positional arguments and, optionally, a file
/// ("-" reads stdin). Blank lines are skipped.
fn collect_formulas(args: &EffectsArgs) -> anyhow::Result<Vec<String>> {
    let mut formulas = args.formulas.clone();
    if let Some(ref path) = args.file {
        let content = if path == "-" {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read formulas from stdin")?;
            buf
        } else {
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read formulas from {path}"))?
        };
        formulas.extend(
            content
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(str::to_string),
        );
    }
    Ok(formulas)
}

/// Render the table with the RANDOM column only when the batch has
/// random effects anywhere.
fn print_table(table: &EffectsTable) {
    let mut headers = vec!["MODEL", "DEPENDENT", "FIXED"];
    if table.has_random() {
        headers.push("RANDOM");
    }

    let rows: Vec<Vec<String>> = table
        .rows()
        .iter()
        .map(|row| {
            let mut cells = vec![
                row.model.clone(),
                row.dependent.clone(),
                row.fixed.clone(),
            ];
            if table.has_random() {
                cells.push(row.random.clone().unwrap_or_default());
            }
            cells
        })
        .collect();

    output_table(&headers, &rows);
}
