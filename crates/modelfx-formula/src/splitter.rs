//! Structural decomposition of model-formula strings.
//!
//! This is a best-effort structural splitter keyed on literal delimiters,
//! not a formula-grammar parser. Per formula it runs two "split at most
//! once" stages: first `~` separates the dependent variable from the
//! predictors, first `(` separates fixed-effect terms from the
//! random-effect remainder. Nested parentheses inside the random part never
//! trigger further splits, so compound specifications like
//! `(1|g1)+(1|g2)` survive as one field.

use crate::types::{EffectsTable, FormulaError, ModelEffects};

/// Decompose a batch of model formulas into dependent/fixed/random parts.
///
/// Rows come back in input order, one per formula. The returned table also
/// records whether any formula in the batch has a random-effect term; when
/// none does, serialized output drops the `random` column entirely.
///
/// Fails with [`FormulaError::EmptyBatch`] on an empty batch and with
/// [`FormulaError::MissingTilde`] if any formula lacks a `~`: one malformed
/// formula indicates a caller bug, so the whole call fails rather than
/// emitting a null row deep inside a data pipeline.
pub fn extract_model_effects<I, S>(formulas: I) -> Result<EffectsTable, FormulaError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut iter = formulas.into_iter().peekable();
    if iter.peek().is_none() {
        return Err(FormulaError::EmptyBatch);
    }

    let mut rows = Vec::new();
    for (index, formula) in iter.enumerate() {
        rows.push(split_formula(index, formula.as_ref())?);
    }
    Ok(EffectsTable::new(rows))
}

/// Split a single formula. `index` is only used for error reporting.
fn split_formula(index: usize, formula: &str) -> Result<ModelEffects, FormulaError> {
    // Whitespace placement carries no meaning in formula syntax and would
    // break literal delimiter matching, so drop it all up front.
    let compact: String = formula.chars().filter(|c| !c.is_whitespace()).collect();

    // Stage 1: dependent ~ predictors, split on the FIRST tilde only.
    // There is exactly one dependent variable per formula by construction.
    let Some((dependent, predictors)) = compact.split_once('~') else {
        return Err(FormulaError::MissingTilde {
            index,
            formula: formula.to_string(),
        });
    };

    // Stage 2: fixed terms end at the FIRST open paren; everything from
    // there on is the random-effect remainder, nested groupings included.
    let (fixed, random) = match predictors.split_once('(') {
        Some((fixed, rest)) => (fixed, Some(strip_parens(rest))),
        None => (predictors, None),
    };

    // The `+` that joined the fixed terms to the random term is left
    // dangling by stage 2. Only a single trailing `+` is an artifact;
    // anything else passes through as-is.
    let fixed = fixed.strip_suffix('+').unwrap_or(fixed);

    Ok(ModelEffects {
        model: formula.to_string(),
        dependent: dependent.to_string(),
        fixed: fixed.to_string(),
        random,
    })
}

/// Remove every parenthesis, not just the outermost pair. Grouping parens
/// are decorative to downstream consumers of the random field.
fn strip_parens(s: &str) -> String {
    s.chars().filter(|c| *c != '(' && *c != ')').collect()
}
