//! Data model for decomposed model formulas.
//!
//! Covers: the per-formula row type, the batch-level table with its
//! "does any row have random effects" flag, and the error taxonomy.

use serde::ser::{Serialize, SerializeSeq, Serializer};

/// One decomposed formula: `dependent ~ fixed + (random)`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ModelEffects {
    /// The original formula string, kept verbatim for traceability.
    pub model: String,

    /// Everything left of the first `~`, whitespace removed.
    pub dependent: String,

    /// Fixed-effect terms with whitespace and a single trailing `+` removed.
    /// Empty when the formula has no fixed predictors.
    pub fixed: String,

    /// Random-effect specification with whitespace and all parentheses
    /// removed. `None` when the formula has no `(...)` grouping.
    pub random: Option<String>,
}

/// Ordered decomposition results for one batch of formulas.
///
/// Row order matches input order. Whether the `random` column appears in
/// serialized output is a batch-level decision: it is present only when at
/// least one row in the batch has a random-effect term. The row type itself
/// always carries `random: Option<String>` so the schema of the Rust API
/// never varies by data; only the serialized shape does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectsTable {
    rows: Vec<ModelEffects>,
    has_random: bool,
}

impl EffectsTable {
    /// Build a table from parsed rows, computing the batch-level flag.
    pub(crate) fn new(rows: Vec<ModelEffects>) -> Self {
        let has_random = rows.iter().any(|r| r.random.is_some());
        Self { rows, has_random }
    }

    /// Parsed rows, in input order.
    pub fn rows(&self) -> &[ModelEffects] {
        &self.rows
    }

    /// Whether at least one row in the batch has a random-effect term.
    pub fn has_random(&self) -> bool {
        self.has_random
    }

    /// Number of rows (equals the number of input formulas).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no rows. Never produced by the splitter,
    /// which rejects empty batches, but required by clippy's `len` contract.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<'a> IntoIterator for &'a EffectsTable {
    type Item = &'a ModelEffects;
    type IntoIter = std::slice::Iter<'a, ModelEffects>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// JSON view of a row in a batch without random effects: no `random` key.
#[derive(serde::Serialize)]
struct FixedOnlyView<'a> {
    model: &'a str,
    dependent: &'a str,
    fixed: &'a str,
}

impl Serialize for EffectsTable {
    /// Serializes as an array of row objects. In a batch without random
    /// effects the `random` key is omitted from every row; otherwise every
    /// row carries it, `null` for rows that had none.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in &self.rows {
            if self.has_random {
                seq.serialize_element(row)?;
            } else {
                seq.serialize_element(&FixedOnlyView {
                    model: &row.model,
                    dependent: &row.dependent,
                    fixed: &row.fixed,
                })?;
            }
        }
        seq.end()
    }
}

/// Errors that can occur during formula decomposition.
#[derive(Debug, thiserror::Error)]
pub enum FormulaError {
    /// The input batch had no formulas at all. A caller bug, rejected
    /// before any parsing.
    #[error("empty formula batch: at least one formula is required")]
    EmptyBatch,

    /// A formula had no `~` delimiter, so no dependent/predictor split
    /// exists. The whole batch call fails rather than emitting a null row.
    #[error("formula {index} has no '~' delimiter: {formula:?}")]
    MissingTilde {
        /// Zero-based position of the offending formula in the batch.
        index: usize,
        /// The offending formula, verbatim.
        formula: String,
    },
}
