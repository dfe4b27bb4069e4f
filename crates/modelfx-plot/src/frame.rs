//! Minimal named-column table for evaluation metrics.
//!
//! A frame maps column names to either numeric or categorical columns.
//! The JSON form is a plain object, e.g.
//! `{"rmse": [0.4, 0.5], "fold": ["a", "b"]}`, so frames can be produced
//! by any evaluation pipeline and loaded from files by the CLI.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single column: all-numeric or all-categorical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Column {
    Numeric(Vec<f64>),
    Categorical(Vec<String>),
}

/// Named-column table holding one evaluation run's metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvalFrame {
    columns: BTreeMap<String, Column>,
}

impl EvalFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a numeric column.
    pub fn insert_numeric(&mut self, name: impl Into<String>, values: Vec<f64>) {
        self.columns.insert(name.into(), Column::Numeric(values));
    }

    /// Insert or replace a categorical column.
    pub fn insert_categorical(&mut self, name: impl Into<String>, values: Vec<String>) {
        self.columns.insert(name.into(), Column::Categorical(values));
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    /// The numeric values of a column, if it exists and is numeric.
    pub fn numeric(&self, name: &str) -> Option<&[f64]> {
        match self.columns.get(name) {
            Some(Column::Numeric(v)) => Some(v),
            _ => None,
        }
    }

    /// The categorical values of a column, if it exists and is categorical.
    pub fn categorical(&self, name: &str) -> Option<&[String]> {
        match self.columns.get(name) {
            Some(Column::Categorical(v)) => Some(v),
            _ => None,
        }
    }
}
