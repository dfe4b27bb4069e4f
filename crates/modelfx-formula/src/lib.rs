//! Model-formula decomposition for the modelfx system.
//!
//! A formula string such as `"y ~ x1 + x2 + (1|subject)"` is split into its
//! dependent variable, fixed-effect terms, and random-effect specification.
//! Downstream evaluation code branches on whether a fitted model carries
//! random effects, so the batch result also records whether any formula in
//! the batch has them.

pub mod splitter;
pub mod types;
