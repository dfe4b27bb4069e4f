//! Evaluation-metric density chart preparation for the modelfx system.
//!
//! Takes up to two tabular datasets ("results" and "baseline"), validates
//! the rendering parameters, and reshapes the data into a serializable
//! chart description with one labeled density layer per dataset. Actual
//! rendering is a downstream concern.

pub mod density;
pub mod frame;
