//! Command handlers for the `mfx` CLI.

pub mod density;
pub mod effects;
