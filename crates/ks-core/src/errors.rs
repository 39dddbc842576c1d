//! Cross-cutting error types for Keystone.
//!
//! Crate-specific errors (`LogError`, `PipelineError`, ...) live in their own
//! crates and wrap `CoreError` where a core lookup or validation fails.

use thiserror::Error;

/// Errors that can be raised by any Keystone crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A window code that is not in the static window table.
    #[error("Unknown spectral window code '{code}'")]
    UnknownWindow { code: String },

    /// A receiver index outside its fixed range.
    #[error("{kind} index {value} out of range (0..={max})")]
    OutOfRange {
        kind: &'static str,
        value: u32,
        max: u32,
    },

    /// Data failed validation (format, arity, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}
