use std::path::PathBuf;

use ks_core::CoreError;
use ks_obslog::LogError;
use thiserror::Error;

/// Failures that stop work.
///
/// Best-effort steps (artifact renames, permission fixes, tool exit codes)
/// never produce a `PipelineError`; see [`crate::report::FilingOutcome`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Lookup or validation failure in core types (e.g. an unknown window
    /// code). Aborts the whole run.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Log(#[from] LogError),

    /// Output directory missing and uncreatable, or present but not
    /// writable. Aborts the current region only.
    #[error("unable to make output directory {path}: {source}")]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The raw-data root is not reachable from this machine.
    #[error("raw data root {path} is not accessible: {source}")]
    Environment {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid file pattern: {0}")]
    Pattern(#[from] globset::Error),
}

impl PipelineError {
    /// Whether a batch driver may log this and continue with the next region.
    #[must_use]
    pub const fn is_region_fatal(&self) -> bool {
        matches!(self, Self::OutputDirectory { .. })
    }
}
