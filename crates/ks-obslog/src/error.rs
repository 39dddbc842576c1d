use std::path::PathBuf;

use ks_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("required column '{0}' not found in header")]
    MissingColumn(String),
    #[error("release column '{0}' not found in observation log")]
    UnknownReleaseColumn(String),
    #[error("invalid date '{0}' (expected YYYY-MM-DD with optional time)")]
    InvalidDate(String),
    #[error(transparent)]
    Core(#[from] CoreError),
}
