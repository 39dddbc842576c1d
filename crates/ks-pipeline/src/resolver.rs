//! Completion checking and output path resolution.

use std::fs;
use std::io;
use std::path::Path;

use ks_core::{ArtifactKind, WorkUnit};

use crate::error::PipelineError;
use crate::report::CellStatus;

/// Whether the current user may write into `path`.
///
/// Asks the kernel rather than reading mode bits, so ownership and the
/// superuser are accounted for.
#[cfg(unix)]
pub(crate) fn is_writable(path: &Path) -> bool {
    nix::unistd::access(path, nix::unistd::AccessFlags::W_OK).is_ok()
}

#[cfg(not(unix))]
pub(crate) fn is_writable(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|meta| !meta.permissions().readonly())
}

/// Make sure `dir` exists and is writable, creating it when absent.
///
/// A directory that exists but is not writable is an error, as is one that
/// cannot be created. Either aborts the current region.
pub fn ensure_output_directory(dir: &Path) -> Result<(), PipelineError> {
    let fail = |source: io::Error| {
        tracing::warn!(path = %dir.display(), %source, "unable to make output directory");
        PipelineError::OutputDirectory {
            path: dir.to_path_buf(),
            source,
        }
    };

    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() && is_writable(dir) => Ok(()),
        Ok(meta) if meta.is_dir() => Err(fail(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "directory is not writable",
        ))),
        Ok(_) => Err(fail(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "path exists and is not a directory",
        ))),
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(dir).map_err(fail)?;
            tracing::info!(path = %dir.display(), "made directory");
            Ok(())
        }
        Err(error) => Err(fail(error)),
    }
}

/// Whether the cell's canonical data file is already on disk.
#[must_use]
pub fn is_satisfied(unit: &WorkUnit) -> bool {
    unit.canonical_path(ArtifactKind::Fits).exists()
}

/// Classify a cell. With `overwrite` every cell is pending.
#[must_use]
pub fn check(unit: &WorkUnit, overwrite: bool) -> CellStatus {
    if !overwrite && is_satisfied(unit) {
        CellStatus::Satisfied
    } else {
        CellStatus::Pending
    }
}
