//! Raw-data archival: convert every observed session into per-bank FITS
//! under the raw-data root, then hand the result to the shared group.

use std::fs;
use std::path::Path;

use ks_config::KeystoneConfig;
use ks_core::naming::{raw_session_dir, session_name};
use ks_obslog::ObservationLog;

use crate::error::PipelineError;
use crate::report::ArchiveReport;
use crate::resolver::is_writable;
use crate::runner::{Invocation, ToolRunner, run_logged};

fn is_writable_dir(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|meta| meta.is_dir()) && is_writable(path)
}

/// Convert each session in `log` whose archive directory is missing (or all
/// of them with `overwrite`).
///
/// An unreachable raw-data root is reported in the returned report and
/// nothing is attempted.
pub fn fill_all<R: ToolRunner + ?Sized>(
    config: &KeystoneConfig,
    log: &ObservationLog,
    runner: &mut R,
    overwrite: bool,
) -> Result<ArchiveReport, PipelineError> {
    let raw_root = &config.paths.raw_data_root;
    let mut report = ArchiveReport {
        raw_data_root: raw_root.clone(),
        ..ArchiveReport::default()
    };

    if let Err(source) = fs::read_dir(raw_root) {
        let error = PipelineError::Environment {
            path: raw_root.clone(),
            source,
        };
        tracing::warn!(%error, "cannot reach raw data; are you on the right machine?");
        report.environment_error = Some(error.to_string());
        return Ok(report);
    }

    for session in log.sessions() {
        let name = session_name(&config.pipeline.project_code, session);
        let target = raw_session_dir(raw_root, &config.pipeline.project_code, session);

        if overwrite {
            if target.exists() {
                if let Err(error) = fs::remove_dir_all(&target) {
                    tracing::debug!(path = %target.display(), %error, "could not remove old archive");
                }
            }
        } else if is_writable_dir(&target) {
            tracing::info!(session = %name, "raw data already present... skipping");
            report.already_present.push(session);
            continue;
        }

        convert_session(config, runner, raw_root, &name, &target);
        report.converted.push(session);
    }
    Ok(report)
}

fn convert_session<R: ToolRunner + ?Sized>(
    config: &KeystoneConfig,
    runner: &mut R,
    raw_root: &Path,
    name: &str,
    target: &Path,
) {
    let target = target.to_string_lossy();
    let steps = [
        Invocation::new(&config.archive.tool, raw_root)
            .arg(format!("-backends={}", config.archive.backends))
            .arg(name),
        Invocation::new("chgrp", raw_root)
            .arg(&config.archive.group)
            .arg("-R")
            .arg(target.clone()),
        Invocation::new("chmod", raw_root)
            .arg("g+rw")
            .arg("-R")
            .arg(target.clone()),
    ];
    for invocation in &steps {
        run_logged(&mut *runner, invocation);
    }
}
