//! Reduction Invoker: runs the calibration tool for pending cells and files
//! its output under the canonical, session-tagged name.
//!
//! Per cell:
//!
//! ```text
//! satisfied on disk ──────────────────────────────▶ skip
//! pending ─▶ for bank A..H: invoke ─▶ file .index/.fits ─▶ (filed | not produced)
//!                 └─ stop early once the cell is satisfied (unless overwrite)
//! ```
//!
//! Tool exit codes are not inspected and missing outputs are expected (not
//! every bank carries every window). Re-running is the retry mechanism.

use std::fs;
use std::path::{Path, PathBuf};

use ks_config::PipelineConfig;
use ks_core::naming::raw_bank_file;
use ks_core::{ArtifactKind, Bank, WorkUnit};

use crate::report::{BankAttempt, CellReport, CellStatus, FilingOutcome};
use crate::resolver;
use crate::runner::{Invocation, ToolRunner, run_logged};

/// Build the calibration-tool call for one cell and bank.
#[must_use]
pub fn build_invocation(
    config: &PipelineConfig,
    unit: &WorkUnit,
    bank: Bank,
    working_dir: &Path,
) -> Invocation {
    let input = raw_bank_file(&unit.raw_data_dir, &config.project_code, unit.session, bank);
    Invocation::new(&config.tool, working_dir)
        .flag("-i", input.to_string_lossy())
        .flag("--window", unit.window.code())
        .arg("--imaging-off")
        .arg("--clobber")
        .flag("-v", config.verbosity.to_string())
        .flag("-m", unit.scans.to_string())
        .flag("--units", &config.units)
        .flag("--smoothing-kernel-size", config.smoothing_kernel_size.to_string())
        .arg("--keep-temporary-files")
        .flag("--beam-scaling", unit.gains.to_string())
        .flag("--feed", unit.feed.to_string())
        .flag("--pol", unit.pol.to_string())
}

/// Move the tool's default-named artifact into the output directory.
pub fn file_artifact(unit: &WorkUnit, kind: ArtifactKind, working_dir: &Path) -> FilingOutcome {
    let from = working_dir.join(unit.tool_output_name(kind));
    let to = unit.canonical_path(kind);
    if !from.exists() {
        tracing::debug!(file = %from.display(), "no output produced");
        return FilingOutcome::NotProduced;
    }
    match fs::rename(&from, &to) {
        Ok(()) => {
            tracing::debug!(from = %from.display(), to = %to.display(), "filed artifact");
            FilingOutcome::Filed { path: to }
        }
        Err(error) => {
            tracing::debug!(from = %from.display(), %error, "rename failed; ignoring");
            FilingOutcome::Failed {
                reason: error.to_string(),
            }
        }
    }
}

/// Outcome of the final permission fixup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionOutcome {
    Applied,
    Unsupported,
    Failed(String),
}

/// Best-effort `chmod` of a filed artifact.
pub fn apply_mode(path: &Path, mode: u32) -> PermissionOutcome {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        match fs::set_permissions(path, fs::Permissions::from_mode(mode)) {
            Ok(()) => PermissionOutcome::Applied,
            Err(error) => {
                tracing::debug!(path = %path.display(), %error, "chmod failed; ignoring");
                PermissionOutcome::Failed(error.to_string())
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = (path, mode);
        PermissionOutcome::Unsupported
    }
}

/// Drives the calibration tool for the cells of one output root.
pub struct Reducer<'a, R: ToolRunner + ?Sized> {
    config: &'a PipelineConfig,
    runner: &'a mut R,
    working_dir: PathBuf,
    overwrite: bool,
}

impl<'a, R: ToolRunner + ?Sized> Reducer<'a, R> {
    /// `working_dir` is where the tool runs and leaves its default-named
    /// output.
    pub fn new(
        config: &'a PipelineConfig,
        runner: &'a mut R,
        working_dir: impl Into<PathBuf>,
        overwrite: bool,
    ) -> Self {
        Self {
            config,
            runner,
            working_dir: working_dir.into(),
            overwrite,
        }
    }

    /// Reduce one cell. Never fails: every per-bank problem is best effort.
    ///
    /// The output directory must already exist (see
    /// [`resolver::ensure_output_directory`]).
    pub fn reduce_cell(&mut self, unit: &WorkUnit) -> CellReport {
        let status = resolver::check(unit, self.overwrite);
        let mut report = CellReport {
            window: unit.window,
            feed: unit.feed,
            pol: unit.pol,
            status,
            attempts: Vec::new(),
        };

        if status == CellStatus::Satisfied {
            tracing::info!(
                feed = %unit.feed,
                pol = %unit.pol,
                window = %unit.window,
                "data for polarization {} of feed {} appear on disk... skipping",
                unit.pol,
                unit.feed
            );
            return report;
        }

        for bank in Bank::ALL {
            // An earlier bank already produced this cell.
            if !self.overwrite && !report.attempts.is_empty() && resolver::is_satisfied(unit) {
                break;
            }
            report.attempts.push(self.attempt(unit, bank));
        }
        report
    }

    fn attempt(&mut self, unit: &WorkUnit, bank: Bank) -> BankAttempt {
        let invocation = build_invocation(self.config, unit, bank, &self.working_dir);
        let (launched, exit_code) = run_logged(&mut *self.runner, &invocation);

        let filed = ArtifactKind::ALL
            .into_iter()
            .map(|kind| {
                let outcome = file_artifact(unit, kind, &self.working_dir);
                if let FilingOutcome::Filed { path } = &outcome {
                    let _ = apply_mode(path, self.config.output_mode);
                }
                (kind, outcome)
            })
            .collect();

        BankAttempt {
            bank,
            launched,
            exit_code,
            filed,
        }
    }
}

#[cfg(test)]
mod tests {
    use ks_core::{Feed, Gains, Polarization, ScanRange, SpectralWindow};
    use pretty_assertions::assert_eq;

    use super::*;

    fn unit(gains: Gains) -> WorkUnit {
        WorkUnit {
            region: "NGC1333".into(),
            session: 5,
            scans: ScanRange::new(11, 58),
            source: "Perseus_map_NGC1333-A".into(),
            window: SpectralWindow::from_code("3").unwrap(),
            feed: Feed::new(2).unwrap(),
            pol: Polarization::new(1).unwrap(),
            gains,
            raw_data_dir: PathBuf::from("/lustre/pipeline/scratch/KEYSTONE/rawdata/"),
            output_root: PathBuf::from("/work/NGC1333"),
        }
    }

    #[test]
    fn invocation_matches_tool_contract() {
        let config = PipelineConfig::default();
        let inv = build_invocation(&config, &unit(Gains::unity()), Bank::A, Path::new("/work"));
        assert_eq!(
            inv.to_string(),
            "gbtpipeline \
             -i /lustre/pipeline/scratch/KEYSTONE/rawdata/AGBT16B_278_05.raw.vegas/AGBT16B_278_05.raw.vegas.A.fits \
             --window 3 --imaging-off --clobber -v 4 -m 11:58 --units tmb \
             --smoothing-kernel-size 0 --keep-temporary-files \
             --beam-scaling 1,1,1,1,1,1,1,1,1,1,1,1,1,1 --feed 2 --pol 1"
        );
        assert_eq!(inv.working_dir, PathBuf::from("/work"));
    }

    #[test]
    fn invocation_carries_configured_settings() {
        let config = PipelineConfig {
            tool: "/opt/gbtpipeline".into(),
            units: "ta".into(),
            smoothing_kernel_size: 2,
            verbosity: 1,
            ..PipelineConfig::default()
        };
        let gains: Gains = "0.90,1.0,1,1,1,1,1,1,1,1,1,1,1,1".parse().unwrap();
        let inv = build_invocation(&config, &unit(gains), Bank::H, Path::new("/w"));
        assert_eq!(inv.program, "/opt/gbtpipeline");
        assert_eq!(inv.flag_value("--units"), Some("ta"));
        assert_eq!(inv.flag_value("--smoothing-kernel-size"), Some("2"));
        assert_eq!(inv.flag_value("-v"), Some("1"));
        assert_eq!(
            inv.flag_value("--beam-scaling"),
            Some("0.90,1.0,1,1,1,1,1,1,1,1,1,1,1,1")
        );
        assert!(inv.flag_value("-i").unwrap().ends_with(".raw.vegas.H.fits"));
    }

    #[test]
    fn missing_tool_output_is_not_produced() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut u = unit(Gains::unity());
        u.output_root = tmp.path().to_path_buf();
        let outcome = file_artifact(&u, ArtifactKind::Fits, tmp.path());
        assert_eq!(outcome, FilingOutcome::NotProduced);
    }

    #[test]
    fn rename_into_missing_directory_is_ignored_failure() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut u = unit(Gains::unity());
        u.output_root = tmp.path().join("absent");
        fs::write(tmp.path().join(u.tool_output_name(ArtifactKind::Fits)), b"x").unwrap();
        let outcome = file_artifact(&u, ArtifactKind::Fits, tmp.path());
        assert!(matches!(outcome, FilingOutcome::Failed { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn apply_mode_sets_bits() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("f.fits");
        fs::write(&path, b"").unwrap();
        assert_eq!(apply_mode(&path, 0o774), PermissionOutcome::Applied);
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o7777;
        assert_eq!(mode, 0o774);
        assert!(matches!(
            apply_mode(&tmp.path().join("missing"), 0o774),
            PermissionOutcome::Failed(_)
        ));
    }
}
