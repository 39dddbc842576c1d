//! Serializable outcomes of reduction, planning, archival and rescue runs.

use std::path::PathBuf;

use ks_core::{ArtifactKind, Bank, Feed, Polarization, ScanRange, SpectralWindow};
use serde::Serialize;

/// Completion state of one (feed, polarization) cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellStatus {
    /// The canonical artifact is already on disk.
    Satisfied,
    Pending,
}

/// Result of relocating one tool artifact. Never an error: an artifact the
/// tool did not produce (bank without this window, feed or polarization) is
/// the common case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FilingOutcome {
    Filed { path: PathBuf },
    NotProduced,
    Failed { reason: String },
}

impl FilingOutcome {
    #[must_use]
    pub const fn is_filed(&self) -> bool {
        matches!(self, Self::Filed { .. })
    }
}

/// One calibration-tool run for one bank.
#[derive(Debug, Clone, Serialize)]
pub struct BankAttempt {
    pub bank: Bank,
    pub launched: bool,
    pub exit_code: Option<i32>,
    pub filed: Vec<(ArtifactKind, FilingOutcome)>,
}

impl BankAttempt {
    #[must_use]
    pub fn filed_count(&self) -> usize {
        self.filed.iter().filter(|(_, o)| o.is_filed()).count()
    }
}

/// What happened to one cell during a run.
#[derive(Debug, Clone, Serialize)]
pub struct CellReport {
    pub window: SpectralWindow,
    pub feed: Feed,
    pub pol: Polarization,
    pub status: CellStatus,
    pub attempts: Vec<BankAttempt>,
}

impl CellReport {
    #[must_use]
    pub fn invocations(&self) -> usize {
        self.attempts.len()
    }

    #[must_use]
    pub fn artifacts_filed(&self) -> usize {
        self.attempts.iter().map(BankAttempt::filed_count).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionStatus {
    Completed,
    /// Stopped by a region-fatal error; the batch moved on.
    Aborted,
}

/// Aggregated counts for one region.
#[derive(Debug, Clone, Serialize)]
pub struct RegionReport {
    pub region: String,
    pub status: RegionStatus,
    pub error: Option<String>,
    pub tasks: usize,
    pub cells_satisfied: usize,
    pub cells_reduced: usize,
    pub invocations: usize,
    pub artifacts_filed: usize,
}

impl RegionReport {
    #[must_use]
    pub fn new(region: &str) -> Self {
        Self {
            region: region.to_string(),
            status: RegionStatus::Completed,
            error: None,
            tasks: 0,
            cells_satisfied: 0,
            cells_reduced: 0,
            invocations: 0,
            artifacts_filed: 0,
        }
    }

    pub fn record(&mut self, cell: &CellReport) {
        match cell.status {
            CellStatus::Satisfied => self.cells_satisfied += 1,
            CellStatus::Pending => self.cells_reduced += 1,
        }
        self.invocations += cell.invocations();
        self.artifacts_filed += cell.artifacts_filed();
    }

    pub fn abort(&mut self, error: &dyn std::error::Error) {
        self.status = RegionStatus::Aborted;
        self.error = Some(error.to_string());
    }
}

/// A batch run over one or more regions.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub regions: Vec<RegionReport>,
}

impl RunReport {
    #[must_use]
    pub fn invocations(&self) -> usize {
        self.regions.iter().map(|r| r.invocations).sum()
    }

    #[must_use]
    pub fn aborted(&self) -> impl Iterator<Item = &RegionReport> {
        self.regions
            .iter()
            .filter(|r| r.status == RegionStatus::Aborted)
    }
}

/// One cell as classified by a dry run.
#[derive(Debug, Clone, Serialize)]
pub struct PlannedCell {
    pub session: u32,
    pub source: String,
    pub scans: ScanRange,
    pub window: SpectralWindow,
    pub feed: Feed,
    pub pol: Polarization,
    pub status: CellStatus,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanReport {
    pub region: String,
    pub cells: Vec<PlannedCell>,
}

impl PlanReport {
    #[must_use]
    pub fn count(&self, status: CellStatus) -> usize {
        self.cells.iter().filter(|c| c.status == status).count()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ArchiveReport {
    pub raw_data_root: PathBuf,
    /// Set when the raw-data root was unreachable and nothing was attempted.
    pub environment_error: Option<String>,
    pub converted: Vec<u32>,
    pub already_present: Vec<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MovedFile {
    pub from: PathBuf,
    pub to: PathBuf,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RescueReport {
    pub moved: Vec<MovedFile>,
    pub failed: Vec<String>,
}
