use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::enums::ReleaseFlag;
use crate::gains::Gains;

/// Inclusive scan-number interval of one mapping block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScanRange {
    pub start: u32,
    pub end: u32,
}

impl ScanRange {
    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }
}

/// `start:end`, the form the calibration tool's `-m` flag expects.
impl fmt::Display for ScanRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

/// One parsed observation log entry. Identity is (region, session, scans).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationRow {
    pub region: String,
    pub session: u32,
    pub scans: ScanRange,
    pub source: String,
    pub date: NaiveDateTime,
    pub gains: Gains,
    /// `Special RawDir` override; `None` means the configured raw-data root.
    pub raw_dir: Option<PathBuf>,
    /// Release-flag columns keyed by column name.
    pub releases: BTreeMap<String, ReleaseFlag>,
}

impl ObservationRow {
    /// Membership in the named release; an absent column reads as missing.
    #[must_use]
    pub fn release(&self, column: &str) -> ReleaseFlag {
        self.releases
            .get(column)
            .copied()
            .unwrap_or(ReleaseFlag::Missing)
    }
}
