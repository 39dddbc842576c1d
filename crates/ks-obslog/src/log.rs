//! Observation log loading.
//!
//! The log is a CSV export with at least the columns `Date`, `Region name`,
//! `Session`, `Start Scan`, `End Scan` and `Source`. `Beam Gains` and
//! `Special RawDir` are optional; `--` or an empty cell means "use the
//! default". Every other column is treated as a release-flag column.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use ks_core::{Gains, ObservationRow, ReleaseFlag, ScanRange};

use crate::dates::parse_log_date;
use crate::error::LogError;

pub const DATE: &str = "Date";
pub const REGION: &str = "Region name";
pub const SESSION: &str = "Session";
pub const START_SCAN: &str = "Start Scan";
pub const END_SCAN: &str = "End Scan";
pub const SOURCE: &str = "Source";
pub const BEAM_GAINS: &str = "Beam Gains";
pub const SPECIAL_RAWDIR: &str = "Special RawDir";

const MISSING: &str = "--";

/// Parsed observation log, rows in file order.
#[derive(Debug, Clone, Default)]
pub struct ObservationLog {
    rows: Vec<ObservationRow>,
    release_columns: Vec<String>,
}

struct Columns {
    date: usize,
    region: usize,
    session: usize,
    start_scan: usize,
    end_scan: usize,
    source: usize,
    gains: Option<usize>,
    raw_dir: Option<usize>,
    releases: Vec<(usize, String)>,
}

impl Columns {
    fn from_header(header: &StringRecord) -> Result<Self, LogError> {
        let find = |name: &str| header.iter().position(|h| h.trim() == name);
        let require =
            |name: &str| find(name).ok_or_else(|| LogError::MissingColumn(name.to_string()));

        let core = [
            DATE,
            REGION,
            SESSION,
            START_SCAN,
            END_SCAN,
            SOURCE,
            BEAM_GAINS,
            SPECIAL_RAWDIR,
        ];
        let releases = header
            .iter()
            .enumerate()
            .filter(|(_, name)| !name.trim().is_empty() && !core.contains(&name.trim()))
            .map(|(i, name)| (i, name.trim().to_string()))
            .collect();

        Ok(Self {
            date: require(DATE)?,
            region: require(REGION)?,
            session: require(SESSION)?,
            start_scan: require(START_SCAN)?,
            end_scan: require(END_SCAN)?,
            source: require(SOURCE)?,
            gains: find(BEAM_GAINS),
            raw_dir: find(SPECIAL_RAWDIR),
            releases,
        })
    }
}

fn cell(record: &StringRecord, index: usize) -> &str {
    record.get(index).map_or("", str::trim)
}

fn parse_number(record: &StringRecord, index: usize, column: &str) -> Result<u32, LogError> {
    let raw = cell(record, index);
    raw.parse::<u32>().map_err(|e| {
        LogError::Core(ks_core::CoreError::Validation(format!(
            "column '{column}': '{raw}' is not a non-negative integer ({e})"
        )))
    })
}

fn parse_row(record: &StringRecord, columns: &Columns) -> Result<ObservationRow, LogError> {
    let gains = match columns.gains {
        Some(i) => Gains::from_log_cell(cell(record, i))?,
        None => Gains::unity(),
    };
    let raw_dir = columns
        .raw_dir
        .map(|i| cell(record, i))
        .filter(|v| !v.is_empty() && *v != MISSING)
        .map(PathBuf::from);
    let releases = columns
        .releases
        .iter()
        .map(|(i, name)| (name.clone(), ReleaseFlag::from_log_cell(cell(record, *i))))
        .collect::<BTreeMap<_, _>>();

    Ok(ObservationRow {
        region: cell(record, columns.region).to_string(),
        session: parse_number(record, columns.session, SESSION)?,
        scans: ScanRange::new(
            parse_number(record, columns.start_scan, START_SCAN)?,
            parse_number(record, columns.end_scan, END_SCAN)?,
        ),
        source: cell(record, columns.source).to_string(),
        date: parse_log_date(cell(record, columns.date))?,
        gains,
        raw_dir,
        releases,
    })
}

impl ObservationLog {
    #[must_use]
    pub fn new(rows: Vec<ObservationRow>, release_columns: Vec<String>) -> Self {
        Self {
            rows,
            release_columns,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, LogError> {
        let file = File::open(path).map_err(|source| LogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    /// Parse a CSV log. Blank lines are skipped; rows that fail to parse are
    /// logged and skipped so one bad entry does not block the sweep.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LogError> {
        let mut csv = ReaderBuilder::new().flexible(true).from_reader(reader);
        let columns = Columns::from_header(csv.headers()?)?;

        let mut rows = Vec::new();
        for (index, record) in csv.records().enumerate() {
            let record = record?;
            if record.iter().all(|v| v.trim().is_empty()) {
                continue;
            }
            match parse_row(&record, &columns) {
                Ok(row) => rows.push(row),
                Err(error) => {
                    // +2: one-based, plus the header line
                    tracing::warn!(line = index + 2, %error, "skipping unparseable log row");
                }
            }
        }

        let release_columns = columns.releases.into_iter().map(|(_, name)| name).collect();
        Ok(Self {
            rows,
            release_columns,
        })
    }

    #[must_use]
    pub fn rows(&self) -> &[ObservationRow] {
        &self.rows
    }

    #[must_use]
    pub fn release_columns(&self) -> &[String] {
        &self.release_columns
    }

    #[must_use]
    pub fn has_release_column(&self, column: &str) -> bool {
        self.release_columns.iter().any(|c| c == column)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct session numbers, ascending.
    #[must_use]
    pub fn sessions(&self) -> BTreeSet<u32> {
        self.rows.iter().map(|row| row.session).collect()
    }

    /// The rows belonging to one session, same release columns.
    #[must_use]
    pub fn for_session(&self, session: u32) -> Self {
        Self {
            rows: self
                .rows
                .iter()
                .filter(|row| row.session == session)
                .cloned()
                .collect(),
            release_columns: self.release_columns.clone(),
        }
    }

    /// Distinct region names in order of first appearance.
    #[must_use]
    pub fn regions(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        self.rows
            .iter()
            .filter(|row| seen.insert(row.region.as_str()))
            .map(|row| row.region.clone())
            .collect()
    }
}
