//! Region catalog: the list of valid region names, in processing order.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;

use crate::error::LogError;
use crate::log::{ObservationLog, REGION};

/// Placeholder region that is never reduced in batch mode.
pub const NO_REGION: &str = "none";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionCatalog {
    regions: Vec<String>,
}

impl RegionCatalog {
    #[must_use]
    pub fn new(regions: Vec<String>) -> Self {
        Self { regions }
    }

    pub fn from_path(path: &Path) -> Result<Self, LogError> {
        let file = File::open(path).map_err(|source| LogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    /// Read the `Region name` column of a catalog CSV. Duplicates keep their
    /// first position.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LogError> {
        let mut csv = ReaderBuilder::new().flexible(true).from_reader(reader);
        let column = csv
            .headers()?
            .iter()
            .position(|h| h.trim() == REGION)
            .ok_or_else(|| LogError::MissingColumn(REGION.to_string()))?;

        let mut seen = BTreeSet::new();
        let mut regions = Vec::new();
        for record in csv.records() {
            let record = record?;
            let name = record.get(column).map_or("", str::trim);
            if !name.is_empty() && seen.insert(name.to_string()) {
                regions.push(name.to_string());
            }
        }
        Ok(Self { regions })
    }

    /// Catalog derived from the regions present in the log.
    #[must_use]
    pub fn from_log(log: &ObservationLog) -> Self {
        Self::new(log.regions())
    }

    #[must_use]
    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    /// Regions eligible for batch reduction (everything except `none`).
    pub fn batch_regions(&self) -> impl Iterator<Item = &str> {
        self.regions
            .iter()
            .map(String::as_str)
            .filter(|region| *region != NO_REGION)
    }
}
