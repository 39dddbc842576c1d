//! Task expansion: log rows × windows × feeds × polarizations.

use std::path::{Path, PathBuf};

use ks_core::{Feed, ObservationRow, Polarization, SpectralWindow, WorkUnit};
use serde::Serialize;

use crate::dates::DateWindow;
use crate::error::LogError;
use crate::log::ObservationLog;

/// Which log rows a reduction pass covers.
#[derive(Debug, Clone, Serialize)]
pub struct Selection {
    pub region: String,
    pub dates: DateWindow,
    /// Release-flag column that must read `TRUE`.
    pub release: String,
}

/// One qualifying log row paired with one spectral window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpandedTask {
    pub row: ObservationRow,
    pub window: SpectralWindow,
}

impl ExpandedTask {
    /// The row's `Special RawDir` override, else `default_root`.
    #[must_use]
    pub fn raw_data_dir(&self, default_root: &Path) -> PathBuf {
        self.row
            .raw_dir
            .clone()
            .unwrap_or_else(|| default_root.to_path_buf())
    }

    /// The 7 × 2 feed/polarization cells of this task, feed-major.
    #[must_use]
    pub fn work_units(&self, default_raw_root: &Path, output_root: &Path) -> Vec<WorkUnit> {
        let raw_data_dir = self.raw_data_dir(default_raw_root);
        Feed::all()
            .flat_map(|feed| Polarization::all().map(move |pol| (feed, pol)))
            .map(|(feed, pol)| WorkUnit {
                region: self.row.region.clone(),
                session: self.row.session,
                scans: self.row.scans,
                source: self.row.source.clone(),
                window: self.window,
                feed,
                pol,
                gains: self.row.gains.clone(),
                raw_data_dir: raw_data_dir.clone(),
                output_root: output_root.to_path_buf(),
            })
            .collect()
    }
}

/// Rows matching region, date window and release membership, in log order.
///
/// An unknown release column is an error; zero matching rows is not.
pub fn select_rows<'a>(
    log: &'a ObservationLog,
    selection: &Selection,
) -> Result<Vec<&'a ObservationRow>, LogError> {
    if !log.has_release_column(&selection.release) {
        return Err(LogError::UnknownReleaseColumn(selection.release.clone()));
    }

    Ok(log
        .rows()
        .iter()
        .filter(|row| {
            tracing::trace!(date = %row.date, session = row.session, "considering log row");
            row.region == selection.region
                && selection.dates.contains(row.date)
                && row.release(&selection.release).is_included()
        })
        .collect())
}

/// Cross the selected rows with the requested windows, row-major.
pub fn expand(
    log: &ObservationLog,
    selection: &Selection,
    windows: &[SpectralWindow],
) -> Result<Vec<ExpandedTask>, LogError> {
    let rows = select_rows(log, selection)?;
    tracing::debug!(
        region = %selection.region,
        dates = %selection.dates,
        release = %selection.release,
        rows = rows.len(),
        "selected log rows"
    );

    Ok(rows
        .into_iter()
        .flat_map(|row| {
            windows.iter().map(move |&window| ExpandedTask {
                row: row.clone(),
                window,
            })
        })
        .collect())
}
