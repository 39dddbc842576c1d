//! Region-level drivers: one region, every region, or every region of one
//! session.
//!
//! Each region gets `<work_root>/<region>/` as both the calibration tool's
//! working directory and the output root, so products land in
//! `<work_root>/<region>/<region>_<line>/`.

use std::path::{Path, PathBuf};

use ks_config::KeystoneConfig;
use ks_core::{ArtifactKind, SpectralWindow};
use ks_obslog::{DateWindow, ObservationLog, RegionCatalog, Selection, expand};

use crate::error::PipelineError;
use crate::invoker::Reducer;
use crate::report::{PlanReport, PlannedCell, RegionReport, RunReport};
use crate::resolver;
use crate::runner::ToolRunner;

/// Resolve window codes; an empty list means every known window.
///
/// Fails on the first unknown code, before any work is done.
pub fn resolve_windows<S: AsRef<str>>(codes: &[S]) -> Result<Vec<SpectralWindow>, PipelineError> {
    if codes.is_empty() {
        return Ok(SpectralWindow::all().to_vec());
    }
    Ok(SpectralWindow::parse_list(codes)?)
}

pub struct Pipeline<'a, R: ToolRunner + ?Sized> {
    config: &'a KeystoneConfig,
    runner: &'a mut R,
    overwrite: bool,
}

impl<'a, R: ToolRunner + ?Sized> Pipeline<'a, R> {
    pub fn new(config: &'a KeystoneConfig, runner: &'a mut R, overwrite: bool) -> Self {
        Self {
            config,
            runner,
            overwrite,
        }
    }

    /// `<work_root>/<region>`.
    #[must_use]
    pub fn region_root(&self, region: &str) -> PathBuf {
        self.config.paths.work_root.join(region)
    }

    /// The configured default date window.
    #[must_use]
    pub fn default_dates(&self) -> DateWindow {
        DateWindow::from_dates(
            self.config.selection.start_date,
            self.config.selection.end_date,
        )
    }

    /// Reduce every selected row × window × feed × polarization of one
    /// region, with `region_root` as working directory and output root.
    pub fn reduce_region(
        &mut self,
        log: &ObservationLog,
        selection: &Selection,
        windows: &[SpectralWindow],
        region_root: &Path,
    ) -> Result<RegionReport, PipelineError> {
        let tasks = expand(log, selection, windows)?;
        let mut report = RegionReport::new(&selection.region);
        report.tasks = tasks.len();

        let mut reducer = Reducer::new(
            &self.config.pipeline,
            &mut *self.runner,
            region_root,
            self.overwrite,
        );

        for task in &tasks {
            tracing::info!(
                region = %selection.region,
                session = task.row.session,
                window = %task.window,
                "reducing {}",
                ks_core::naming::session_name(&self.config.pipeline.project_code, task.row.session)
            );

            let units = task.work_units(&self.config.paths.raw_data_root, region_root);
            if let Some(first) = units.first() {
                resolver::ensure_output_directory(&first.output_directory())?;
            }
            for unit in &units {
                let cell = reducer.reduce_cell(unit);
                report.record(&cell);
            }
        }
        Ok(report)
    }

    /// Every catalog region except `none`, over the configured date window.
    ///
    /// A region whose output directory cannot be prepared is logged and
    /// skipped; any other error aborts the run.
    pub fn reduce_all(
        &mut self,
        log: &ObservationLog,
        catalog: &RegionCatalog,
        release: &str,
        windows: &[SpectralWindow],
    ) -> Result<RunReport, PipelineError> {
        let dates = self.default_dates();
        let mut run = RunReport::default();

        for region in catalog.batch_regions() {
            let selection = Selection {
                region: region.to_string(),
                dates,
                release: release.to_string(),
            };
            let report = self.reduce_region_guarded(log, &selection, windows)?;
            run.regions.push(report);
        }
        Ok(run)
    }

    /// Every catalog region observed in `session`, each over the date of its
    /// first row in that session.
    pub fn reduce_session(
        &mut self,
        log: &ObservationLog,
        catalog: &RegionCatalog,
        session: u32,
        release: &str,
        windows: &[SpectralWindow],
    ) -> Result<RunReport, PipelineError> {
        let session_log = log.for_session(session);
        if session_log.is_empty() {
            tracing::warn!(session, "no log rows for session");
        }
        let mut run = RunReport::default();

        for region in catalog.batch_regions() {
            let Some(first) = session_log.rows().iter().find(|row| row.region == region) else {
                prepare_region_root(&self.region_root(region));
                continue;
            };
            let selection = Selection {
                region: region.to_string(),
                dates: DateWindow::at(first.date),
                release: release.to_string(),
            };
            let report = self.reduce_region_guarded(&session_log, &selection, windows)?;
            run.regions.push(report);
        }
        Ok(run)
    }

    fn reduce_region_guarded(
        &mut self,
        log: &ObservationLog,
        selection: &Selection,
        windows: &[SpectralWindow],
    ) -> Result<RegionReport, PipelineError> {
        let region_root = self.region_root(&selection.region);
        let result = resolver::ensure_output_directory(&region_root)
            .and_then(|()| self.reduce_region(log, selection, windows, &region_root));

        match result {
            Ok(report) => Ok(report),
            Err(error) if error.is_region_fatal() => {
                tracing::warn!(region = %selection.region, %error, "skipping region");
                let mut report = RegionReport::new(&selection.region);
                report.abort(&error);
                Ok(report)
            }
            Err(error) => Err(error),
        }
    }

    /// Classify every cell of a region without invoking anything or touching
    /// the filesystem.
    pub fn plan_region(
        &self,
        log: &ObservationLog,
        selection: &Selection,
        windows: &[SpectralWindow],
    ) -> Result<PlanReport, PipelineError> {
        let region_root = self.region_root(&selection.region);
        let tasks = expand(log, selection, windows)?;

        let cells = tasks
            .iter()
            .flat_map(|task| task.work_units(&self.config.paths.raw_data_root, &region_root))
            .map(|unit| PlannedCell {
                status: resolver::check(&unit, self.overwrite),
                path: unit.canonical_path(ArtifactKind::Fits),
                session: unit.session,
                source: unit.source,
                scans: unit.scans,
                window: unit.window,
                feed: unit.feed,
                pol: unit.pol,
            })
            .collect();

        Ok(PlanReport {
            region: selection.region.clone(),
            cells,
        })
    }
}

/// Region directories are created for every catalog region, even ones
/// without rows to reduce.
fn prepare_region_root(path: &Path) {
    if let Err(error) = resolver::ensure_output_directory(path) {
        tracing::debug!(%error, "region directory not prepared");
    }
}
