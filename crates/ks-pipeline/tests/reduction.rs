mod common;

use std::fs;

use common::{FakeTool, config, log, selection};
use ks_core::SpectralWindow;
use ks_obslog::RegionCatalog;
use ks_pipeline::{CellStatus, Pipeline, PipelineError, RegionStatus, resolve_windows};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const FITS_F0_P0: &str = "Perseus_map_NGC1333-A_scan_11_58_window3_feed0_pol0_sess5.fits";

fn window(code: &str) -> Vec<SpectralWindow> {
    resolve_windows(&[code]).unwrap()
}

#[test]
fn single_window_lands_in_line_directory_with_session_tag() {
    let tmp = TempDir::new().unwrap();
    let config = config(tmp.path());
    let log = log();
    let mut tool = FakeTool::new(&log).producing_on("C");

    let mut pipeline = Pipeline::new(&config, &mut tool, false);
    let root = pipeline.region_root("NGC1333");
    fs::create_dir_all(&root).unwrap();
    let report = pipeline
        .reduce_region(&log, &selection("NGC1333", "DR1"), &window("3"), &root)
        .unwrap();

    let dir = tmp.path().join("NGC1333/NGC1333_HNCO_1_0");
    assert!(dir.join(FITS_F0_P0).is_file());
    assert!(
        dir.join("Perseus_map_NGC1333-A_scan_11_58_window3_feed0_pol0_sess5.index")
            .is_file()
    );
    assert!(
        dir.join("Perseus_map_NGC1333-A_scan_11_58_window3_feed6_pol1_sess5.fits")
            .is_file()
    );
    assert_eq!(fs::read_dir(&dir).unwrap().count(), 28);

    // banks A and B produce nothing, C satisfies the cell
    assert_eq!(report.tasks, 1);
    assert_eq!(report.cells_reduced, 14);
    assert_eq!(report.invocations, 14 * 3);
    assert!(tool.calls.len() <= 112);
    assert!(tool.flag_values("--window").iter().all(|w| w == "3"));
    assert!(
        tool.flag_values("--beam-scaling")
            .iter()
            .all(|g| g == "1,1,1,1,1,1,1,1,1,1,1,1,1,1")
    );
    assert!(tool.calls.iter().all(|c| c.working_dir == root));
}

#[test]
fn second_run_invokes_nothing() {
    let tmp = TempDir::new().unwrap();
    let config = config(tmp.path());
    let log = log();
    let root = tmp.path().join("NGC1333");
    fs::create_dir_all(&root).unwrap();

    let mut first = FakeTool::new(&log);
    Pipeline::new(&config, &mut first, false)
        .reduce_region(&log, &selection("NGC1333", "DR1"), &window("3"), &root)
        .unwrap();
    assert_eq!(first.calls.len(), 14);

    let mut second = FakeTool::new(&log);
    let report = Pipeline::new(&config, &mut second, false)
        .reduce_region(&log, &selection("NGC1333", "DR1"), &window("3"), &root)
        .unwrap();
    assert!(second.calls.is_empty());
    assert_eq!(report.cells_satisfied, 14);
    assert_eq!(report.cells_reduced, 0);
}

#[test]
fn only_the_missing_cells_are_reduced() {
    let tmp = TempDir::new().unwrap();
    let config = config(tmp.path());
    let log = log();
    let root = tmp.path().join("NGC1333");
    let dir = root.join("NGC1333_HNCO_1_0");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(FITS_F0_P0), b"done").unwrap();

    let mut tool = FakeTool::new(&log);
    let report = Pipeline::new(&config, &mut tool, false)
        .reduce_region(&log, &selection("NGC1333", "DR1"), &window("3"), &root)
        .unwrap();

    assert_eq!(report.cells_satisfied, 1);
    assert_eq!(report.cells_reduced, 13);
    assert_eq!(tool.calls.len(), 13);
    assert!(
        !tool
            .calls
            .iter()
            .any(|c| c.flag_value("--feed") == Some("0") && c.flag_value("--pol") == Some("0"))
    );
    assert_eq!(fs::read(dir.join(FITS_F0_P0)).unwrap(), b"done");
}

#[test]
fn overwrite_runs_every_bank_and_replaces_output() {
    let tmp = TempDir::new().unwrap();
    let config = config(tmp.path());
    let log = log();
    let root = tmp.path().join("NGC1333");
    let dir = root.join("NGC1333_HNCO_1_0");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(FITS_F0_P0), b"stale").unwrap();

    let mut tool = FakeTool::new(&log);
    let report = Pipeline::new(&config, &mut tool, true)
        .reduce_region(&log, &selection("NGC1333", "DR1"), &window("3"), &root)
        .unwrap();

    assert_eq!(report.cells_satisfied, 0);
    assert_eq!(tool.calls.len(), 14 * 8);
    assert_eq!(fs::read(dir.join(FITS_F0_P0)).unwrap(), b"SIMPLE");
}

#[test]
fn launch_failures_are_tolerated() {
    let tmp = TempDir::new().unwrap();
    let config = config(tmp.path());
    let log = log();
    let root = tmp.path().join("NGC1333");
    fs::create_dir_all(&root).unwrap();

    let mut tool = FakeTool::new(&log).unlaunchable();
    let report = Pipeline::new(&config, &mut tool, false)
        .reduce_region(&log, &selection("NGC1333", "DR1"), &window("3"), &root)
        .unwrap();

    assert_eq!(report.status, RegionStatus::Completed);
    assert_eq!(tool.calls.len(), 14 * 8);
    assert_eq!(report.artifacts_filed, 0);
}

#[test]
fn unknown_window_fails_before_any_work() {
    let err = resolve_windows(&["8", "99"]).unwrap_err();
    assert!(matches!(err, PipelineError::Core(_)));
    assert_eq!(resolve_windows::<&str>(&[]).unwrap().len(), 13);
}

#[test]
fn unknown_release_column_aborts_the_run() {
    let tmp = TempDir::new().unwrap();
    let config = config(tmp.path());
    let log = log();
    let mut tool = FakeTool::new(&log);

    let err = Pipeline::new(&config, &mut tool, false)
        .reduce_all(
            &log,
            &RegionCatalog::from_log(&log),
            "DR9",
            &window("8"),
        )
        .unwrap_err();

    assert!(!err.is_region_fatal());
    assert!(tool.calls.is_empty());
}

#[test]
fn batch_skips_region_whose_directory_cannot_be_made() {
    let tmp = TempDir::new().unwrap();
    let config = config(tmp.path());
    let log = log();
    fs::write(tmp.path().join("NGC1333"), b"in the way").unwrap();
    let catalog = RegionCatalog::new(vec!["NGC1333".into(), "none".into(), "B18".into()]);

    let mut tool = FakeTool::new(&log);
    let run = Pipeline::new(&config, &mut tool, false)
        .reduce_all(&log, &catalog, "all", &window("8"))
        .unwrap();

    let regions: Vec<_> = run.regions.iter().map(|r| (r.region.as_str(), r.status)).collect();
    assert_eq!(
        regions,
        [
            ("NGC1333", RegionStatus::Aborted),
            ("B18", RegionStatus::Completed),
        ]
    );
    assert_eq!(run.aborted().count(), 1);
    assert_eq!(run.invocations(), 14);
    assert!(tmp.path().join("B18/B18_NH3_11").is_dir());
    assert!(!tmp.path().join("none").exists());
}

#[test]
fn session_run_collapses_dates_to_first_row() {
    let tmp = TempDir::new().unwrap();
    let config = config(tmp.path());
    let log = log();
    let catalog = RegionCatalog::new(vec!["NGC1333".into(), "B18".into()]);

    let mut tool = FakeTool::new(&log);
    let run = Pipeline::new(&config, &mut tool, false)
        .reduce_session(&log, &catalog, 5, "all", &window("8"))
        .unwrap();

    // only NGC1333 observed in session 5, and only its 03:00 row
    assert_eq!(run.regions.len(), 1);
    assert_eq!(run.regions[0].region, "NGC1333");
    assert_eq!(run.regions[0].tasks, 1);
    assert!(tool.flag_values("-m").iter().all(|m| m == "11:58"));
    assert!(
        tool.flag_values("-i")
            .iter()
            .all(|i| i.contains("AGBT16B_278_05.raw.vegas"))
    );
    // regions without rows still get their directory
    assert!(tmp.path().join("B18").is_dir());
}

#[test]
fn plan_classifies_without_invoking() {
    let tmp = TempDir::new().unwrap();
    let config = config(tmp.path());
    let log = log();
    let dir = tmp.path().join("NGC1333/NGC1333_HNCO_1_0");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(FITS_F0_P0), b"").unwrap();

    let mut tool = FakeTool::new(&log);
    let pipeline = Pipeline::new(&config, &mut tool, false);
    let plan = pipeline
        .plan_region(&log, &selection("NGC1333", "all"), &window("3"))
        .unwrap();

    assert_eq!(plan.cells.len(), 2 * 14);
    assert_eq!(plan.count(CellStatus::Satisfied), 1);
    assert_eq!(plan.count(CellStatus::Pending), 27);
    assert_eq!(plan.cells[0].path, dir.join(FITS_F0_P0));
    assert!(tool.calls.is_empty());
}
