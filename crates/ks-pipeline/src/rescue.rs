//! Rescue of artifacts the calibration tool left in a scan directory.
//!
//! Files named `<prefix>..._window<w>_....{fits,index}` are moved into
//! `<region>_<line>/` next to them and tagged with the session.

use std::fs;
use std::path::Path;

use globset::{Glob, GlobSetBuilder};
use ks_core::SpectralWindow;
use ks_core::naming::{line_directory_name, with_session_tag};

use crate::error::PipelineError;
use crate::report::{MovedFile, RescueReport};

/// Move every untagged tool artifact for `prefix` found directly in
/// `scan_dir` into its line directory.
///
/// Unreadable scan directories are errors; individual moves are best effort
/// and collected in [`RescueReport::failed`].
pub fn rescue_misplaced(
    scan_dir: &Path,
    region: &str,
    session: u32,
    prefix: &str,
) -> Result<RescueReport, PipelineError> {
    let windows = SpectralWindow::all();
    let mut builder = GlobSetBuilder::new();
    for window in windows {
        builder.add(Glob::new(&format!("*_window{}_*.{{fits,index}}", window.code()))?);
    }
    let patterns = builder.build()?;

    let io_error = |source| PipelineError::Io {
        path: scan_dir.to_path_buf(),
        source,
    };
    let mut names = fs::read_dir(scan_dir)
        .map_err(io_error)?
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect::<Vec<_>>();
    names.sort();

    let mut report = RescueReport::default();
    for name in names {
        let Some(rest) = name.strip_prefix(prefix) else {
            continue;
        };
        if name.contains("_sess") {
            continue;
        }
        let Some(&index) = patterns.matches(rest).first() else {
            continue;
        };

        let line_dir = scan_dir.join(line_directory_name(region, windows[index]));
        let from = scan_dir.join(&name);
        let to = line_dir.join(with_session_tag(&name, session));
        match fs::create_dir_all(&line_dir).and_then(|()| fs::rename(&from, &to)) {
            Ok(()) => {
                tracing::info!(from = %from.display(), to = %to.display(), "moved misplaced file");
                report.moved.push(MovedFile { from, to });
            }
            Err(error) => {
                tracing::warn!(file = %from.display(), %error, "could not move misplaced file");
                report.failed.push(name);
            }
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"").unwrap();
    }

    #[test]
    fn moves_into_line_directory_with_session_tag() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "W3_scan_29_76_window8_feed0_pol0.fits");
        touch(tmp.path(), "W3_scan_29_76_window8_feed0_pol0.index");

        let report = rescue_misplaced(tmp.path(), "W3", 81, "W3").unwrap();

        assert_eq!(report.moved.len(), 2);
        assert!(report.failed.is_empty());
        let dir = tmp.path().join("W3_NH3_11");
        assert!(dir.join("W3_scan_29_76_window8_feed0_pol0_sess81.fits").exists());
        assert!(dir.join("W3_scan_29_76_window8_feed0_pol0_sess81.index").exists());
        assert!(!tmp.path().join("W3_scan_29_76_window8_feed0_pol0.fits").exists());
    }

    #[test]
    fn window_token_is_matched_exactly() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "W3_scan_1_2_window1_feed0_pol0.fits");
        touch(tmp.path(), "W3_scan_1_2_window10_feed0_pol0.fits");

        rescue_misplaced(tmp.path(), "W3", 7, "W3").unwrap();

        assert!(
            tmp.path()
                .join("W3_HC7N_19_18/W3_scan_1_2_window1_feed0_pol0_sess7.fits")
                .exists()
        );
        assert!(
            tmp.path()
                .join("W3_NH3_33/W3_scan_1_2_window10_feed0_pol0_sess7.fits")
                .exists()
        );
    }

    #[test]
    fn ignores_other_prefixes_tagged_files_and_other_extensions() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "B18_scan_1_2_window8_feed0_pol0.fits");
        touch(tmp.path(), "W3_scan_1_2_window8_feed0_pol0_sess5.fits");
        touch(tmp.path(), "W3_scan_1_2_window8_feed0_pol0.log");

        let report = rescue_misplaced(tmp.path(), "W3", 5, "W3").unwrap();

        assert!(report.moved.is_empty());
        assert!(!tmp.path().join("W3_NH3_11").exists());
    }

    #[test]
    fn missing_scan_directory_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = rescue_misplaced(&tmp.path().join("absent"), "W3", 5, "W3").unwrap_err();
        assert!(matches!(err, PipelineError::Io { .. }));
    }
}
