//! Deterministic names for raw inputs, output directories, and artifacts.
//!
//! Canonical artifact names are injective over work units: source, scan range,
//! window, feed, polarization and session all appear in the name.

use std::path::{Path, PathBuf};

use crate::entities::ScanRange;
use crate::enums::{ArtifactKind, Bank, Feed, Polarization};
use crate::window::SpectralWindow;

/// Raw archive suffix appended to the session name.
pub const RAW_SUFFIX: &str = ".raw.vegas";

/// `<region>_<line>`, e.g. `NGC1333_HNCO_1_0`.
#[must_use]
pub fn line_directory_name(region: &str, window: SpectralWindow) -> String {
    format!("{region}_{}", window.line_name())
}

/// `<source>_scan_<start>_<end>_window<w>_feed<f>_pol<p>`.
#[must_use]
pub fn artifact_stem(
    source: &str,
    scans: ScanRange,
    window: SpectralWindow,
    feed: Feed,
    pol: Polarization,
) -> String {
    format!(
        "{source}_scan_{}_{}_window{window}_feed{feed}_pol{pol}",
        scans.start, scans.end
    )
}

#[must_use]
pub fn tool_output_name(
    source: &str,
    scans: ScanRange,
    window: SpectralWindow,
    feed: Feed,
    pol: Polarization,
    kind: ArtifactKind,
) -> String {
    format!(
        "{}.{}",
        artifact_stem(source, scans, window, feed, pol),
        kind.extension()
    )
}

#[must_use]
pub fn canonical_name(
    source: &str,
    scans: ScanRange,
    window: SpectralWindow,
    feed: Feed,
    pol: Polarization,
    session: u32,
    kind: ArtifactKind,
) -> String {
    format!(
        "{}_sess{session}.{}",
        artifact_stem(source, scans, window, feed, pol),
        kind.extension()
    )
}

/// Insert `_sess<session>` before the extension of a tool-named file.
///
/// `W3_scan_1_2_window8_feed0_pol0.fits` → `..._pol0_sess81.fits`.
#[must_use]
pub fn with_session_tag(file_name: &str, session: u32) -> String {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) => format!("{stem}_sess{session}.{ext}"),
        None => format!("{file_name}_sess{session}"),
    }
}

/// Archive session name, session zero-padded to two digits
/// (`AGBT16B_278_05`).
#[must_use]
pub fn session_name(project_code: &str, session: u32) -> String {
    format!("{project_code}_{session:02}")
}

/// `<raw_root>/<session_name>.raw.vegas`.
#[must_use]
pub fn raw_session_dir(raw_root: &Path, project_code: &str, session: u32) -> PathBuf {
    raw_root.join(format!("{}{RAW_SUFFIX}", session_name(project_code, session)))
}

/// `<raw_root>/<name>.raw.vegas/<name>.raw.vegas.<bank>.fits`.
#[must_use]
pub fn raw_bank_file(raw_root: &Path, project_code: &str, session: u32, bank: Bank) -> PathBuf {
    let name = session_name(project_code, session);
    raw_session_dir(raw_root, project_code, session).join(format!("{name}{RAW_SUFFIX}.{bank}.fits"))
}
