use std::path::PathBuf;

use serde::Serialize;

use crate::entities::ScanRange;
use crate::enums::{ArtifactKind, Feed, Polarization};
use crate::gains::Gains;
use crate::naming;
use crate::window::SpectralWindow;

/// One (row, window, feed, polarization) cell of reduction work.
///
/// Regenerated on every run, never persisted. All addressing is explicit:
/// nothing here depends on the process working directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkUnit {
    pub region: String,
    pub session: u32,
    pub scans: ScanRange,
    pub source: String,
    pub window: SpectralWindow,
    pub feed: Feed,
    pub pol: Polarization,
    pub gains: Gains,
    pub raw_data_dir: PathBuf,
    pub output_root: PathBuf,
}

impl WorkUnit {
    /// `<output_root>/<region>_<line>`.
    #[must_use]
    pub fn output_directory(&self) -> PathBuf {
        self.output_root
            .join(naming::line_directory_name(&self.region, self.window))
    }

    /// Name the calibration tool gives this cell's artifact (no session tag).
    #[must_use]
    pub fn tool_output_name(&self, kind: ArtifactKind) -> String {
        naming::tool_output_name(&self.source, self.scans, self.window, self.feed, self.pol, kind)
    }

    /// Session-tagged name this cell's artifact is filed under.
    #[must_use]
    pub fn canonical_name(&self, kind: ArtifactKind) -> String {
        naming::canonical_name(
            &self.source,
            self.scans,
            self.window,
            self.feed,
            self.pol,
            self.session,
            kind,
        )
    }

    /// Full path of the filed artifact.
    #[must_use]
    pub fn canonical_path(&self, kind: ArtifactKind) -> PathBuf {
        self.output_directory().join(self.canonical_name(kind))
    }
}
