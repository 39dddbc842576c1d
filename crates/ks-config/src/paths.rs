//! Filesystem locations.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_raw_data_root() -> PathBuf {
    PathBuf::from("/lustre/pipeline/scratch/KEYSTONE/rawdata/")
}

fn default_work_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_log_file() -> PathBuf {
    PathBuf::from("ObservationLog.csv")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PathsConfig {
    /// Root of the archived `.raw.vegas` session directories.
    #[serde(default = "default_raw_data_root")]
    pub raw_data_root: PathBuf,

    /// Batch drivers create one `<work_root>/<region>` directory per region.
    #[serde(default = "default_work_root")]
    pub work_root: PathBuf,

    /// CSV export of the observation log.
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,

    /// Optional region catalog CSV. Without it, regions come from the log.
    #[serde(default)]
    pub region_catalog: Option<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            raw_data_root: default_raw_data_root(),
            work_root: default_work_root(),
            log_file: default_log_file(),
            region_catalog: None,
        }
    }
}
