//! Calibration tool settings.

use serde::{Deserialize, Serialize};

fn default_tool() -> String {
    String::from("gbtpipeline")
}

fn default_project_code() -> String {
    String::from("AGBT16B_278")
}

fn default_units() -> String {
    String::from("tmb")
}

const fn default_verbosity() -> u8 {
    4
}

const fn default_output_mode() -> u32 {
    0o774
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipelineConfig {
    /// Executable invoked once per bank for every pending cell.
    #[serde(default = "default_tool")]
    pub tool: String,

    /// Observing project prefix of the raw session names.
    #[serde(default = "default_project_code")]
    pub project_code: String,

    /// Calibrated intensity units (`--units`).
    #[serde(default = "default_units")]
    pub units: String,

    #[serde(default)]
    pub smoothing_kernel_size: u32,

    /// Tool verbosity (`-v`).
    #[serde(default = "default_verbosity")]
    pub verbosity: u8,

    /// Permission bits applied to filed artifacts (best effort).
    #[serde(default = "default_output_mode")]
    pub output_mode: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tool: default_tool(),
            project_code: default_project_code(),
            units: default_units(),
            smoothing_kernel_size: 0,
            verbosity: default_verbosity(),
            output_mode: default_output_mode(),
        }
    }
}
