//! Raw-data archival (session → per-bank FITS) settings.

use serde::{Deserialize, Serialize};

fn default_tool() -> String {
    String::from("sdfits")
}

fn default_backends() -> String {
    String::from("vegas")
}

fn default_group() -> String {
    String::from("gas")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArchiveConfig {
    #[serde(default = "default_tool")]
    pub tool: String,

    /// Passed as `-backends=<value>`.
    #[serde(default = "default_backends")]
    pub backends: String,

    /// Group given ownership of converted session directories.
    #[serde(default = "default_group")]
    pub group: String,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            tool: default_tool(),
            backends: default_backends(),
            group: default_group(),
        }
    }
}
