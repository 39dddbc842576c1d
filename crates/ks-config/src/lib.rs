//! # ks-config
//!
//! Layered configuration loading for Keystone using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`KEYSTONE_*` prefix, `__` as separator)
//! 2. Project-level `.keystone/config.toml`
//! 3. User-level `~/.config/keystone/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `KEYSTONE_PIPELINE__TOOL` -> `pipeline.tool`,
//! `KEYSTONE_PATHS__RAW_DATA_ROOT` -> `paths.raw_data_root`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use ks_config::KeystoneConfig;
//!
//! let config = KeystoneConfig::load_with_dotenv().expect("config");
//! println!("raw data under {}", config.paths.raw_data_root.display());
//! ```

mod archive;
mod error;
mod paths;
mod pipeline;
mod selection;

pub use archive::ArchiveConfig;
pub use error::ConfigError;
pub use paths::PathsConfig;
pub use pipeline::PipelineConfig;
pub use selection::SelectionConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct KeystoneConfig {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub archive: ArchiveConfig,
    #[serde(default)]
    pub selection: SelectionConfig,
}

impl KeystoneConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` support.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate from an arbitrary figment.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".keystone/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("KEYSTONE_").split("__"))
    }

    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("pipeline.tool", &self.pipeline.tool),
            ("pipeline.project_code", &self.pipeline.project_code),
            ("archive.tool", &self.archive.tool),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
        }

        if self.selection.start_date > self.selection.end_date {
            return Err(ConfigError::InvalidValue {
                field: "selection.start_date".to_string(),
                reason: format!(
                    "{} is after end_date {}",
                    self.selection.start_date, self.selection.end_date
                ),
            });
        }

        if self.pipeline.output_mode > 0o7777 {
            return Err(ConfigError::InvalidValue {
                field: "pipeline.output_mode".to_string(),
                reason: format!("{:o} is not a permission mode", self.pipeline.output_mode),
            });
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("keystone").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = KeystoneConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.selection.release, "all");
        assert!(config.paths.region_catalog.is_none());
    }

    #[test]
    fn empty_tool_is_rejected() {
        let mut config = KeystoneConfig::default();
        config.pipeline.tool = "  ".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("pipeline.tool"));
    }

    #[test]
    fn inverted_dates_are_rejected() {
        let mut config = KeystoneConfig::default();
        std::mem::swap(
            &mut config.selection.start_date,
            &mut config.selection.end_date,
        );
        assert!(config.validate().is_err());
    }
}
