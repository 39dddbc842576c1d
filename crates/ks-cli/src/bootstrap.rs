use anyhow::Context;
use ks_config::KeystoneConfig;

use crate::cli::GlobalFlags;

/// Load layered configuration (`.env`, TOML files, `KEYSTONE_*`), then let
/// command-line paths win.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<KeystoneConfig> {
    let mut config =
        KeystoneConfig::load_with_dotenv().context("failed to load keystone configuration")?;
    apply_path_overrides(&mut config, flags);
    tracing::debug!(
        raw_data_root = %config.paths.raw_data_root.display(),
        work_root = %config.paths.work_root.display(),
        log_file = %config.paths.log_file.display(),
        "configuration loaded"
    );
    Ok(config)
}

fn apply_path_overrides(config: &mut KeystoneConfig, flags: &GlobalFlags) {
    if let Some(log) = &flags.log {
        config.paths.log_file.clone_from(log);
    }
    if let Some(catalog) = &flags.catalog {
        config.paths.region_catalog = Some(catalog.clone());
    }
    if let Some(work_root) = &flags.work_root {
        config.paths.work_root.clone_from(work_root);
    }
}
