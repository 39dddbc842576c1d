use anyhow::Context;
use ks_config::KeystoneConfig;
use ks_obslog::{ObservationLog, RegionCatalog};

/// Configuration plus the observation log and region catalog, loaded once at
/// startup.
pub struct AppContext {
    pub config: KeystoneConfig,
    pub log: ObservationLog,
    pub catalog: RegionCatalog,
}

impl AppContext {
    pub fn init(config: KeystoneConfig) -> anyhow::Result<Self> {
        let log_path = &config.paths.log_file;
        let log = ObservationLog::from_path(log_path).with_context(|| {
            format!("failed to read observation log {}", log_path.display())
        })?;

        // Without a catalog file, regions come from the log itself.
        let catalog_path = config
            .paths
            .region_catalog
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty());
        let catalog = match catalog_path {
            Some(path) => RegionCatalog::from_path(path)
                .with_context(|| format!("failed to read region catalog {}", path.display()))?,
            None => RegionCatalog::from_log(&log),
        };

        tracing::debug!(
            rows = log.rows().len(),
            regions = catalog.regions().len(),
            "observation log loaded"
        );

        Ok(Self {
            config,
            log,
            catalog,
        })
    }

    /// The release column to filter on: the flag if given, else configured.
    #[must_use]
    pub fn release<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested.unwrap_or(&self.config.selection.release)
    }
}
