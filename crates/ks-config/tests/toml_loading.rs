//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for sandboxed working directory and env manipulation.

use std::path::PathBuf;

use chrono::NaiveDate;
use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use ks_config::KeystoneConfig;

#[test]
fn loads_pipeline_and_paths_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[paths]
raw_data_root = "/data/raw"
work_root = "/data/reduced"
log_file = "/data/ObservationLog.csv"
region_catalog = "/data/regions.csv"

[pipeline]
tool = "/opt/gbt/bin/gbtpipeline"
project_code = "AGBT17A_999"
units = "ta*"
smoothing_kernel_size = 3
verbosity = 2
output_mode = 0o664
"#,
        )?;

        let config: KeystoneConfig = Figment::from(Serialized::defaults(KeystoneConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.paths.raw_data_root, PathBuf::from("/data/raw"));
        assert_eq!(config.paths.work_root, PathBuf::from("/data/reduced"));
        assert_eq!(
            config.paths.region_catalog,
            Some(PathBuf::from("/data/regions.csv"))
        );
        assert_eq!(config.pipeline.tool, "/opt/gbt/bin/gbtpipeline");
        assert_eq!(config.pipeline.project_code, "AGBT17A_999");
        assert_eq!(config.pipeline.units, "ta*");
        assert_eq!(config.pipeline.smoothing_kernel_size, 3);
        assert_eq!(config.pipeline.verbosity, 2);
        assert_eq!(config.pipeline.output_mode, 0o664);
        Ok(())
    });
}

#[test]
fn partial_sections_keep_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[archive]
group = "keystone"

[selection]
release = "DR1"
end_date = "2017-06-30"
"#,
        )?;

        let config: KeystoneConfig = Figment::from(Serialized::defaults(KeystoneConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.archive.group, "keystone");
        assert_eq!(config.archive.tool, "sdfits");
        assert_eq!(config.archive.backends, "vegas");
        assert_eq!(config.selection.release, "DR1");
        assert_eq!(
            config.selection.start_date,
            NaiveDate::from_ymd_opt(2015, 1, 1).unwrap()
        );
        assert_eq!(
            config.selection.end_date,
            NaiveDate::from_ymd_opt(2017, 6, 30).unwrap()
        );
        assert_eq!(config.pipeline.tool, "gbtpipeline");
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up() {
    Jail::expect_with(|jail| {
        std::fs::create_dir(jail.directory().join(".keystone")).map_err(|e| e.to_string())?;
        jail.create_file(
            ".keystone/config.toml",
            r#"
[pipeline]
tool = "fake-pipeline"
"#,
        )?;

        let config = KeystoneConfig::load().map_err(|e| e.to_string())?;
        assert_eq!(config.pipeline.tool, "fake-pipeline");
        Ok(())
    });
}

#[test]
fn invalid_values_fail_validation() {
    Jail::expect_with(|jail| {
        std::fs::create_dir(jail.directory().join(".keystone")).map_err(|e| e.to_string())?;
        jail.create_file(
            ".keystone/config.toml",
            r#"
[selection]
start_date = "2019-01-01"
end_date = "2018-01-01"
"#,
        )?;

        let err = KeystoneConfig::load().unwrap_err();
        assert!(err.to_string().contains("selection.start_date"));
        Ok(())
    });
}
