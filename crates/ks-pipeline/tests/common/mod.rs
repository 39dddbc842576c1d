#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use ks_config::KeystoneConfig;
use ks_obslog::{DateWindow, ObservationLog, Selection};
use ks_pipeline::{Invocation, ToolRunner};

pub const LOG: &str = "\
Date,Region name,Session,Start Scan,End Scan,Source,Beam Gains,Special RawDir,all,DR1
2016-10-27 03:00:00,NGC1333,5,11,58,Perseus_map_NGC1333-A,--,--,TRUE,TRUE
2016-10-27 07:00:00,NGC1333,5,60,90,Perseus_map_NGC1333-B,--,--,TRUE,FALSE
2016-11-02 02:00:00,B18,9,12,40,B18_map_1,--,--,TRUE,TRUE
2016-11-02 04:00:00,none,9,41,44,test_source,--,--,TRUE,TRUE
";

pub fn log() -> ObservationLog {
    ObservationLog::from_reader(LOG.as_bytes()).unwrap()
}

pub fn config(root: &Path) -> KeystoneConfig {
    let mut config = KeystoneConfig::default();
    config.paths.raw_data_root = root.join("rawdata");
    config.paths.work_root = root.to_path_buf();
    config
}

pub fn selection(region: &str, release: &str) -> Selection {
    Selection {
        region: region.to_string(),
        dates: DateWindow::parse("2015-01-01", "2020-12-31").unwrap(),
        release: release.to_string(),
    }
}

/// Stand-in for the calibration tool.
///
/// Records every invocation and, for the configured banks, leaves the
/// default-named `.fits`/`.index` pair in the working directory the way the
/// real tool does.
pub struct FakeTool {
    sources: HashMap<String, String>,
    producing_banks: Vec<char>,
    launch_fails: bool,
    pub calls: Vec<Invocation>,
}

impl FakeTool {
    /// Produces output on every bank.
    pub fn new(log: &ObservationLog) -> Self {
        let sources = log
            .rows()
            .iter()
            .map(|row| (row.scans.to_string(), row.source.clone()))
            .collect();
        Self {
            sources,
            producing_banks: "ABCDEFGH".chars().collect(),
            launch_fails: false,
            calls: Vec::new(),
        }
    }

    #[must_use]
    pub fn producing_on(mut self, banks: &str) -> Self {
        self.producing_banks = banks.chars().collect();
        self
    }

    #[must_use]
    pub fn unlaunchable(mut self) -> Self {
        self.launch_fails = true;
        self
    }

    pub fn flag_values(&self, flag: &str) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|c| c.flag_value(flag).map(str::to_string))
            .collect()
    }

    fn bank(invocation: &Invocation) -> Option<char> {
        invocation
            .flag_value("-i")?
            .strip_suffix(".fits")?
            .chars()
            .last()
    }
}

impl ToolRunner for FakeTool {
    fn run(&mut self, invocation: &Invocation) -> io::Result<Option<i32>> {
        self.calls.push(invocation.clone());
        if self.launch_fails {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no such tool"));
        }

        let produces = Self::bank(invocation).is_some_and(|b| self.producing_banks.contains(&b));
        if !produces {
            return Ok(Some(1));
        }

        let flag = |name: &str| invocation.flag_value(name).unwrap_or_default();
        let scans = flag("-m");
        let source = self.sources.get(scans).cloned().unwrap_or_default();
        let stem = format!(
            "{source}_scan_{}_window{}_feed{}_pol{}",
            scans.replace(':', "_"),
            flag("--window"),
            flag("--feed"),
            flag("--pol"),
        );
        for ext in ["fits", "index"] {
            fs::write(invocation.working_dir.join(format!("{stem}.{ext}")), b"SIMPLE")?;
        }
        Ok(Some(0))
    }
}
