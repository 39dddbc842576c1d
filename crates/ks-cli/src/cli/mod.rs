use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `keystone` binary.
#[derive(Debug, Parser)]
#[command(
    name = "keystone",
    version,
    about = "Keystone - batch reduction of KEYSTONE survey observations"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Observation log CSV (overrides paths.log_file)
    #[arg(long, global = true)]
    pub log: Option<PathBuf>,

    /// Region catalog CSV (overrides paths.region_catalog)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Directory holding one output directory per region
    #[arg(long, global = true)]
    pub work_root: Option<PathBuf>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            log: self.log.clone(),
            catalog: self.catalog.clone(),
            work_root: self.work_root.clone(),
        }
    }
}
