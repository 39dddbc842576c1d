use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Reduce every region observed in one session.
    ReduceSession(ReduceSessionArgs),
    /// Reduce every catalog region over the configured date window.
    ReduceAll(ReduceAllArgs),
    /// Reduce one region, optionally restricted to some windows and dates.
    ReduceRegion(RegionArgs),
    /// Show which cells of a region are done and which are pending.
    Plan(RegionArgs),
    /// Convert raw session data for every session in the log.
    FillAll(FillAllArgs),
    /// Move artifacts left in a scan directory into their line directories.
    MoveFiles(MoveFilesArgs),
}

/// Arguments for `keystone reduce-session`.
#[derive(Clone, Debug, Args)]
pub struct ReduceSessionArgs {
    #[arg(long)]
    pub session: u32,
    /// Release-flag column rows must be marked TRUE in.
    #[arg(long)]
    pub release: Option<String>,
    /// Re-reduce cells whose output already exists.
    #[arg(long)]
    pub overwrite: bool,
}

/// Arguments for `keystone reduce-all`.
#[derive(Clone, Debug, Args)]
pub struct ReduceAllArgs {
    #[arg(long)]
    pub release: Option<String>,
    #[arg(long)]
    pub overwrite: bool,
}

/// Arguments for `keystone reduce-region` and `keystone plan`.
#[derive(Clone, Debug, Args)]
pub struct RegionArgs {
    #[arg(long)]
    pub region: String,
    /// Window codes; all windows when omitted.
    #[arg(long = "window", value_delimiter = ',')]
    pub windows: Vec<String>,
    /// First date included (YYYY-MM-DD or YYYY-MM-DD HH:MM:SS).
    #[arg(long)]
    pub start_date: Option<String>,
    /// Last date included.
    #[arg(long)]
    pub end_date: Option<String>,
    #[arg(long)]
    pub release: Option<String>,
    #[arg(long)]
    pub overwrite: bool,
}

/// Arguments for `keystone fill-all`.
#[derive(Clone, Debug, Args)]
pub struct FillAllArgs {
    /// Remove and regenerate sessions that are already converted.
    #[arg(long)]
    pub overwrite: bool,
}

/// Arguments for `keystone move-files`.
#[derive(Clone, Debug, Args)]
pub struct MoveFilesArgs {
    #[arg(long)]
    pub region: String,
    /// Session number appended to the moved file names.
    #[arg(long)]
    pub session: u32,
    /// File name prefix to search for, e.g. `W3_map_1_scan_29_76`.
    #[arg(long)]
    pub prefix: String,
    /// Scan directory; defaults to the region's output directory.
    #[arg(long)]
    pub dir: Option<PathBuf>,
}
