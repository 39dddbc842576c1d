//! # ks-pipeline
//!
//! Orchestration of the Keystone reduction sweep:
//! - [`resolver`]: per-cell completion checks and output directory handling
//! - [`invoker`]: one calibration-tool call per bank, artifact filing
//! - [`driver`]: region, all-region and per-session drivers, dry-run planning
//! - [`archive`]: raw session conversion
//! - [`rescue`]: relocation of artifacts left in scan directories
//!
//! External programs are run through [`ToolRunner`], so everything above the
//! process boundary can be exercised with a fake.

pub mod archive;
pub mod driver;
pub mod error;
pub mod invoker;
pub mod report;
pub mod rescue;
pub mod resolver;
pub mod runner;

pub use archive::fill_all;
pub use driver::{Pipeline, resolve_windows};
pub use error::PipelineError;
pub use invoker::Reducer;
pub use report::{
    ArchiveReport, CellReport, CellStatus, FilingOutcome, PlanReport, RegionReport, RegionStatus,
    RescueReport, RunReport,
};
pub use rescue::rescue_misplaced;
pub use runner::{Invocation, ProcessRunner, ToolRunner};
