//! # ks-obslog
//!
//! Reads the observation log and region catalog (CSV exports) and expands a
//! (region, date window, release) selection into concrete work units.
//!
//! Release flags are parsed once at load time into [`ks_core::ReleaseFlag`];
//! filtering never compares raw strings.

pub mod catalog;
pub mod dates;
mod error;
pub mod expander;
pub mod log;

pub use catalog::RegionCatalog;
pub use dates::DateWindow;
pub use error::LogError;
pub use expander::{ExpandedTask, Selection, expand, select_rows};
pub use log::ObservationLog;
