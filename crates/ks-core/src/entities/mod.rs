//! Observation log rows and the work units derived from them.

mod observation;
mod work_unit;

pub use observation::{ObservationRow, ScanRange};
pub use work_unit::WorkUnit;
