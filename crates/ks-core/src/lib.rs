//! # ks-core
//!
//! Core types shared across all Keystone crates:
//! - The static spectral window table (window code ↔ line name)
//! - Receiver enums (feed, polarization, bank) and release membership flags
//! - Observation log rows and the derived per-cell work units
//! - Deterministic naming for raw inputs and reduced artifacts
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod gains;
pub mod naming;
pub mod window;

pub use entities::{ObservationRow, ScanRange, WorkUnit};
pub use enums::{ArtifactKind, Bank, Feed, Polarization, ReleaseFlag};
pub use errors::CoreError;
pub use gains::Gains;
pub use window::SpectralWindow;
