//! Receiver indices, bank identifiers, release flags, and artifact kinds.
//!
//! Enums serialize as `snake_case`; receiver indices serialize as bare
//! integers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// ReleaseFlag
// ---------------------------------------------------------------------------

/// Membership of a log row in a named data release.
///
/// Parsed once when the log is loaded. Only the exact string `TRUE` counts as
/// membership; `true`, `1` and friends are [`ReleaseFlag::Excluded`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseFlag {
    Included,
    Excluded,
    /// The log cell was the missing-value sentinel (`--`) or empty.
    Missing,
}

impl ReleaseFlag {
    /// Parse a raw log cell.
    #[must_use]
    pub fn from_log_cell(cell: &str) -> Self {
        match cell.trim() {
            "TRUE" => Self::Included,
            "" | "--" => Self::Missing,
            _ => Self::Excluded,
        }
    }

    #[must_use]
    pub const fn is_included(self) -> bool {
        matches!(self, Self::Included)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Included => "included",
            Self::Excluded => "excluded",
            Self::Missing => "missing",
        }
    }
}

impl fmt::Display for ReleaseFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Feed / Polarization
// ---------------------------------------------------------------------------

/// Receiver beam index (0..=6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Feed(u8);

impl Feed {
    pub const COUNT: u8 = 7;

    pub fn new(index: u8) -> Result<Self, CoreError> {
        if index < Self::COUNT {
            Ok(Self(index))
        } else {
            Err(CoreError::OutOfRange {
                kind: "feed",
                value: u32::from(index),
                max: u32::from(Self::COUNT - 1),
            })
        }
    }

    /// All feeds in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..Self::COUNT).map(Self)
    }

    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Feed {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Feed> for u8 {
    fn from(feed: Feed) -> Self {
        feed.0
    }
}

impl fmt::Display for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Polarization channel (0 or 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Polarization(u8);

impl Polarization {
    pub const COUNT: u8 = 2;

    pub fn new(index: u8) -> Result<Self, CoreError> {
        if index < Self::COUNT {
            Ok(Self(index))
        } else {
            Err(CoreError::OutOfRange {
                kind: "polarization",
                value: u32::from(index),
                max: u32::from(Self::COUNT - 1),
            })
        }
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (0..Self::COUNT).map(Self)
    }

    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Polarization {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Polarization> for u8 {
    fn from(pol: Polarization) -> Self {
        pol.0
    }
}

impl fmt::Display for Polarization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Bank
// ---------------------------------------------------------------------------

/// One of the eight parallel VEGAS raw-data streams recorded per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bank {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl Bank {
    /// Fixed invocation order.
    pub const ALL: [Self; 8] = [
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::G,
        Self::H,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
            Self::F => "F",
            Self::G => "G",
            Self::H => "H",
        }
    }
}

impl fmt::Display for Bank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ArtifactKind
// ---------------------------------------------------------------------------

/// The two files the calibration tool writes per cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Fits,
    Index,
}

impl ArtifactKind {
    /// Filing order: the index first, the data file last.
    pub const ALL: [Self; 2] = [Self::Index, Self::Fits];

    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Fits => "fits",
            Self::Index => "index",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
