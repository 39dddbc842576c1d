//! The static spectral window table.
//!
//! Every window code maps 1:1 to the molecular line it was tuned to. This table
//! is the single source of truth for both the reduction driver and the
//! misplaced-file rescue; any code outside it is rejected with
//! [`CoreError::UnknownWindow`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::CoreError;

/// One spectral window of the VEGAS setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpectralWindow {
    code: &'static str,
    line: &'static str,
}

/// Default reduction order.
const WINDOW_TABLE: [SpectralWindow; 13] = [
    SpectralWindow::new("8", "NH3_11"),
    SpectralWindow::new("9", "NH3_22"),
    SpectralWindow::new("10", "NH3_33"),
    SpectralWindow::new("12", "NH3_44"),
    SpectralWindow::new("13", "NH3_55"),
    SpectralWindow::new("6", "CH3OH_10_9"),
    SpectralWindow::new("2", "CH3OH_12_11"),
    SpectralWindow::new("5", "C2S_2_1"),
    SpectralWindow::new("3", "HNCO_1_0"),
    SpectralWindow::new("4", "H2O"),
    SpectralWindow::new("11", "HC5N_9_8"),
    SpectralWindow::new("7", "HC5N_8_7"),
    SpectralWindow::new("1", "HC7N_19_18"),
];

impl SpectralWindow {
    const fn new(code: &'static str, line: &'static str) -> Self {
        Self { code, line }
    }

    /// All known windows, in default reduction order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &WINDOW_TABLE
    }

    /// Look up a window by its code.
    ///
    /// Matching is exact on the trimmed code string: `"08"` is not `"8"`.
    pub fn from_code(code: &str) -> Result<Self, CoreError> {
        let code = code.trim();
        WINDOW_TABLE
            .iter()
            .copied()
            .find(|window| window.code == code)
            .ok_or_else(|| CoreError::UnknownWindow {
                code: code.to_string(),
            })
    }

    /// Resolve a list of codes, failing on the first unknown one.
    pub fn parse_list<S: AsRef<str>>(codes: &[S]) -> Result<Vec<Self>, CoreError> {
        codes.iter().map(|c| Self::from_code(c.as_ref())).collect()
    }

    #[must_use]
    pub const fn code(self) -> &'static str {
        self.code
    }

    /// Line/species name used in output directory names (e.g. `NH3_11`).
    #[must_use]
    pub const fn line_name(self) -> &'static str {
        self.line
    }
}

impl fmt::Display for SpectralWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

impl FromStr for SpectralWindow {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
    }
}

impl Serialize for SpectralWindow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code)
    }
}

impl<'de> Deserialize<'de> for SpectralWindow {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Self::from_code(&code).map_err(serde::de::Error::custom)
    }
}
