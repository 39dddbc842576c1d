//! Per-beam gain coefficients passed to the calibration tool.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::CoreError;

const UNITY: &str = "1,1,1,1,1,1,1,1,1,1,1,1,1,1";

/// Beam-scaling coefficients, one per feed × polarization (7 × 2).
///
/// The log text is kept verbatim and handed to the calibration tool as is;
/// the parsed values only validate it.
#[derive(Debug, Clone, PartialEq)]
pub struct Gains {
    values: Vec<f64>,
    text: String,
}

impl Gains {
    pub const LEN: usize = 14;

    /// All coefficients 1.0.
    #[must_use]
    pub fn unity() -> Self {
        Self {
            values: vec![1.0; Self::LEN],
            text: UNITY.to_string(),
        }
    }

    /// Parse a log cell; the missing-value sentinel (`--`) or an empty cell
    /// yields [`Gains::unity`].
    pub fn from_log_cell(cell: &str) -> Result<Self, CoreError> {
        match cell.trim() {
            "" | "--" => Ok(Self::unity()),
            other => other.parse(),
        }
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The coefficients as written in the log.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl Default for Gains {
    fn default() -> Self {
        Self::unity()
    }
}

impl FromStr for Gains {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let values = text
            .split(',')
            .map(|v| {
                v.trim().parse::<f64>().map_err(|e| {
                    CoreError::Validation(format!("invalid gain coefficient '{}': {e}", v.trim()))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if values.len() != Self::LEN {
            return Err(CoreError::Validation(format!(
                "expected {} gain coefficients, found {}",
                Self::LEN,
                values.len()
            )));
        }
        Ok(Self {
            values,
            text: text.to_string(),
        })
    }
}

/// The `--beam-scaling` argument form.
impl fmt::Display for Gains {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for Gains {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Gains {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
