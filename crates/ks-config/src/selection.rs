//! Default log selection for batch runs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

fn default_release() -> String {
    String::from("all")
}

fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2015, 1, 1).unwrap_or(NaiveDate::MIN)
}

fn default_end_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 12, 31).unwrap_or(NaiveDate::MAX)
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SelectionConfig {
    /// Name of the release-flag column rows must be `TRUE` in.
    #[serde(default = "default_release")]
    pub release: String,

    #[serde(default = "default_start_date")]
    pub start_date: NaiveDate,

    #[serde(default = "default_end_date")]
    pub end_date: NaiveDate,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            release: default_release(),
            start_date: default_start_date(),
            end_date: default_end_date(),
        }
    }
}
