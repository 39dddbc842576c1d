//! Observation date parsing and inclusive date windows.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::error::LogError;

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Parse a log date. Date-only values resolve to midnight.
pub fn parse_log_date(value: &str) -> Result<NaiveDateTime, LogError> {
    let value = value.trim();
    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(parsed);
        }
    }
    // `%Y-%m-%d` accepts single-digit days, e.g. `2015-01-1`.
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|_| LogError::InvalidDate(value.to_string()))
}

/// Inclusive `[start, end]` interval of calendar timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateWindow {
    #[must_use]
    pub const fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Both ends at midnight of the given days.
    #[must_use]
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Self {
        Self::new(start.and_time(NaiveTime::MIN), end.and_time(NaiveTime::MIN))
    }

    pub fn parse(start: &str, end: &str) -> Result<Self, LogError> {
        Ok(Self::new(parse_log_date(start)?, parse_log_date(end)?))
    }

    /// A window containing exactly one instant.
    #[must_use]
    pub const fn at(instant: NaiveDateTime) -> Self {
        Self::new(instant, instant)
    }

    #[must_use]
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant <= self.end
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("2016-10-27")]
    #[case("2015-01-1")]
    #[case("2016-10-27 04:30:00")]
    #[case("2016-10-27T04:30:00")]
    #[case("2016-10-27 04:30:00.250")]
    fn accepts_log_formats(#[case] value: &str) {
        assert!(parse_log_date(value).is_ok(), "{value}");
    }

    #[rstest]
    #[case("27/10/2016")]
    #[case("--")]
    #[case("")]
    fn rejects_other_formats(#[case] value: &str) {
        assert!(matches!(
            parse_log_date(value),
            Err(LogError::InvalidDate(_))
        ));
    }

    #[test]
    fn window_is_inclusive_at_both_ends() {
        let window = DateWindow::parse("2016-01-01", "2016-12-31").unwrap();
        assert!(window.contains(parse_log_date("2016-01-01").unwrap()));
        assert!(window.contains(parse_log_date("2016-12-31").unwrap()));
        assert!(!window.contains(parse_log_date("2015-12-31").unwrap()));
        assert!(!window.contains(parse_log_date("2017-01-01").unwrap()));
    }

    #[test]
    fn date_only_end_excludes_later_same_day_times() {
        let window = DateWindow::parse("2016-01-01", "2016-12-31").unwrap();
        assert!(!window.contains(parse_log_date("2016-12-31 05:00:00").unwrap()));
    }
}
