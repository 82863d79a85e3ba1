use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Output format for every date field in a report
pub const REPORT_DATE_FORMAT: &str = "%d-%m-%Y %H:%M";

/// Input format for command-line dates
pub const CLI_DATE_FORMAT: &str = "%d-%m-%Y";

/// Inclusive date window `[since, until]` for one report run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    since: NaiveDate,
    until: NaiveDate,
}

impl DateRange {
    pub fn new(since: NaiveDate, until: NaiveDate) -> Result<Self> {
        if since > until {
            return Err(Error::InvalidRange { since, until });
        }
        Ok(Self { since, until })
    }

    /// Parse a `DD-MM-YYYY` string as used on the command line
    pub fn parse_date(value: &str) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(value.trim(), CLI_DATE_FORMAT).map_err(|_| Error::InvalidDate {
            value: value.to_string(),
        })
    }

    pub fn since(&self) -> NaiveDate {
        self.since
    }

    pub fn until(&self) -> NaiveDate {
        self.until
    }

    /// First day after the window; used where a service only offers exclusive upper bounds
    pub fn until_exclusive(&self) -> NaiveDate {
        self.until.succ_opt().unwrap_or(self.until)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.since <= date && date <= self.until
    }

    /// Check whether a raw timestamp falls inside the window.
    ///
    /// The comparison uses the date component in the timestamp's own offset.
    /// Unparseable timestamps never match.
    pub fn contains_timestamp(&self, raw: &str) -> bool {
        parse_timestamp(raw)
            .map(|dt| self.contains(dt.date_naive()))
            .unwrap_or(false)
    }
}

/// Parse an ISO-8601 timestamp as emitted by GitHub, GitLab or Jira.
///
/// Accepts RFC 3339 (`Z` or `+00:00`), compact offsets (`+0000`), naive
/// datetimes (read as UTC) and bare dates (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"] {
        if let Ok(dt) = DateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }

    for format in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc().fixed_offset());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
}

/// Reformat a source timestamp as `DD-MM-YYYY HH:MM`.
///
/// Absent or empty values become `None`. Values that cannot be parsed are
/// logged and returned unchanged.
pub fn format_timestamp(raw: Option<&str>) -> Option<String> {
    let raw = raw?;
    if raw.is_empty() {
        return None;
    }

    match parse_timestamp(raw) {
        Some(dt) => Some(dt.format(REPORT_DATE_FORMAT).to_string()),
        None => {
            tracing::warn!(value = raw, "Error parsing date, keeping raw value");
            Some(raw.to_string())
        }
    }
}
