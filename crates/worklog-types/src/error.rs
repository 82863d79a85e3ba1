use chrono::NaiveDate;
use thiserror::Error;

/// Result type for worklog-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the types layer
#[derive(Debug, Error)]
pub enum Error {
    /// Date window whose start lies after its end
    #[error("invalid date range: since {since} is after until {until}")]
    InvalidRange { since: NaiveDate, until: NaiveDate },

    /// Date string not in DD-MM-YYYY form
    #[error("invalid date '{value}': expected DD-MM-YYYY")]
    InvalidDate { value: String },
}
