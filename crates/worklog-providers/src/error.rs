use std::path::PathBuf;
use thiserror::Error;

/// Result type for worklog-providers operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that keep a source from being configured
#[derive(Debug, Error)]
pub enum Error {
    /// Required configuration keys are absent or empty
    #[error("{kind} configuration missing required parameters: {}", .fields.join(", "))]
    MissingFields {
        kind: &'static str,
        fields: Vec<String>,
    },

    /// A configuration value is present but unusable
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    /// Token file exists but could not be read
    #[error("error reading token file {}: {error}", .path.display())]
    Credential {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    /// Section type has no registered adapter
    #[error("no source registered for type '{0}'")]
    UnknownSource(String),

    /// Section has no `type` key
    #[error("missing 'type' in section")]
    MissingType,

    /// HTTP client could not be constructed
    #[error("HTTP client initialization failed: {0}")]
    Client(String),
}
