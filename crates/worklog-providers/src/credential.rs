use secrecy::{ExposeSecret, SecretString};
use std::path::Path;

use crate::{Error, Result};

/// API token resolved once at configuration time
#[derive(Debug)]
pub struct Credential {
    token: SecretString,
}

impl Credential {
    /// Resolve a configured `token` value.
    ///
    /// When the value names an existing file, the file's trimmed contents are
    /// the token; otherwise the value itself is.
    pub fn resolve(value: &str) -> Result<Self> {
        let path = Path::new(value);
        if !path.exists() {
            tracing::debug!("Using token value directly from configuration");
            return Ok(Self::literal(value));
        }

        tracing::debug!(path = %path.display(), "Reading token from file");
        let contents = std::fs::read_to_string(path).map_err(|error| Error::Credential {
            path: path.to_path_buf(),
            error,
        })?;

        let token = contents.trim();
        if token.is_empty() {
            return Err(Error::InvalidValue {
                field: "token".to_string(),
                reason: format!("token file {} is empty", path.display()),
            });
        }

        Ok(Self::literal(token))
    }

    pub fn literal(token: &str) -> Self {
        Self {
            token: SecretString::from(token.to_string()),
        }
    }

    pub fn expose(&self) -> &str {
        self.token.expose_secret()
    }
}
