use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::{Error, Result};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const USER_AGENT: &str = concat!("worklog/", env!("CARGO_PKG_VERSION"));

/// Authenticated GET request
#[derive(Clone, PartialEq, Eq)]
pub struct Request {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
}

impl Request {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
            query: Vec::new(),
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Last value set for a query parameter
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

// Header values carry credentials
impl std::fmt::Debug for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let headers: Vec<&str> = self.headers.iter().map(|(name, _)| name.as_str()).collect();
        f.debug_struct("Request")
            .field("url", &self.url)
            .field("headers", &headers)
            .field("query", &self.query)
            .finish()
    }
}

/// Failure of a single HTTP round trip
#[derive(Debug, Clone, Error)]
pub enum HttpError {
    /// Connection, TLS or timeout failure
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// Non-2xx response
    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: u16,
        body: String,
        retry_after: Option<String>,
    },

    /// Body was not valid JSON
    #[error("invalid JSON from {url}: {message}")]
    Decode { url: String, message: String },
}

impl HttpError {
    pub fn status(&self) -> Option<u16> {
        match self {
            HttpError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Transport seam used by every source adapter
pub trait HttpClient: Send + Sync {
    /// Perform a GET and decode the body as JSON
    fn get_json(&self, request: &Request) -> std::result::Result<Value, HttpError>;
}

/// Production transport backed by a blocking reqwest client
pub struct ReqwestHttpClient {
    client: reqwest::blocking::Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|error| Error::Client(error.to_string()))?;
        Ok(Self { client })
    }
}

impl HttpClient for ReqwestHttpClient {
    fn get_json(&self, request: &Request) -> std::result::Result<Value, HttpError> {
        let mut builder = self.client.get(&request.url).query(&request.query);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().map_err(|error| HttpError::Transport {
            url: request.url.clone(),
            message: error.to_string(),
        })?;

        let status = response.status();
        tracing::debug!(url = %request.url, status = status.as_u16(), "Response received");

        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string);
            let body = response.text().unwrap_or_default();
            return Err(HttpError::Status {
                url: request.url.clone(),
                status: status.as_u16(),
                body,
                retry_after,
            });
        }

        let text = response.text().map_err(|error| HttpError::Transport {
            url: request.url.clone(),
            message: error.to_string(),
        })?;

        serde_json::from_str(&text).map_err(|error| HttpError::Decode {
            url: request.url.clone(),
            message: error.to_string(),
        })
    }
}
