use crate::http::HttpError;

/// How a service reports that a client is being throttled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitPolicy {
    /// HTTP 403 whose body mentions "rate limit"
    GitHub,
    /// HTTP 429
    GitLab,
    /// HTTP 429 carrying a `Retry-After` header
    Jira,
}

/// A failed response classified as throttling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitSignal {
    pub status: u16,
    pub retry_after: Option<String>,
}

impl RateLimitPolicy {
    /// Returns a signal when `error` is this service's rate-limit response.
    ///
    /// Anything else, including transport and decode failures, is an ordinary
    /// request failure.
    pub fn classify(&self, error: &HttpError) -> Option<RateLimitSignal> {
        let HttpError::Status {
            status,
            body,
            retry_after,
            ..
        } = error
        else {
            return None;
        };

        let limited = match self {
            RateLimitPolicy::GitHub => {
                *status == 403 && body.to_ascii_lowercase().contains("rate limit")
            }
            RateLimitPolicy::GitLab => *status == 429,
            RateLimitPolicy::Jira => *status == 429 && retry_after.is_some(),
        };

        limited.then(|| RateLimitSignal {
            status: *status,
            retry_after: retry_after.clone(),
        })
    }
}
