use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

use crate::credential::Credential;
use crate::http::{HttpClient, HttpError, Request};
use crate::paginate::{self, PAGE_SIZE, PageStyle};
use crate::rate_limit::RateLimitPolicy;

/// How the credential is presented to the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    /// `Authorization: token <t>`
    GitHubToken,
    /// `PRIVATE-TOKEN: <t>`
    PrivateToken,
    /// `Authorization: Bearer <t>`
    Bearer,
}

impl AuthScheme {
    fn header(&self, token: &str) -> (&'static str, String) {
        match self {
            AuthScheme::GitHubToken => ("Authorization", format!("token {}", token)),
            AuthScheme::PrivateToken => ("PRIVATE-TOKEN", token.to_string()),
            AuthScheme::Bearer => ("Authorization", format!("Bearer {}", token)),
        }
    }
}

/// Authenticated, best-effort access to one service's REST API.
///
/// Every failure is logged and turned into "no data" for that call.
pub struct ApiClient {
    service: &'static str,
    base_url: String,
    credential: Credential,
    auth: AuthScheme,
    accept: Option<&'static str>,
    rate_limit: RateLimitPolicy,
    http: Arc<dyn HttpClient>,
}

impl ApiClient {
    pub fn new(
        service: &'static str,
        base_url: impl Into<String>,
        credential: Credential,
        auth: AuthScheme,
        rate_limit: RateLimitPolicy,
        http: Arc<dyn HttpClient>,
    ) -> Self {
        Self {
            service,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credential,
            auth,
            accept: None,
            rate_limit,
            http,
        }
    }

    pub fn with_accept(mut self, accept: &'static str) -> Self {
        self.accept = Some(accept);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for `endpoint`; absolute URLs returned by the API pass through
    pub fn url(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint.to_string()
        } else {
            format!("{}{}", self.base_url, endpoint)
        }
    }

    fn request(&self, endpoint: &str, params: &[(String, String)]) -> Request {
        let (name, value) = self.auth.header(self.credential.expose());
        let mut request = Request::new(self.url(endpoint)).header(name, value);
        if let Some(accept) = self.accept {
            request = request.header("Accept", accept);
        }
        for (key, value) in params {
            request = request.query(key.as_str(), value.as_str());
        }
        request
    }

    /// Single GET; `None` on any failure
    pub fn get(&self, endpoint: &str, params: &[(String, String)]) -> Option<Value> {
        let request = self.request(endpoint, params);
        tracing::debug!(url = %request.url, params = ?params, "Making request");
        self.send(&request)
    }

    fn send(&self, request: &Request) -> Option<Value> {
        match self.http.get_json(request) {
            Ok(body) => Some(body),
            Err(error) => {
                self.report(&error);
                None
            }
        }
    }

    fn report(&self, error: &HttpError) {
        if let Some(signal) = self.rate_limit.classify(error) {
            tracing::warn!(
                service = self.service,
                status = signal.status,
                retry_after = signal.retry_after.as_deref(),
                "API rate limit exceeded"
            );
        }
        tracing::error!(service = self.service, %error, "Error making request");
    }

    /// GET every page of `endpoint`, concatenating the items
    pub fn get_paginated(
        &self,
        endpoint: &str,
        params: &[(String, String)],
        style: PageStyle,
    ) -> Vec<Value> {
        paginate::paginate(PAGE_SIZE, |index| {
            let request = self
                .request(endpoint, params)
                .query(style.size_param, PAGE_SIZE.to_string())
                .query(
                    style.cursor_param,
                    style.cursor_value(index, PAGE_SIZE).to_string(),
                );
            tracing::debug!(url = %request.url, page = index + 1, "Fetching page");
            self.send(&request).map(|body| style.page(body))
        })
    }
}

/// Deserialize a response fragment, logging and skipping it when malformed
pub(crate) fn decode<T: DeserializeOwned>(value: Value, what: &str) -> Option<T> {
    match serde_json::from_value(value) {
        Ok(decoded) => Some(decoded),
        Err(error) => {
            tracing::warn!(%error, "Skipping malformed {}", what);
            None
        }
    }
}

/// Build an owned parameter list from string pairs
pub fn params<const N: usize>(pairs: [(&str, String); N]) -> Vec<(String, String)> {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    /// Serves canned bodies in order and records requests
    struct Scripted {
        responses: Mutex<Vec<std::result::Result<Value, HttpError>>>,
        seen: Mutex<Vec<Request>>,
    }

    impl Scripted {
        fn new(responses: Vec<std::result::Result<Value, HttpError>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into_iter().rev().collect()),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    impl HttpClient for Scripted {
        fn get_json(&self, request: &Request) -> std::result::Result<Value, HttpError> {
            self.seen.lock().unwrap().push(request.clone());
            self.responses
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Ok(json!([])))
        }
    }

    fn client(http: Arc<Scripted>, auth: AuthScheme) -> ApiClient {
        ApiClient::new(
            "test",
            "https://api.example.test/",
            Credential::literal("t0k"),
            auth,
            RateLimitPolicy::GitLab,
            http,
        )
    }

    #[test]
    fn test_auth_headers_per_scheme() {
        for (auth, name, value) in [
            (AuthScheme::GitHubToken, "Authorization", "token t0k"),
            (AuthScheme::PrivateToken, "PRIVATE-TOKEN", "t0k"),
            (AuthScheme::Bearer, "Authorization", "Bearer t0k"),
        ] {
            let http = Scripted::new(vec![Ok(json!({}))]);
            client(http.clone(), auth).get("/user", &[]);
            let seen = http.seen.lock().unwrap();
            assert_eq!(seen[0].header_value(name), Some(value));
        }
    }

    #[test]
    fn test_url_joins_base_and_passes_absolute_through() {
        let api = client(Scripted::new(Vec::new()), AuthScheme::Bearer);
        assert_eq!(api.url("/issues"), "https://api.example.test/issues");
        assert_eq!(
            api.url("https://other.test/comments"),
            "https://other.test/comments"
        );
    }

    #[test]
    fn test_failed_get_is_none() {
        let http = Scripted::new(vec![Err(HttpError::Status {
            url: "https://api.example.test/users".to_string(),
            status: 429,
            body: String::new(),
            retry_after: None,
        })]);
        assert!(client(http, AuthScheme::PrivateToken).get("/users", &[]).is_none());
    }

    #[test]
    fn test_paginated_sets_cursor_and_size() {
        let page: Vec<Value> = (0..100).map(|n| json!({"id": n})).collect();
        let http = Scripted::new(vec![Ok(Value::Array(page)), Ok(json!([{"id": 100}]))]);
        let api = client(http.clone(), AuthScheme::PrivateToken);

        let items = api.get_paginated(
            "/issues",
            &params([("scope", "all".to_string())]),
            PageStyle::ARRAY,
        );

        assert_eq!(items.len(), 101);
        let seen = http.seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].query_value("page"), Some("1"));
        assert_eq!(seen[1].query_value("page"), Some("2"));
        assert_eq!(seen[1].query_value("per_page"), Some("100"));
        assert_eq!(seen[1].query_value("scope"), Some("all"));
    }
}
