//! Scripted HTTP transport for adapter tests.
//!
//! Routes match on the URL path (or the full URL) plus any query parameters
//! the route names. The most specific matching route wins; requests with no
//! matching route get an HTTP 404.

use serde_json::Value;
use std::sync::{Arc, Mutex};
use worklog_providers::{HttpClient, HttpError, Request};

struct Route {
    path: String,
    query: Vec<(String, String)>,
    response: Result<Value, HttpError>,
}

impl Route {
    fn matches(&self, request: &Request) -> bool {
        let path_matches = request.url == self.path || url_path(&request.url) == self.path;
        path_matches
            && self
                .query
                .iter()
                .all(|(key, value)| request.query_value(key) == Some(value.as_str()))
    }
}

/// Path portion of an absolute URL (`https://host/a/b` → `/a/b`)
fn url_path(url: &str) -> &str {
    let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    without_scheme
        .find('/')
        .map_or("/", |index| &without_scheme[index..])
}

/// In-memory `HttpClient` with canned responses.
///
/// # Example
/// ```no_run
/// use serde_json::json;
/// use worklog_testing::MockHttpClient;
///
/// let http = MockHttpClient::new()
///     .on_get("/api/v4/users", json!([{"id": 7, "username": "bob"}]))
///     .fail("/api/v4/projects/12", 500)
///     .into_shared();
/// ```
#[derive(Default)]
pub struct MockHttpClient {
    routes: Vec<Route>,
    requests: Mutex<Vec<Request>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond to every GET of `path` with `body`
    pub fn on_get(self, path: &str, body: Value) -> Self {
        self.on_get_with(path, &[], body)
    }

    /// Respond to GETs of `path` carrying all of `query` with `body`
    pub fn on_get_with(mut self, path: &str, query: &[(&str, &str)], body: Value) -> Self {
        self.routes.push(Route {
            path: path.to_string(),
            query: owned(query),
            response: Ok(body),
        });
        self
    }

    /// Respond to every GET of `path` with an HTTP error status
    pub fn fail(self, path: &str, status: u16) -> Self {
        self.fail_with(path, &[], status, "", None)
    }

    pub fn fail_with(
        mut self,
        path: &str,
        query: &[(&str, &str)],
        status: u16,
        body: &str,
        retry_after: Option<&str>,
    ) -> Self {
        self.routes.push(Route {
            path: path.to_string(),
            query: owned(query),
            response: Err(HttpError::Status {
                url: path.to_string(),
                status,
                body: body.to_string(),
                retry_after: retry_after.map(str::to_string),
            }),
        });
        self
    }

    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Every request received, in order
    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn request_count(&self) -> usize {
        self.requests().len()
    }

    /// Number of requests whose URL path is `path`
    pub fn requests_to(&self, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|request| request.url == path || url_path(&request.url) == path)
            .count()
    }
}

fn owned(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

impl HttpClient for MockHttpClient {
    fn get_json(&self, request: &Request) -> Result<Value, HttpError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        self.routes
            .iter()
            .enumerate()
            .filter(|(_, route)| route.matches(request))
            .max_by_key(|(index, route)| (route.query.len(), std::cmp::Reverse(*index)))
            .map(|(_, route)| route.response.clone())
            .unwrap_or_else(|| {
                Err(HttpError::Status {
                    url: request.url.clone(),
                    status: 404,
                    body: "no route".to_string(),
                    retry_after: None,
                })
            })
    }
}
