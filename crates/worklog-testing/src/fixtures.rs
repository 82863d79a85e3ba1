//! JSON builders shaped like real GitHub, GitLab and Jira responses.

use serde_json::{Value, json};

pub mod github {
    use super::*;

    pub const API: &str = "https://api.github.com";

    /// Search item for an issue in `acme/widgets`
    pub fn issue(id: u64, number: u64, author: &str) -> Value {
        json!({
            "id": id,
            "number": number,
            "title": format!("Issue {}", number),
            "state": "open",
            "user": {"login": author},
            "created_at": "2023-06-02T09:15:00Z",
            "updated_at": "2023-06-05T11:00:00Z",
            "closed_at": null,
            "body": format!("Body of issue {}", number),
            "html_url": format!("https://github.com/acme/widgets/issues/{}", number),
            "repository_url": format!("{}/repos/acme/widgets", API),
            "comments_url": comments_url(number),
        })
    }

    /// Search item for a pull request in `acme/widgets`
    pub fn pull_request(id: u64, number: u64, author: &str) -> Value {
        let mut item = issue(id, number, author);
        item["html_url"] = json!(format!("https://github.com/acme/widgets/pull/{}", number));
        item["pull_request"] = json!({
            "url": pull_url(number),
            "merged_at": null,
        });
        item
    }

    pub fn comments_url(number: u64) -> String {
        format!("{}/repos/acme/widgets/issues/{}/comments", API, number)
    }

    pub fn pull_url(number: u64) -> String {
        format!("{}/repos/acme/widgets/pulls/{}", API, number)
    }

    pub fn comment(login: &str, created_at: &str, body: &str) -> Value {
        json!({"user": {"login": login}, "created_at": created_at, "body": body})
    }

    pub fn commit(sha: &str, message: &str) -> Value {
        json!({
            "sha": sha,
            "html_url": format!("https://github.com/acme/widgets/commit/{}", sha),
            "commit": {
                "message": message,
                "author": {"name": "Alice", "email": "alice@example.com", "date": "2023-06-03T14:20:00.000+02:00"}
            },
            "repository": {"full_name": "acme/widgets"}
        })
    }

    /// `/search/*` envelope
    pub fn search(items: Vec<Value>) -> Value {
        json!({"total_count": items.len(), "incomplete_results": false, "items": items})
    }
}

pub mod gitlab {
    use super::*;

    pub const API_PREFIX: &str = "/api/v4";

    pub fn user(id: u64, username: &str) -> Value {
        json!({"id": id, "username": username, "name": username})
    }

    pub fn issue(id: u64, iid: u64, project_id: u64, author: &str) -> Value {
        json!({
            "id": id,
            "iid": iid,
            "project_id": project_id,
            "title": format!("Issue {}", iid),
            "state": "opened",
            "author": {"username": author},
            "created_at": "2023-06-02T09:15:00.000Z",
            "updated_at": "2023-06-05T11:00:00.000Z",
            "closed_at": null,
            "description": format!("Description of {}", iid),
            "web_url": format!("https://gitlab.com/acme/api/-/issues/{}", iid),
        })
    }

    pub fn merge_request(id: u64, iid: u64, project_id: u64, merged_at: Option<&str>) -> Value {
        json!({
            "id": id,
            "iid": iid,
            "project_id": project_id,
            "title": format!("MR {}", iid),
            "state": if merged_at.is_some() { "merged" } else { "opened" },
            "author": {"username": "bob"},
            "created_at": "2023-06-01T08:00:00.000Z",
            "updated_at": "2023-06-04T12:00:00.000Z",
            "closed_at": null,
            "merged_at": merged_at,
            "description": "",
            "web_url": format!("https://gitlab.com/acme/api/-/merge_requests/{}", iid),
        })
    }

    pub fn project(path_with_namespace: &str) -> Value {
        json!({"path_with_namespace": path_with_namespace})
    }

    pub fn note(username: &str, created_at: &str, body: &str, system: bool) -> Value {
        json!({
            "author": {"username": username},
            "created_at": created_at,
            "body": body,
            "system": system,
        })
    }

    /// Full request path for an API endpoint
    pub fn path(endpoint: &str) -> String {
        format!("{}{}", API_PREFIX, endpoint)
    }
}

pub mod jira {
    use super::*;

    pub fn issue(id: &str, key: &str, status: &str) -> Value {
        let project = key.split('-').next().unwrap_or(key);
        json!({
            "id": id,
            "key": key,
            "fields": {
                "summary": format!("Summary of {}", key),
                "status": {"name": status},
                "reporter": {"name": "dave", "displayName": "Dave D"},
                "created": "2023-06-02T09:00:00.000+0200",
                "updated": "2023-06-10T16:30:00.000+0200",
                "resolutiondate": null,
                "project": {"key": project},
                "description": null,
            }
        })
    }

    pub fn comment(name: &str, created: &str, body: &str) -> Value {
        json!({"author": {"name": name, "displayName": name}, "created": created, "body": body})
    }

    /// `/rest/api/2/search` envelope
    pub fn search(issues: Vec<Value>) -> Value {
        json!({"startAt": 0, "maxResults": 100, "total": issues.len(), "issues": issues})
    }

    /// `/rest/api/2/issue/{key}/comment` envelope
    pub fn comments(comments: Vec<Value>) -> Value {
        json!({"startAt": 0, "maxResults": 100, "total": comments.len(), "comments": comments})
    }
}
