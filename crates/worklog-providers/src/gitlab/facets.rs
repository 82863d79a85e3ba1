use chrono::NaiveDate;
use worklog_types::{Category, DateRange};

/// Issues or merge requests; selects the list endpoint and the notes path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ItemKind {
    Issue,
    MergeRequest,
}

impl ItemKind {
    fn collection(&self) -> &'static str {
        match self {
            ItemKind::Issue => "issues",
            ItemKind::MergeRequest => "merge_requests",
        }
    }

    pub fn category(&self) -> Category {
        match self {
            ItemKind::Issue => Category::Issues,
            ItemKind::MergeRequest => Category::MergeRequests,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("/{}", self.collection())
    }

    pub fn notes_endpoint(&self, project_id: u64, iid: u64) -> String {
        format!("/projects/{}/{}/{}/notes", project_id, self.collection(), iid)
    }
}

/// Which user-id filter a facet uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Role {
    Author,
    Assignee,
    Reviewer,
}

impl Role {
    fn param(&self) -> &'static str {
        match self {
            Role::Author => "author_id",
            Role::Assignee => "assignee_id",
            Role::Reviewer => "reviewer_id",
        }
    }
}

/// Timestamp pair the server-side window applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WindowField {
    Created,
    Updated,
}

impl WindowField {
    fn params(&self) -> (&'static str, &'static str) {
        match self {
            WindowField::Created => ("created_after", "created_before"),
            WindowField::Updated => ("updated_after", "updated_before"),
        }
    }
}

/// One `/issues` or `/merge_requests` query dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct GitLabFacet {
    pub name: &'static str,
    pub role: Role,
    pub window: WindowField,
    pub state: Option<&'static str>,
    /// Record timestamp that must itself fall inside the window
    pub settled_field: Option<&'static str>,
}

pub(crate) const ISSUE_FACETS: [GitLabFacet; 3] = [
    GitLabFacet {
        name: "issues created",
        role: Role::Author,
        window: WindowField::Created,
        state: None,
        settled_field: None,
    },
    GitLabFacet {
        name: "issues assigned",
        role: Role::Assignee,
        window: WindowField::Updated,
        state: None,
        settled_field: None,
    },
    GitLabFacet {
        name: "issues closed",
        role: Role::Assignee,
        window: WindowField::Updated,
        state: Some("closed"),
        settled_field: Some("closed_at"),
    },
];

pub(crate) const MERGE_REQUEST_FACETS: [GitLabFacet; 4] = [
    GitLabFacet {
        name: "merge requests created",
        role: Role::Author,
        window: WindowField::Created,
        state: None,
        settled_field: None,
    },
    GitLabFacet {
        name: "merge requests assigned",
        role: Role::Assignee,
        window: WindowField::Updated,
        state: None,
        settled_field: None,
    },
    GitLabFacet {
        name: "merge requests reviewed",
        role: Role::Reviewer,
        window: WindowField::Updated,
        state: None,
        settled_field: None,
    },
    GitLabFacet {
        name: "merge requests merged",
        role: Role::Assignee,
        window: WindowField::Updated,
        state: Some("merged"),
        settled_field: Some("merged_at"),
    },
];

fn start_of_day(date: NaiveDate) -> String {
    format!("{}T00:00:00Z", date.format("%Y-%m-%d"))
}

fn end_of_day(date: NaiveDate) -> String {
    format!("{}T23:59:59Z", date.format("%Y-%m-%d"))
}

impl GitLabFacet {
    pub fn params(&self, user_id: u64, range: &DateRange) -> Vec<(String, String)> {
        let (after, before) = self.window.params();
        let mut params = vec![
            (self.role.param().to_string(), user_id.to_string()),
            (after.to_string(), start_of_day(range.since())),
            (before.to_string(), end_of_day(range.until())),
            ("scope".to_string(), "all".to_string()),
        ];
        if let Some(state) = self.state {
            params.push(("state".to_string(), state.to_string()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn june() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 6, 30).unwrap(),
        )
        .unwrap()
    }

    fn lookup<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_created_facet_uses_created_window() {
        let params = ISSUE_FACETS[0].params(7, &june());
        assert_eq!(lookup(&params, "author_id"), Some("7"));
        assert_eq!(lookup(&params, "created_after"), Some("2023-06-01T00:00:00Z"));
        assert_eq!(lookup(&params, "created_before"), Some("2023-06-30T23:59:59Z"));
        assert_eq!(lookup(&params, "scope"), Some("all"));
        assert_eq!(lookup(&params, "state"), None);
    }

    #[test]
    fn test_closed_and_merged_facets_filter_state() {
        let closed = ISSUE_FACETS[2];
        assert_eq!(lookup(&closed.params(7, &june()), "state"), Some("closed"));
        assert_eq!(closed.settled_field, Some("closed_at"));

        let merged = MERGE_REQUEST_FACETS[3];
        let params = merged.params(7, &june());
        assert_eq!(lookup(&params, "state"), Some("merged"));
        assert_eq!(lookup(&params, "assignee_id"), Some("7"));
        assert_eq!(lookup(&params, "updated_after"), Some("2023-06-01T00:00:00Z"));
        assert_eq!(merged.settled_field, Some("merged_at"));
    }

    #[test]
    fn test_every_facet_scopes_to_all_projects() {
        for facet in ISSUE_FACETS.iter().chain(MERGE_REQUEST_FACETS.iter()) {
            assert_eq!(lookup(&facet.params(1, &june()), "scope"), Some("all"), "{}", facet.name);
        }
    }

    #[test]
    fn test_notes_endpoint() {
        assert_eq!(
            ItemKind::MergeRequest.notes_endpoint(12, 3),
            "/projects/12/merge_requests/3/notes"
        );
        assert_eq!(ItemKind::Issue.endpoint(), "/issues");
    }
}
