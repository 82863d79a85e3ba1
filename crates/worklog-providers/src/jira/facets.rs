use chrono::NaiveDate;
use worklog_types::DateRange;

/// Statuses counted as "finished" when no `terminal_statuses` override is configured
pub const DEFAULT_TERMINAL_STATUSES: [&str; 3] = ["Done", "Closed", "Resolved"];

/// Fields requested from the search endpoint
pub(crate) const SEARCH_FIELDS: &str =
    "summary,status,reporter,created,updated,resolutiondate,project,description";

/// Parse a comma-separated status list; blank input yields the defaults
pub(crate) fn terminal_statuses(raw: Option<&str>) -> Vec<String> {
    let statuses: Vec<String> = raw
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|status| !status.is_empty())
        .map(str::to_string)
        .collect();

    if statuses.is_empty() {
        DEFAULT_TERMINAL_STATUSES.iter().map(|s| s.to_string()).collect()
    } else {
        statuses
    }
}

fn jql_date(date: NaiveDate) -> String {
    date.format("%Y/%m/%d").to_string()
}

/// Escape a value for use inside a double-quoted JQL string
fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// One JQL query dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum JiraFacet {
    /// Moved to a terminal status by the user during the window
    Transitioned,
    /// Commented on by the user during the window; re-checked against the comments
    Commented,
}

pub(crate) const ISSUE_FACETS: [JiraFacet; 2] = [JiraFacet::Transitioned, JiraFacet::Commented];

impl JiraFacet {
    pub fn name(&self) -> &'static str {
        match self {
            JiraFacet::Transitioned => "issues transitioned",
            JiraFacet::Commented => "issues commented",
        }
    }

    /// JQL for this facet; the upper bound is the exclusive day after `until`
    pub fn jql(&self, username: &str, range: &DateRange, statuses: &[String]) -> String {
        let since = jql_date(range.since());
        let before = jql_date(range.until_exclusive());
        match self {
            JiraFacet::Transitioned => {
                let statuses = statuses
                    .iter()
                    .map(|status| format!("\"{}\"", escape(status)))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!(
                    "status CHANGED TO ({}) BY \"{}\" DURING (\"{}\", \"{}\")",
                    statuses,
                    escape(username),
                    since,
                    before
                )
            }
            JiraFacet::Commented => format!(
                "issueFunction in commented(\"by {} after {} before {}\")",
                escape(username),
                since,
                before
            ),
        }
    }
}
