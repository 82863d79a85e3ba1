use chrono::NaiveDate;
use worklog_types::{Category, DateRange};

/// Search qualifier distinguishing issues from pull requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ItemKind {
    Issue,
    PullRequest,
}

impl ItemKind {
    fn qualifier(&self) -> &'static str {
        match self {
            ItemKind::Issue => "type:issue",
            ItemKind::PullRequest => "type:pr",
        }
    }

    pub fn category(&self) -> Category {
        match self {
            ItemKind::Issue => Category::Issues,
            ItemKind::PullRequest => Category::PullRequests,
        }
    }
}

/// One GitHub search query dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GitHubFacet {
    /// Items the user commented on since the window start; the comments
    /// decide membership, so later activity on the item does not hide it
    Commented(ItemKind),
    Created(ItemKind),
    /// Items assigned to the user and closed in the window
    Closed(ItemKind),
    /// Pull requests reviewed by the user, excluding their own
    Reviewed,
    /// Commits authored in the window
    Authored,
}

pub(crate) const ISSUE_FACETS: [GitHubFacet; 3] = [
    GitHubFacet::Commented(ItemKind::Issue),
    GitHubFacet::Created(ItemKind::Issue),
    GitHubFacet::Closed(ItemKind::Issue),
];

pub(crate) const PULL_REQUEST_FACETS: [GitHubFacet; 4] = [
    GitHubFacet::Commented(ItemKind::PullRequest),
    GitHubFacet::Created(ItemKind::PullRequest),
    GitHubFacet::Closed(ItemKind::PullRequest),
    GitHubFacet::Reviewed,
];

fn day(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `since..until` range qualifier value, inclusive on both ends
pub(crate) fn window(range: &DateRange) -> String {
    format!("{}..{}", day(range.since()), day(range.until()))
}

impl GitHubFacet {
    pub fn name(&self) -> &'static str {
        match self {
            GitHubFacet::Commented(ItemKind::Issue) => "issues commented",
            GitHubFacet::Commented(ItemKind::PullRequest) => "pull requests commented",
            GitHubFacet::Created(ItemKind::Issue) => "issues created",
            GitHubFacet::Created(ItemKind::PullRequest) => "pull requests created",
            GitHubFacet::Closed(ItemKind::Issue) => "issues closed",
            GitHubFacet::Closed(ItemKind::PullRequest) => "pull requests closed",
            GitHubFacet::Reviewed => "pull requests reviewed",
            GitHubFacet::Authored => "commits authored",
        }
    }

    pub fn endpoint(&self) -> &'static str {
        match self {
            GitHubFacet::Authored => "/search/commits",
            _ => "/search/issues",
        }
    }

    /// Value of the `q` search parameter
    pub fn query(&self, username: &str, range: &DateRange) -> String {
        let window = window(range);
        match self {
            GitHubFacet::Commented(kind) => format!(
                "commenter:{} {} updated:>={}",
                username,
                kind.qualifier(),
                day(range.since())
            ),
            GitHubFacet::Created(kind) => {
                format!("author:{} {} created:{}", username, kind.qualifier(), window)
            }
            GitHubFacet::Closed(kind) => {
                format!("assignee:{} {} closed:{}", username, kind.qualifier(), window)
            }
            GitHubFacet::Reviewed => format!(
                "reviewed-by:{} -author:{} type:pr updated:{}",
                username, username, window
            ),
            GitHubFacet::Authored => format!("author:{} author-date:{}", username, window),
        }
    }

    /// Field holding the deduplication key
    pub fn key_field(&self) -> &'static str {
        match self {
            GitHubFacet::Authored => "sha",
            _ => "id",
        }
    }
}
