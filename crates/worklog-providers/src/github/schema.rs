use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub(crate) struct User {
    pub login: Option<String>,
}

/// Item returned by `/search/issues` (issues and pull requests share the shape)
#[derive(Debug, Deserialize, Clone, Default)]
pub(crate) struct SearchIssue {
    pub number: Option<u64>,
    pub title: Option<String>,
    pub state: Option<String>,
    pub user: Option<User>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub closed_at: Option<String>,
    pub body: Option<String>,
    pub html_url: Option<String>,
    pub repository_url: Option<String>,
    pub comments_url: Option<String>,
    pub pull_request: Option<PullRequestRef>,
}

/// Link from a search item to its pull request resource
#[derive(Debug, Deserialize, Clone, Default)]
pub(crate) struct PullRequestRef {
    pub url: Option<String>,
    pub merged_at: Option<String>,
}

/// Subset of `/repos/{owner}/{repo}/pulls/{number}`
#[derive(Debug, Deserialize, Clone, Default)]
pub(crate) struct PullRequestDetail {
    pub merged_at: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub(crate) struct IssueComment {
    pub user: Option<User>,
    pub created_at: Option<String>,
    pub body: Option<String>,
}

/// Item returned by `/search/commits`
#[derive(Debug, Deserialize, Clone, Default)]
pub(crate) struct SearchCommit {
    pub sha: Option<String>,
    pub html_url: Option<String>,
    pub commit: Option<CommitDetail>,
    pub repository: Option<Repository>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub(crate) struct CommitDetail {
    pub message: Option<String>,
    pub author: Option<Signature>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub(crate) struct Signature {
    pub name: Option<String>,
    pub email: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub(crate) struct Repository {
    pub full_name: Option<String>,
}
