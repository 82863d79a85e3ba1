use serde::{Deserialize, Serialize};
use std::fmt;

/// Fallback repository name when project metadata cannot be resolved
pub const UNKNOWN_REPOSITORY: &str = "unknown";

/// Fallback author name when a record carries no author
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Kind of tracked item in a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Issues,
    PullRequests,
    MergeRequests,
    Commits,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Issues => "issues",
            Category::PullRequests => "pull_requests",
            Category::MergeRequests => "merge_requests",
            Category::Commits => "commits",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display identifier of an item: numeric for GitHub/GitLab, a key such as `PROJ-12` for Jira
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(u64),
    Key(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Key(key) => f.write_str(key),
        }
    }
}

/// A single comment or note on an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub author: Option<String>,
    pub created_at: Option<String>,
    pub body: String,
}

/// Merge status carried only by pull/merge requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeInfo {
    pub merged_at: Option<String>,
}

/// Issue, pull request or merge request in canonical shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: RecordId,
    pub repository: String,
    pub title: Option<String>,
    pub state: Option<String>,
    pub created_by: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub closed_at: Option<String>,
    /// Present for pull/merge requests only; `merged_at` itself may be null
    #[serde(flatten)]
    pub merge: Option<MergeInfo>,
    pub body: String,
    pub comments: Vec<Comment>,
    pub url: Option<String>,
}

/// Commit in canonical shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub id: String,
    pub repository: String,
    pub message: String,
    pub author: Option<String>,
    pub email: Option<String>,
    pub date: Option<String>,
    pub url: Option<String>,
}

/// Canonical activity record emitted by every source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActivityRecord {
    Item(ItemRecord),
    Commit(CommitRecord),
}

impl From<ItemRecord> for ActivityRecord {
    fn from(item: ItemRecord) -> Self {
        ActivityRecord::Item(item)
    }
}

impl From<CommitRecord> for ActivityRecord {
    fn from(commit: CommitRecord) -> Self {
        ActivityRecord::Commit(commit)
    }
}
