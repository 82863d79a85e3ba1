use regex::Regex;
use std::sync::LazyLock;
use worklog_types::record::{MergeInfo, UNKNOWN_AUTHOR, UNKNOWN_REPOSITORY};
use worklog_types::{Comment, CommitRecord, ItemRecord, RecordId, format_timestamp};

use super::schema::{IssueComment, SearchCommit, SearchIssue};

/// `https://api.github.com/repos/{owner}/{repo}` → `{owner}/{repo}`
static REPOSITORY_URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/repos/([^/]+/[^/]+?)/?$").unwrap());

pub(crate) fn repository_from_url(url: Option<&str>) -> String {
    url.and_then(|url| REPOSITORY_URL_REGEX.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| UNKNOWN_REPOSITORY.to_string())
}

pub(crate) fn comment(raw: &IssueComment) -> Comment {
    Comment {
        author: raw.user.as_ref().and_then(|user| user.login.clone()),
        created_at: format_timestamp(raw.created_at.as_deref()),
        body: raw.body.clone().unwrap_or_default(),
    }
}

/// Map a search item to the canonical item shape; `merge` is set for pull requests
pub(crate) fn item(
    issue: SearchIssue,
    comments: Vec<Comment>,
    merge: Option<MergeInfo>,
) -> Option<ItemRecord> {
    let number = issue.number?;
    Some(ItemRecord {
        id: RecordId::Number(number),
        repository: repository_from_url(issue.repository_url.as_deref()),
        title: issue.title,
        state: issue.state,
        created_by: issue
            .user
            .and_then(|user| user.login)
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
        created_at: format_timestamp(issue.created_at.as_deref()),
        updated_at: format_timestamp(issue.updated_at.as_deref()),
        closed_at: format_timestamp(issue.closed_at.as_deref()),
        merge: merge.map(|info| MergeInfo {
            merged_at: format_timestamp(info.merged_at.as_deref()),
        }),
        body: issue.body.unwrap_or_default(),
        comments,
        url: issue.html_url,
    })
}

pub(crate) fn commit(raw: SearchCommit) -> Option<CommitRecord> {
    let sha = raw.sha?;
    let detail = raw.commit.unwrap_or_default();
    let author = detail.author.unwrap_or_default();
    Some(CommitRecord {
        id: sha,
        repository: raw
            .repository
            .and_then(|repo| repo.full_name)
            .unwrap_or_else(|| UNKNOWN_REPOSITORY.to_string()),
        message: detail.message.unwrap_or_default(),
        author: author.name,
        email: author.email,
        date: format_timestamp(author.date.as_deref()),
        url: raw.html_url,
    })
}
