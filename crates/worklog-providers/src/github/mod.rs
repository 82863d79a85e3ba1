mod facets;
mod normalize;
mod schema;

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use worklog_types::record::MergeInfo;
use worklog_types::{
    ActivityRecord, Category, DateRange, ItemRecord, SectionConfig, SourceOutcome, SourceReport,
};

use self::facets::{GitHubFacet, ISSUE_FACETS, ItemKind, PULL_REQUEST_FACETS};
use self::schema::{IssueComment, PullRequestDetail, SearchCommit, SearchIssue};
use crate::api::{ApiClient, AuthScheme, decode, params};
use crate::credential::Credential;
use crate::facet::collect_facet;
use crate::http::HttpClient;
use crate::merge::{RecordKey, RecordSet, merge_facets};
use crate::paginate::PageStyle;
use crate::rate_limit::RateLimitPolicy;
use crate::registry::SourceMetadata;
use crate::timeframe::{CommentStamp, has_user_comment_in_window};
use crate::Result;

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
const ACCEPT: &str = "application/vnd.github+json";

pub(crate) const METADATA: SourceMetadata = SourceMetadata {
    name: "github",
    description: "GitHub issues, pull requests and commits via the search API",
    required: &["token", "username"],
    optional: &["owner", "repo", "api_base_url"],
};

/// Validated `type = "github"` section
#[derive(Debug)]
pub struct GitHubConfig {
    pub username: String,
    pub credential: Credential,
    /// Accepted for compatibility; searches always span every repository
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub api_base_url: String,
}

impl GitHubConfig {
    pub fn from_section(section: &SectionConfig) -> Result<Self> {
        METADATA.check(section)?;
        let required = |key| section.get(key).unwrap_or_default();

        Ok(Self {
            username: required("username").to_string(),
            credential: Credential::resolve(required("token"))?,
            owner: section.get("owner").map(str::to_string),
            repo: section.get("repo").map(str::to_string),
            api_base_url: section
                .get("api_base_url")
                .unwrap_or(DEFAULT_API_BASE_URL)
                .to_string(),
        })
    }
}

/// Comment lists already fetched during this run, keyed by `comments_url`
type CommentCache = HashMap<String, Vec<Value>>;

pub struct GitHubSource {
    username: String,
    api: ApiClient,
}

impl GitHubSource {
    pub fn new(config: GitHubConfig, http: Arc<dyn HttpClient>) -> Self {
        if config.owner.is_some() || config.repo.is_some() {
            tracing::debug!(
                owner = config.owner.as_deref(),
                repo = config.repo.as_deref(),
                "owner/repo are not used to narrow GitHub searches"
            );
        }
        let api = ApiClient::new(
            METADATA.name,
            config.api_base_url,
            config.credential,
            AuthScheme::GitHubToken,
            RateLimitPolicy::GitHub,
            http,
        )
        .with_accept(ACCEPT);

        Self {
            username: config.username,
            api,
        }
    }

    pub fn from_section(section: &SectionConfig, http: Arc<dyn HttpClient>) -> Result<Self> {
        Ok(Self::new(GitHubConfig::from_section(section)?, http))
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn process(&self, range: &DateRange) -> SourceOutcome {
        let mut comments = CommentCache::new();

        let issues = self.items(ItemKind::Issue, &ISSUE_FACETS, range, &mut comments);
        let pull_requests =
            self.items(ItemKind::PullRequest, &PULL_REQUEST_FACETS, range, &mut comments);
        let commits = self.commits(range);

        SourceOutcome::Report(
            SourceReport::new(METADATA.name, &self.username)
                .with_category(Category::Issues, issues)
                .with_category(Category::PullRequests, pull_requests)
                .with_category(Category::Commits, commits),
        )
    }

    fn items(
        &self,
        kind: ItemKind,
        facets: &[GitHubFacet],
        range: &DateRange,
        comments: &mut CommentCache,
    ) -> Vec<ActivityRecord> {
        let sets: Vec<RecordSet> = facets
            .iter()
            .map(|facet| self.run_facet(*facet, range, comments))
            .collect();
        let merged = merge_facets(sets);
        tracing::info!(category = %kind.category(), count = merged.len(), "Merged facets");

        merged
            .into_records()
            .filter_map(|raw| self.normalize_item(raw, kind, comments))
            .map(ActivityRecord::from)
            .collect()
    }

    fn commits(&self, range: &DateRange) -> Vec<ActivityRecord> {
        let set = self.run_facet(GitHubFacet::Authored, range, &mut CommentCache::new());
        set.into_records()
            .filter_map(|raw| decode::<SearchCommit>(raw, "commit"))
            .filter_map(normalize::commit)
            .map(ActivityRecord::from)
            .collect()
    }

    fn run_facet(
        &self,
        facet: GitHubFacet,
        range: &DateRange,
        comments: &mut CommentCache,
    ) -> RecordSet {
        let records = self.api.get_paginated(
            facet.endpoint(),
            &params([("q", facet.query(&self.username, range))]),
            PageStyle::GITHUB_SEARCH,
        );
        let key_field = facet.key_field();

        collect_facet(
            facet.name(),
            records,
            |record| RecordKey::field(record, key_field),
            |record| self.accepts(facet, record, range, comments),
        )
    }

    /// Client-side post-filter applied on top of the search qualifiers
    fn accepts(
        &self,
        facet: GitHubFacet,
        record: &Value,
        range: &DateRange,
        comments: &mut CommentCache,
    ) -> bool {
        match facet {
            GitHubFacet::Commented(_) => {
                let list = self.comments(record, comments);
                let stamps = list
                    .iter()
                    .map(|comment| CommentStamp::from_raw(comment, &["user", "login"], "created_at"));
                has_user_comment_in_window(stamps, &self.username, range)
            }
            GitHubFacet::Reviewed => {
                let author = record.pointer("/user/login").and_then(Value::as_str);
                !author.is_some_and(|author| author.eq_ignore_ascii_case(&self.username))
            }
            _ => true,
        }
    }

    /// Raw comments of one search item, fetched at most once per run
    fn comments<'c>(&self, record: &Value, cache: &'c mut CommentCache) -> &'c [Value] {
        let Some(url) = record.get("comments_url").and_then(Value::as_str) else {
            return &[];
        };
        cache
            .entry(url.to_string())
            .or_insert_with(|| self.api.get_paginated(url, &[], PageStyle::ARRAY))
            .as_slice()
    }

    fn normalize_item(
        &self,
        raw: Value,
        kind: ItemKind,
        cache: &mut CommentCache,
    ) -> Option<ItemRecord> {
        let comments = self
            .comments(&raw, cache)
            .iter()
            .cloned()
            .filter_map(|comment| decode::<IssueComment>(comment, "comment"))
            .map(|comment| normalize::comment(&comment))
            .collect();

        let issue = decode::<SearchIssue>(raw, "search item")?;
        let merge = match kind {
            ItemKind::PullRequest => Some(self.merge_info(&issue)),
            ItemKind::Issue => None,
        };
        normalize::item(issue, comments, merge)
    }

    /// `merged_at` from the pull request resource, falling back to the search record
    fn merge_info(&self, issue: &SearchIssue) -> MergeInfo {
        let reference = issue.pull_request.clone().unwrap_or_default();
        let detail = reference
            .url
            .as_deref()
            .and_then(|url| self.api.get(url, &[]))
            .and_then(|body| decode::<PullRequestDetail>(body, "pull request"));

        match detail {
            Some(detail) => MergeInfo {
                merged_at: detail.merged_at,
            },
            None => {
                tracing::warn!(
                    number = issue.number,
                    "Pull request detail unavailable, using search record"
                );
                MergeInfo {
                    merged_at: reference.merged_at,
                }
            }
        }
    }
}
