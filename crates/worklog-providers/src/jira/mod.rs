mod facets;
mod normalize;
mod schema;

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use worklog_types::{
    ActivityRecord, Category, DateRange, ItemRecord, SectionConfig, SourceOutcome, SourceReport,
};

pub use self::facets::DEFAULT_TERMINAL_STATUSES;
use self::facets::{ISSUE_FACETS, JiraFacet, SEARCH_FIELDS, terminal_statuses};
use self::schema::{JiraComment, SearchIssue};
use crate::Result;
use crate::api::{ApiClient, AuthScheme, decode, params};
use crate::credential::Credential;
use crate::facet::collect_facet;
use crate::http::HttpClient;
use crate::merge::{RecordKey, RecordSet, merge_facets};
use crate::paginate::PageStyle;
use crate::rate_limit::RateLimitPolicy;
use crate::registry::SourceMetadata;
use crate::timeframe::{CommentStamp, has_user_comment_in_window};

const ACCEPT: &str = "application/json";

pub(crate) const METADATA: SourceMetadata = SourceMetadata {
    name: "jira",
    description: "Jira Server/Data Center issues via JQL",
    required: &["url", "token", "username"],
    optional: &["terminal_statuses"],
};

/// Validated `type = "jira"` section
#[derive(Debug)]
pub struct JiraConfig {
    pub url: String,
    pub username: String,
    pub credential: Credential,
    pub terminal_statuses: Vec<String>,
}

impl JiraConfig {
    pub fn from_section(section: &SectionConfig) -> Result<Self> {
        METADATA.check(section)?;
        let required = |key| section.get(key).unwrap_or_default();

        Ok(Self {
            url: required("url").trim_end_matches('/').to_string(),
            username: required("username").to_string(),
            credential: Credential::resolve(required("token"))?,
            terminal_statuses: terminal_statuses(section.get("terminal_statuses")),
        })
    }
}

/// Comment lists already fetched during this run, keyed by issue key
type CommentCache = HashMap<String, Vec<Value>>;

pub struct JiraSource {
    username: String,
    terminal_statuses: Vec<String>,
    api: ApiClient,
}

impl JiraSource {
    pub fn new(config: JiraConfig, http: Arc<dyn HttpClient>) -> Self {
        let api = ApiClient::new(
            METADATA.name,
            config.url,
            config.credential,
            AuthScheme::Bearer,
            RateLimitPolicy::Jira,
            http,
        )
        .with_accept(ACCEPT);

        Self {
            username: config.username,
            terminal_statuses: config.terminal_statuses,
            api,
        }
    }

    pub fn from_section(section: &SectionConfig, http: Arc<dyn HttpClient>) -> Result<Self> {
        Ok(Self::new(JiraConfig::from_section(section)?, http))
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn process(&self, range: &DateRange) -> SourceOutcome {
        let mut comments = CommentCache::new();

        let sets: Vec<RecordSet> = ISSUE_FACETS
            .iter()
            .map(|facet| self.run_facet(*facet, range, &mut comments))
            .collect();
        let merged = merge_facets(sets);
        tracing::info!(category = %Category::Issues, count = merged.len(), "Merged facets");

        let issues = merged
            .into_records()
            .filter_map(|raw| self.normalize_issue(raw, &mut comments))
            .map(ActivityRecord::from)
            .collect();

        SourceOutcome::Report(
            SourceReport::new(METADATA.name, &self.username).with_category(Category::Issues, issues),
        )
    }

    fn run_facet(
        &self,
        facet: JiraFacet,
        range: &DateRange,
        comments: &mut CommentCache,
    ) -> RecordSet {
        let jql = facet.jql(&self.username, range, &self.terminal_statuses);
        let records = self.api.get_paginated(
            "/rest/api/2/search",
            &params([("jql", jql), ("fields", SEARCH_FIELDS.to_string())]),
            PageStyle::JIRA_SEARCH,
        );

        collect_facet(
            facet.name(),
            records,
            |record| RecordKey::field(record, "id"),
            |record| match facet {
                JiraFacet::Commented => {
                    let list = self.comments(record, comments);
                    let stamps = list
                        .iter()
                        .map(|comment| CommentStamp::from_raw(comment, &["author", "name"], "created"));
                    has_user_comment_in_window(stamps, &self.username, range)
                }
                JiraFacet::Transitioned => true,
            },
        )
    }

    fn comments<'c>(&self, record: &Value, cache: &'c mut CommentCache) -> &'c [Value] {
        let Some(key) = record.get("key").and_then(Value::as_str) else {
            return &[];
        };
        cache
            .entry(key.to_string())
            .or_insert_with(|| {
                self.api.get_paginated(
                    &format!("/rest/api/2/issue/{}/comment", key),
                    &[],
                    PageStyle::JIRA_COMMENTS,
                )
            })
            .as_slice()
    }

    fn normalize_issue(&self, raw: Value, cache: &mut CommentCache) -> Option<ItemRecord> {
        let comments = self
            .comments(&raw, cache)
            .iter()
            .cloned()
            .filter_map(|comment| decode::<JiraComment>(comment, "comment"))
            .map(normalize::comment)
            .collect();

        let issue = decode::<SearchIssue>(raw, "issue")?;
        normalize::item(issue, self.api.base_url(), comments)
    }
}
