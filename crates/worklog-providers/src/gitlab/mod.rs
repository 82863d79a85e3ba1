mod facets;
mod normalize;
mod schema;

use std::collections::HashMap;
use std::sync::Arc;
use worklog_types::record::UNKNOWN_REPOSITORY;
use worklog_types::{
    ActivityRecord, Comment, DateRange, ItemRecord, SectionConfig, SourceOutcome, SourceReport,
};

use self::facets::{GitLabFacet, ISSUE_FACETS, ItemKind, MERGE_REQUEST_FACETS};
use self::schema::{Note, Project, User, WorkItem};
use crate::Result;
use crate::api::{ApiClient, AuthScheme, decode, params};
use crate::credential::Credential;
use crate::facet::collect_facet;
use crate::http::HttpClient;
use crate::merge::{RecordKey, RecordSet, merge_facets};
use crate::paginate::PageStyle;
use crate::rate_limit::RateLimitPolicy;
use crate::registry::SourceMetadata;
use crate::timeframe::field_in_window;

pub const DEFAULT_BASE_URL: &str = "https://gitlab.com";

/// Payload emitted when the username cannot be resolved to an id
pub const USER_LOOKUP_FAILED: &str = "Could not retrieve user ID";

pub(crate) const METADATA: SourceMetadata = SourceMetadata {
    name: "gitlab",
    description: "GitLab issues and merge requests (gitlab.com or self-managed)",
    required: &["token", "username"],
    optional: &["project_id", "api_base_url"],
};

/// Validated `type = "gitlab"` section
#[derive(Debug)]
pub struct GitLabConfig {
    pub username: String,
    pub credential: Credential,
    /// Accepted for compatibility; queries always use `scope=all`
    pub project_id: Option<String>,
    /// REST root, `<instance>/api/v4`
    pub api_base_url: String,
}

impl GitLabConfig {
    pub fn from_section(section: &SectionConfig) -> Result<Self> {
        METADATA.check(section)?;
        let required = |key| section.get(key).unwrap_or_default();
        let instance = section.get("api_base_url").unwrap_or(DEFAULT_BASE_URL);

        Ok(Self {
            username: required("username").to_string(),
            credential: Credential::resolve(required("token"))?,
            project_id: section.get("project_id").map(str::to_string),
            api_base_url: format!("{}/api/v4", instance.trim_end_matches('/')),
        })
    }
}

pub struct GitLabSource {
    username: String,
    api: ApiClient,
}

impl GitLabSource {
    pub fn new(config: GitLabConfig, http: Arc<dyn HttpClient>) -> Self {
        if let Some(project_id) = config.project_id.as_deref() {
            tracing::debug!(project_id, "project_id is not used to narrow GitLab queries");
        }
        let api = ApiClient::new(
            METADATA.name,
            config.api_base_url,
            config.credential,
            AuthScheme::PrivateToken,
            RateLimitPolicy::GitLab,
            http,
        );

        Self {
            username: config.username,
            api,
        }
    }

    pub fn from_section(section: &SectionConfig, http: Arc<dyn HttpClient>) -> Result<Self> {
        Ok(Self::new(GitLabConfig::from_section(section)?, http))
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn process(&self, range: &DateRange) -> SourceOutcome {
        let Some(user_id) = self.user_id() else {
            tracing::error!(username = %self.username, "Could not retrieve user ID, aborting");
            return SourceOutcome::failed(USER_LOOKUP_FAILED);
        };
        tracing::debug!(user_id, "Resolved GitLab user");

        let mut projects = HashMap::new();
        let issues = self.items(ItemKind::Issue, &ISSUE_FACETS, user_id, range, &mut projects);
        let merge_requests = self.items(
            ItemKind::MergeRequest,
            &MERGE_REQUEST_FACETS,
            user_id,
            range,
            &mut projects,
        );

        SourceOutcome::Report(
            SourceReport::new(METADATA.name, &self.username)
                .with_category(ItemKind::Issue.category(), issues)
                .with_category(ItemKind::MergeRequest.category(), merge_requests),
        )
    }

    fn user_id(&self) -> Option<u64> {
        let body = self
            .api
            .get("/users", &params([("username", self.username.clone())]))?;
        let users: Vec<User> = decode(body, "user list")?;
        users.first().and_then(|user| user.id)
    }

    fn items(
        &self,
        kind: ItemKind,
        facets: &[GitLabFacet],
        user_id: u64,
        range: &DateRange,
        projects: &mut HashMap<u64, String>,
    ) -> Vec<ActivityRecord> {
        let sets: Vec<RecordSet> = facets
            .iter()
            .map(|facet| self.run_facet(kind, facet, user_id, range))
            .collect();
        let merged = merge_facets(sets);
        tracing::info!(
            category = %kind.category(),
            count = merged.len(),
            username = %self.username,
            "Merged facets"
        );

        merged
            .into_records()
            .filter_map(|raw| decode::<WorkItem>(raw, "work item"))
            .filter_map(|item| self.normalize_item(item, kind, projects))
            .map(ActivityRecord::from)
            .collect()
    }

    fn run_facet(
        &self,
        kind: ItemKind,
        facet: &GitLabFacet,
        user_id: u64,
        range: &DateRange,
    ) -> RecordSet {
        let records = self.api.get_paginated(
            &kind.endpoint(),
            &facet.params(user_id, range),
            PageStyle::ARRAY,
        );

        collect_facet(
            facet.name,
            records,
            |record| RecordKey::field(record, "id"),
            |record| match facet.settled_field {
                Some(field) => field_in_window(record, field, range),
                None => true,
            },
        )
    }

    fn normalize_item(
        &self,
        item: WorkItem,
        kind: ItemKind,
        projects: &mut HashMap<u64, String>,
    ) -> Option<ItemRecord> {
        let (repository, comments) = match (item.project_id, item.iid) {
            (Some(project_id), Some(iid)) => (
                self.repository(project_id, projects),
                self.notes(kind, project_id, iid),
            ),
            _ => (UNKNOWN_REPOSITORY.to_string(), Vec::new()),
        };
        normalize::item(item, kind, repository, comments)
    }

    /// `path_with_namespace` of a project, looked up once per run
    fn repository(&self, project_id: u64, projects: &mut HashMap<u64, String>) -> String {
        projects
            .entry(project_id)
            .or_insert_with(|| {
                self.api
                    .get(&format!("/projects/{}", project_id), &[])
                    .and_then(|body| decode::<Project>(body, "project"))
                    .and_then(|project| project.path_with_namespace)
                    .unwrap_or_else(|| {
                        tracing::warn!(project_id, "Project lookup failed, repository unknown");
                        UNKNOWN_REPOSITORY.to_string()
                    })
            })
            .clone()
    }

    fn notes(&self, kind: ItemKind, project_id: u64, iid: u64) -> Vec<Comment> {
        let notes: Vec<Note> = self
            .api
            .get_paginated(&kind.notes_endpoint(project_id, iid), &[], PageStyle::ARRAY)
            .into_iter()
            .filter_map(|note| decode(note, "note"))
            .collect();
        normalize::comments(notes)
    }
}
