use std::sync::Arc;
use worklog_types::{DateRange, SectionConfig, SourceOutcome};

use crate::github::GitHubSource;
use crate::gitlab::GitLabSource;
use crate::http::HttpClient;
use crate::jira::JiraSource;
use crate::{Error, Result};

/// A configured service that reports a user's activity over a date range
///
/// Responsibilities:
/// - Run every facet query of each category
/// - Merge facet results and normalize the survivors
/// - Degrade failed requests to "no data" instead of failing the run
pub trait ActivitySource: Send + Sync {
    /// Section `type` this source answers to (e.g., "github")
    fn kind(&self) -> &'static str;

    /// User whose activity is reported
    fn username(&self) -> &str;

    /// Query, merge and normalize; never panics on remote failures
    fn process(&self, range: &DateRange) -> SourceOutcome;
}

impl ActivitySource for GitHubSource {
    fn kind(&self) -> &'static str {
        crate::github::METADATA.name
    }

    fn username(&self) -> &str {
        GitHubSource::username(self)
    }

    fn process(&self, range: &DateRange) -> SourceOutcome {
        GitHubSource::process(self, range)
    }
}

impl ActivitySource for GitLabSource {
    fn kind(&self) -> &'static str {
        crate::gitlab::METADATA.name
    }

    fn username(&self) -> &str {
        GitLabSource::username(self)
    }

    fn process(&self, range: &DateRange) -> SourceOutcome {
        GitLabSource::process(self, range)
    }
}

impl ActivitySource for JiraSource {
    fn kind(&self) -> &'static str {
        crate::jira::METADATA.name
    }

    fn username(&self) -> &str {
        JiraSource::username(self)
    }

    fn process(&self, range: &DateRange) -> SourceOutcome {
        JiraSource::process(self, range)
    }
}

// --- Source Adapter ---

/// Configured adapter for one of the supported services
pub enum SourceAdapter {
    GitHub(GitHubSource),
    GitLab(GitLabSource),
    Jira(JiraSource),
}

impl SourceAdapter {
    /// Configure the adapter registered under `kind` from a section
    pub fn from_kind(kind: &str, section: &SectionConfig, http: Arc<dyn HttpClient>) -> Result<Self> {
        match kind {
            "github" => Ok(Self::GitHub(GitHubSource::from_section(section, http)?)),
            "gitlab" => Ok(Self::GitLab(GitLabSource::from_section(section, http)?)),
            "jira" => Ok(Self::Jira(JiraSource::from_section(section, http)?)),
            _ => Err(Error::UnknownSource(kind.to_string())),
        }
    }

    pub fn source(&self) -> &dyn ActivitySource {
        match self {
            SourceAdapter::GitHub(source) => source,
            SourceAdapter::GitLab(source) => source,
            SourceAdapter::Jira(source) => source,
        }
    }

    pub fn kind(&self) -> &'static str {
        self.source().kind()
    }

    /// Run the adapter for `section`; every event it logs carries the section name
    pub fn run(&self, section: &str, range: &DateRange) -> SourceOutcome {
        let source = self.source();
        let span = tracing::info_span!("source", section, kind = source.kind());
        let _guard = span.enter();

        tracing::info!(
            user = source.username(),
            since = %range.since(),
            until = %range.until(),
            "Querying activity"
        );
        source.process(range)
    }
}
