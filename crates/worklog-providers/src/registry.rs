use std::sync::Arc;
use worklog_types::SectionConfig;

use crate::http::HttpClient;
use crate::traits::SourceAdapter;
use crate::{Error, Result};

#[derive(Debug, Clone)]
pub struct SourceMetadata {
    pub name: &'static str,
    pub description: &'static str,
    pub required: &'static [&'static str],
    pub optional: &'static [&'static str],
}

impl SourceMetadata {
    /// Fails naming every required key that is absent or blank
    pub fn check(&self, section: &SectionConfig) -> Result<()> {
        let missing = section.missing(self.required);
        if missing.is_empty() {
            return Ok(());
        }
        Err(Error::MissingFields {
            kind: self.name,
            fields: missing.into_iter().map(str::to_string).collect(),
        })
    }
}

const SOURCES: &[SourceMetadata] = &[
    crate::github::METADATA,
    crate::gitlab::METADATA,
    crate::jira::METADATA,
];

pub fn get_all_sources() -> &'static [SourceMetadata] {
    SOURCES
}

pub fn get_source_names() -> Vec<&'static str> {
    SOURCES.iter().map(|s| s.name).collect()
}

pub fn get_source_metadata(name: &str) -> Option<&'static SourceMetadata> {
    SOURCES.iter().find(|s| s.name == name)
}

/// Configure the adapter named by the section's `type`
pub fn create_adapter(section: &SectionConfig, http: Arc<dyn HttpClient>) -> Result<SourceAdapter> {
    let kind = section.kind().ok_or(Error::MissingType)?;
    SourceAdapter::from_kind(kind, section, http)
}
