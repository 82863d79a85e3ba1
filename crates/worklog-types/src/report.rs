use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{ActivityRecord, Category};

/// Normalized activity of one user on one source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceReport {
    pub source: String,
    pub user: String,
    pub activity: IndexMap<Category, Vec<ActivityRecord>>,
}

impl SourceReport {
    pub fn new(source: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            user: user.into(),
            activity: IndexMap::new(),
        }
    }

    /// Append a category; categories keep the order in which they are added
    pub fn with_category(mut self, category: Category, records: Vec<ActivityRecord>) -> Self {
        self.activity.insert(category, records);
        self
    }
}

/// Result of running one configured source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceOutcome {
    Report(SourceReport),
    Failed { error: String },
}

impl SourceOutcome {
    pub fn failed(error: impl Into<String>) -> Self {
        SourceOutcome::Failed {
            error: error.into(),
        }
    }
}
