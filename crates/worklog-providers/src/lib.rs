// Error types
pub mod error;

// HTTP seam and request plumbing
pub mod api;
pub mod credential;
pub mod http;
pub mod paginate;
pub mod rate_limit;

// Facet pipeline
pub mod facet;
pub mod merge;
pub mod timeframe;

// Trait-based architecture (public API)
pub mod traits;

// Source implementations
pub mod github;
pub mod gitlab;
pub mod jira;

// Source registry
pub mod registry;

// Traits
pub use traits::{ActivitySource, SourceAdapter};

// Sources
pub use github::{GitHubConfig, GitHubSource};
pub use gitlab::{GitLabConfig, GitLabSource};
pub use jira::{JiraConfig, JiraSource};

// HTTP
pub use http::{HttpClient, HttpError, ReqwestHttpClient, Request};

// Registry
pub use registry::{
    SourceMetadata, create_adapter, get_all_sources, get_source_metadata, get_source_names,
};

// Error types
pub use error::{Error, Result};
