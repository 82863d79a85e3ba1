pub mod config;
pub mod date;
pub mod error;
pub mod record;
pub mod report;

pub use config::SectionConfig;
pub use date::{DateRange, format_timestamp, parse_timestamp};
pub use error::{Error, Result};
pub use record::{ActivityRecord, Category, Comment, CommitRecord, ItemRecord, RecordId};
pub use report::{SourceOutcome, SourceReport};
