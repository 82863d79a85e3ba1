use worklog_types::record::{UNKNOWN_AUTHOR, UNKNOWN_REPOSITORY};
use worklog_types::{Comment, ItemRecord, RecordId, format_timestamp};

use super::schema::{JiraComment, SearchIssue};

pub(crate) fn comment(raw: JiraComment) -> Comment {
    Comment {
        author: raw.author.and_then(|author| author.login()),
        created_at: format_timestamp(raw.created.as_deref()),
        body: raw.body.unwrap_or_default(),
    }
}

/// `base_url` is the instance root used to build `/browse/{key}` links
pub(crate) fn item(raw: SearchIssue, base_url: &str, comments: Vec<Comment>) -> Option<ItemRecord> {
    let key = raw.key?;
    let fields = raw.fields;

    Some(ItemRecord {
        id: RecordId::Key(key.clone()),
        repository: fields
            .project
            .and_then(|project| project.key)
            .unwrap_or_else(|| UNKNOWN_REPOSITORY.to_string()),
        title: fields.summary,
        state: fields.status.and_then(|status| status.name),
        created_by: fields
            .reporter
            .and_then(|reporter| reporter.login())
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
        created_at: format_timestamp(fields.created.as_deref()),
        updated_at: format_timestamp(fields.updated.as_deref()),
        closed_at: format_timestamp(fields.resolutiondate.as_deref()),
        merge: None,
        body: fields.description.unwrap_or_default(),
        comments,
        url: Some(format!("{}/browse/{}", base_url, key)),
    })
}
