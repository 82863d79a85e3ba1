use worklog_types::record::{MergeInfo, UNKNOWN_AUTHOR};
use worklog_types::{Comment, ItemRecord, RecordId, format_timestamp};

use super::facets::ItemKind;
use super::schema::{Note, WorkItem};

/// Non-system notes as comments
pub(crate) fn comments(notes: Vec<Note>) -> Vec<Comment> {
    notes
        .into_iter()
        .filter(|note| !note.system)
        .map(|note| Comment {
            author: note.author.and_then(|author| author.username),
            created_at: format_timestamp(note.created_at.as_deref()),
            body: note.body.unwrap_or_default(),
        })
        .collect()
}

pub(crate) fn item(
    raw: WorkItem,
    kind: ItemKind,
    repository: String,
    comments: Vec<Comment>,
) -> Option<ItemRecord> {
    let iid = raw.iid?;
    let merge = match kind {
        ItemKind::MergeRequest => Some(MergeInfo {
            merged_at: format_timestamp(raw.merged_at.as_deref()),
        }),
        ItemKind::Issue => None,
    };

    Some(ItemRecord {
        id: RecordId::Number(iid),
        repository,
        title: raw.title,
        state: raw.state,
        created_by: raw
            .author
            .and_then(|author| author.username)
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
        created_at: format_timestamp(raw.created_at.as_deref()),
        updated_at: format_timestamp(raw.updated_at.as_deref()),
        closed_at: format_timestamp(raw.closed_at.as_deref()),
        merge,
        body: raw.description.unwrap_or_default(),
        comments,
        url: raw.web_url,
    })
}
