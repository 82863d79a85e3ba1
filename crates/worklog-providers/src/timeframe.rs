use serde_json::Value;
use worklog_types::DateRange;

/// Author and creation time of one comment, borrowed from a raw record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentStamp<'a> {
    pub author: Option<&'a str>,
    pub created_at: Option<&'a str>,
}

impl<'a> CommentStamp<'a> {
    /// Read the author at `author_path` and the timestamp at `created_field`
    pub fn from_raw(comment: &'a Value, author_path: &[&str], created_field: &str) -> Self {
        let author = author_path
            .iter()
            .try_fold(comment, |value, key| value.get(*key))
            .and_then(Value::as_str);
        let created_at = comment.get(created_field).and_then(Value::as_str);
        Self { author, created_at }
    }
}

/// True when `username` wrote at least one comment whose date lies in `range`.
///
/// Usernames compare case-insensitively. Comments with a missing or
/// unparseable timestamp are skipped.
pub fn has_user_comment_in_window<'a, I>(comments: I, username: &str, range: &DateRange) -> bool
where
    I: IntoIterator<Item = CommentStamp<'a>>,
{
    comments.into_iter().any(|comment| {
        comment
            .author
            .is_some_and(|author| author.eq_ignore_ascii_case(username))
            && comment
                .created_at
                .is_some_and(|created_at| range.contains_timestamp(created_at))
    })
}

/// True when the record's `field` timestamp lies in `range`
pub fn field_in_window(record: &Value, field: &str, range: &DateRange) -> bool {
    record
        .get(field)
        .and_then(Value::as_str)
        .is_some_and(|raw| range.contains_timestamp(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn june() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 6, 30).unwrap(),
        )
        .unwrap()
    }

    fn stamp<'a>(author: &'a str, created_at: &'a str) -> CommentStamp<'a> {
        CommentStamp {
            author: Some(author),
            created_at: Some(created_at),
        }
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        let range = june();
        assert!(has_user_comment_in_window(
            [stamp("alice", "2023-06-01T00:00:00Z")],
            "alice",
            &range
        ));
        assert!(has_user_comment_in_window(
            [stamp("alice", "2023-06-30T23:59:59Z")],
            "alice",
            &range
        ));
        assert!(!has_user_comment_in_window(
            [stamp("alice", "2023-05-31T23:59:59Z")],
            "alice",
            &range
        ));
        assert!(!has_user_comment_in_window(
            [stamp("alice", "2023-07-01T00:00:00Z")],
            "alice",
            &range
        ));
    }

    #[test]
    fn test_only_matching_author_counts() {
        let range = june();
        let comments = [
            stamp("bob", "2023-06-10T10:00:00Z"),
            stamp("alice", "2023-05-10T10:00:00Z"),
        ];
        assert!(!has_user_comment_in_window(comments, "alice", &range));
        assert!(has_user_comment_in_window(comments, "bob", &range));
    }

    #[test]
    fn test_author_match_ignores_case() {
        let range = june();
        let comments = [stamp("alice", "2023-06-10T10:00:00Z")];
        assert!(has_user_comment_in_window(comments, "Alice", &range));
        assert!(!has_user_comment_in_window(comments, "Alicia", &range));
    }

    #[test]
    fn test_unparseable_and_missing_timestamps_are_skipped() {
        let range = june();
        let comments = [
            stamp("alice", "yesterday"),
            CommentStamp {
                author: Some("alice"),
                created_at: None,
            },
        ];
        assert!(!has_user_comment_in_window(comments, "alice", &range));
    }

    #[test]
    fn test_from_raw_follows_author_path() {
        let raw = json!({"user": {"login": "alice"}, "created_at": "2023-06-02T08:00:00Z"});
        let stamp = CommentStamp::from_raw(&raw, &["user", "login"], "created_at");
        assert_eq!(stamp.author, Some("alice"));
        assert_eq!(stamp.created_at, Some("2023-06-02T08:00:00Z"));

        let missing = json!({"created_at": "2023-06-02T08:00:00Z"});
        assert_eq!(CommentStamp::from_raw(&missing, &["user", "login"], "created_at").author, None);
    }

    #[test]
    fn test_field_in_window() {
        let range = june();
        assert!(field_in_window(&json!({"closed_at": "2023-06-15T12:00:00Z"}), "closed_at", &range));
        assert!(!field_in_window(&json!({"closed_at": null}), "closed_at", &range));
        assert!(!field_in_window(&json!({"closed_at": "2023-08-01T00:00:00Z"}), "closed_at", &range));
    }
}
