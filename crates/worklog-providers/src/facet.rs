use serde_json::Value;

use crate::merge::{RecordKey, RecordSet};

/// Key, filter and count the raw records returned by one facet query.
///
/// Records without a usable key are dropped with a warning; `accept` is the
/// facet's client-side post-filter.
pub fn collect_facet<K, A>(facet: &str, records: Vec<Value>, key: K, mut accept: A) -> RecordSet
where
    K: Fn(&Value) -> Option<RecordKey>,
    A: FnMut(&Value) -> bool,
{
    let fetched = records.len();
    let mut set = RecordSet::new();

    for record in records {
        let Some(record_key) = key(&record) else {
            tracing::warn!(facet, "Skipping record without identifier");
            continue;
        };
        if !accept(&record) {
            continue;
        }
        set.insert_first(record_key, record);
    }

    if set.len() == fetched {
        tracing::info!(facet, count = set.len(), "Facet query complete");
    } else {
        tracing::info!(
            facet,
            fetched,
            count = set.len(),
            "Facet query complete after filtering"
        );
    }
    set
}
