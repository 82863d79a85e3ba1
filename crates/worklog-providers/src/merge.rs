use indexmap::IndexMap;
use indexmap::map::Entry;
use serde_json::Value;
use std::fmt;

/// Stable identifier used to deduplicate records across facets of one category
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordKey(String);

impl RecordKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Build a key from a JSON string or number
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) if !s.is_empty() => Some(Self(s.clone())),
            Value::Number(n) => Some(Self(n.to_string())),
            _ => None,
        }
    }

    /// Key from a top-level field of a raw record
    pub fn field(record: &Value, field: &str) -> Option<Self> {
        record.get(field).and_then(Self::from_value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw records of one facet or category, keyed and in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet(IndexMap<RecordKey, Value>);

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert unless the key is already present; returns whether the record was added
    pub fn insert_first(&mut self, key: RecordKey, record: Value) -> bool {
        match self.0.entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(record);
                true
            }
        }
    }

    pub fn get(&self, key: &RecordKey) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &RecordKey> {
        self.0.keys()
    }

    pub fn into_records(self) -> impl Iterator<Item = Value> {
        self.0.into_values()
    }

    /// Fold `other` into `self`; keys already present keep their existing record
    pub fn absorb(&mut self, other: RecordSet) {
        for (key, record) in other.0 {
            self.insert_first(key, record);
        }
    }
}

/// Union facet result sets in the given order, first occurrence of a key wins
pub fn merge_facets<I>(facets: I) -> RecordSet
where
    I: IntoIterator<Item = RecordSet>,
{
    let mut merged = RecordSet::new();
    for facet in facets {
        merged.absorb(facet);
    }
    merged
}
