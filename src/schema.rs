//! # Schema
//!
//! Normalization of raw entity records into the shape every SUCCESS action carries:
//!
//! ```text
//! { "<entity>": { "<id>": { ...record... }, ... }, "sortedIds": ["<id>", ...] }
//! ```
//!
//! Ids are string-coerced so that `1` and `"1"` address the same entry.

use serde_json::{Map, Value};
use tracing::warn;

/// The key under which the ordered id list is carried in a normalized payload.
pub const SORTED_IDS_KEY: &str = "sortedIds";

/// Describes where entities live in a normalized payload and how they are identified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    key: String,
    id_attribute: String,
}

impl Schema {
    /// A schema keyed by `key` that identifies records by their `id` field.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            id_attribute: "id".to_string(),
        }
    }

    pub fn with_id_attribute(mut self, id_attribute: impl Into<String>) -> Self {
        self.id_attribute = id_attribute.into();
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn id_attribute(&self) -> &str {
        &self.id_attribute
    }

    /// The string-coerced id of a record, if it has a usable one.
    pub fn id_of(&self, record: &Value) -> Option<String> {
        record.get(&self.id_attribute).and_then(coerce_id)
    }

    /// Normalizes `records` into `{ key: {id: record}, sortedIds: [..] }`.
    ///
    /// `Null` is treated as an empty list and a lone object as a list of one.
    /// Records without a string or numeric id are skipped. When an id repeats,
    /// the last record wins and the id keeps its first position.
    pub fn normalize(&self, records: &Value) -> Value {
        let records = as_records(records);
        let mut entities = Map::new();
        let mut sorted_ids = Vec::with_capacity(records.len());
        for record in records {
            let Some(id) = self.id_of(record) else {
                warn!(entity = %self.key, ?record, "Skipping record without id");
                continue;
            };
            if entities.insert(id.clone(), record.clone()).is_none() {
                sorted_ids.push(Value::String(id));
            }
        }

        let mut normalized = Map::new();
        normalized.insert(self.key.clone(), Value::Object(entities));
        normalized.insert(SORTED_IDS_KEY.to_string(), Value::Array(sorted_ids));
        Value::Object(normalized)
    }

    /// True if at least one of `records` carries a usable id.
    pub fn has_ids(&self, records: &Value) -> bool {
        as_records(records)
            .iter()
            .any(|record| self.id_of(record).is_some())
    }
}

fn as_records(records: &Value) -> &[Value] {
    match records {
        Value::Null => &[],
        Value::Array(items) => items,
        single => std::slice::from_ref(single),
    }
}

/// String-coerces an id value: strings verbatim, numbers in decimal form.
pub fn coerce_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
