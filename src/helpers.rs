//! Small utilities for callers wiring up an entity.

use crate::action::Errors;
use crate::error::RemoteError;
use crate::schema::coerce_id;
use serde_json::Value;
use std::collections::BTreeMap;

/// `entities` without the entry whose key equals the string form of `id`.
pub fn entities_except_id(
    entities: &BTreeMap<String, Value>,
    id: &Value,
) -> BTreeMap<String, Value> {
    let Some(id) = coerce_id(id) else {
        return entities.clone();
    };
    entities
        .iter()
        .filter(|(key, _)| **key != id)
        .map(|(key, entity)| (key.clone(), entity.clone()))
        .collect()
}

/// A server-error formatter for validation responses shaped like
///
/// ```text
/// { "status": 422, "message": { "errors": [{ "name": "first_name", "reason": "is not valid" }] } }
/// ```
///
/// Reasons for the same name are joined with `", "`. The status is kept as
/// `http_status`.
///
/// ```rust
/// use redux_entity::{helpers::format_error_response, EntityConfig};
///
/// let config = EntityConfig::builder("users")
///     .parse_server_errors_fn(format_error_response)
///     .build()
///     .unwrap();
/// # let _ = config;
/// ```
pub fn format_error_response(error: &RemoteError) -> Errors {
    let body = error.body();
    let mut errors = Errors::new();

    let entries = body
        .pointer("/message/errors")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    for entry in entries {
        let Some(name) = entry.get("name").and_then(Value::as_str) else {
            continue;
        };
        let reason = match entry.get("reason") {
            Some(Value::String(reason)) => reason.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        };
        let joined = match errors.get(name).and_then(Value::as_str) {
            Some(previous) => format!("{previous}, {reason}"),
            None => reason,
        };
        errors.insert(name.to_string(), Value::String(joined));
    }

    if let Some(status) = body.get("status") {
        errors.insert("http_status".to_string(), status.clone());
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entities_except_id() {
        let entities = BTreeMap::from([
            ("1".to_string(), json!({ "name": "Gnar" })),
            ("2".to_string(), json!({ "name": "Dog" })),
        ]);

        assert_eq!(
            entities_except_id(&entities, &json!(1)),
            BTreeMap::from([("2".to_string(), json!({ "name": "Dog" }))])
        );
        assert_eq!(entities_except_id(&entities, &json!("3")), entities);

        let single = BTreeMap::from([("1".to_string(), json!({ "name": "Gnar" }))]);
        assert!(entities_except_id(&single, &json!("1")).is_empty());
    }

    #[test]
    fn test_format_error_response_without_messages() {
        let error = RemoteError::new(json!({
            "status": 422,
            "message": { "message": "Validation Failed", "errors": [] },
        }));
        assert_eq!(Value::Object(format_error_response(&error)), json!({ "http_status": 422 }));
    }

    #[test]
    fn test_format_error_response_joins_reasons() {
        let error = RemoteError::new(json!({
            "status": 422,
            "message": {
                "message": "Validation Failed",
                "errors": [
                    { "name": "first_name", "reason": "is not valid" },
                    { "name": "first_name", "reason": "must be something else" },
                    { "name": "last_name", "reason": "must be changed or something" },
                ],
            },
        }));
        assert_eq!(
            Value::Object(format_error_response(&error)),
            json!({
                "first_name": "is not valid, must be something else",
                "http_status": 422,
                "last_name": "must be changed or something",
            })
        );
    }

    #[test]
    fn test_format_error_response_without_status() {
        let error = RemoteError::new("connection reset");
        assert!(format_error_response(&error).is_empty());
    }
}
