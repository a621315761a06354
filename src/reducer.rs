//! # Reducer
//!
//! The pure state transition for one entity. It recognizes only the entity's own
//! 14 action types; anything else returns the state untouched, so the reducer
//! can sit next to other reducers in the same store.

use crate::action::{Action, Errors};
use crate::action_types::{ActionKind, ActionTypes, Phase};
use crate::schema::{coerce_id, Schema, SORTED_IDS_KEY};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// The state slice owned by one entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityState {
    pub loading: bool,
    pub errors: Errors,
    pub data: BTreeMap<String, Value>,
    pub sorted_ids: Vec<String>,
}

impl EntityState {
    /// `{ loading: false, errors: {}, data: {}, sortedIds: [] }`
    pub fn initial() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&Value> {
        self.data.get(id)
    }

    /// Entities in `sorted_ids` order.
    pub fn sorted(&self) -> impl Iterator<Item = &Value> + '_ {
        self.sorted_ids.iter().filter_map(|id| self.data.get(id))
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

pub(crate) fn reduce(
    types: &ActionTypes,
    schema: &Schema,
    mut state: EntityState,
    action: &Action,
) -> EntityState {
    let Some(kind) = types.kind_of(&action.action_type) else {
        return state;
    };
    debug!(entity = %schema.key(), action_type = %action.action_type, "Reducing");

    match kind {
        ActionKind::ClearErrors => {
            state.errors = Errors::new();
        }
        ActionKind::LoadAllSuccess => {
            let data = action.data();
            state.loading = false;
            state.errors = Errors::new();
            state.data = success_entities(schema, data);
            state.sorted_ids = dedup(success_ids(schema, data));
        }
        ActionKind::CreateSuccess | ActionKind::UpdateSuccess | ActionKind::LoadSuccess => {
            let data = action.data();
            state.loading = false;
            state.errors = Errors::new();
            state.data.extend(success_entities(schema, data));
            let mut seen: HashSet<String> = state.sorted_ids.iter().cloned().collect();
            for id in success_ids(schema, data) {
                if seen.insert(id.clone()) {
                    state.sorted_ids.push(id);
                }
            }
        }
        ActionKind::DestroySuccess => {
            state.loading = false;
            state.errors = Errors::new();
            let destroyed: HashSet<String> =
                destroyed_ids(schema, action.data()).into_iter().collect();
            for id in &destroyed {
                state.data.remove(id);
            }
            state.sorted_ids.retain(|kept| !destroyed.contains(kept));
        }
        other => match other.phase() {
            Some(Phase::Request) => {
                state.loading = true;
                state.errors = Errors::new();
            }
            Some(Phase::Failure) => {
                state.loading = false;
                state.errors = action.errors().cloned().unwrap_or_default();
            }
            _ => {}
        },
    }
    state
}

/// The `payload.data[key]` map of a normalized payload.
fn success_entities(schema: &Schema, data: Option<&Value>) -> BTreeMap<String, Value> {
    data.and_then(|data| data.get(schema.key()))
        .and_then(Value::as_object)
        .map(|entities| {
            entities
                .iter()
                .map(|(id, entity)| (id.clone(), entity.clone()))
                .collect()
        })
        .unwrap_or_default()
}

/// `payload.data.sortedIds`, or the entity map's keys when absent.
fn success_ids(schema: &Schema, data: Option<&Value>) -> Vec<String> {
    match data.and_then(|data| data.get(SORTED_IDS_KEY)) {
        Some(Value::Array(ids)) => ids.iter().filter_map(coerce_id).collect(),
        _ => success_entities(schema, data).into_keys().collect(),
    }
}

fn destroyed_ids(schema: &Schema, data: Option<&Value>) -> Vec<String> {
    let Some(data) = data else {
        return Vec::new();
    };
    match data {
        Value::Object(fields)
            if fields.contains_key(schema.key()) || fields.contains_key(SORTED_IDS_KEY) =>
        {
            let mut ids = success_ids(schema, Some(data));
            ids.extend(success_entities(schema, Some(data)).into_keys());
            ids
        }
        Value::Array(items) => items
            .iter()
            .filter_map(|item| destroyed_id(schema, item))
            .collect(),
        single => destroyed_id(schema, single).into_iter().collect(),
    }
}

/// `{id: 1}`, or a bare id.
fn destroyed_id(schema: &Schema, value: &Value) -> Option<String> {
    match value {
        Value::Object(_) => schema.id_of(value),
        other => coerce_id(other),
    }
}

/// Drops repeated ids, keeping first positions.
fn dedup(ids: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EntityConfig;
    use serde_json::json;

    fn config() -> EntityConfig {
        EntityConfig::builder("users").build().unwrap()
    }

    fn user() -> Value {
        json!({ "id": 1, "name": "Gnar Mike" })
    }

    fn loaded() -> EntityState {
        EntityState {
            data: BTreeMap::from([("1".to_string(), user())]),
            sorted_ids: vec!["1".to_string()],
            ..EntityState::initial()
        }
    }

    fn auth_errors() -> Errors {
        let mut errors = Errors::new();
        errors.insert("base".into(), json!("User is not authenticated"));
        errors
    }

    #[test]
    fn test_large_collections_reduce_in_linear_time() {
        let config = config();
        let actions = config.actions();
        let records = Value::Array((0..50_000).map(|id| json!({ "id": id })).collect());
        let started = std::time::Instant::now();

        let load_all = actions.success_action(&records, |data| actions.load_all_success(data));
        let state = config.reduce(EntityState::initial(), &load_all);
        assert_eq!(state.sorted_ids.len(), 50_000);

        let reload = actions.success_action(&records, |data| actions.load_success(data));
        let state = config.reduce(state, &reload);
        assert_eq!(state.sorted_ids.len(), 50_000);
        assert_eq!(state.sorted_ids.first().map(String::as_str), Some("0"));
        assert_eq!(state.sorted_ids.last().map(String::as_str), Some("49999"));

        let first_half = Value::Array((0..25_000).map(|id| json!(id)).collect());
        let destroy = actions.destroy_success(first_half);
        let state = config.reduce(state, &destroy);
        assert_eq!(state.len(), 25_000);
        assert_eq!(state.sorted_ids.len(), 25_000);
        assert_eq!(state.sorted_ids.first().map(String::as_str), Some("25000"));

        assert!(
            started.elapsed() < std::time::Duration::from_secs(10),
            "reducing 50k ids took {:?}",
            started.elapsed()
        );
    }

    #[test]
    fn test_foreign_action_from_no_state_yields_initial() {
        let config = config();
        let reducer = config.reducer();
        assert_eq!(reducer(None, &Action::new("FOOBAR")), EntityState::initial());
    }

    #[test]
    fn test_state_serializes_camel_case() {
        assert_eq!(
            serde_json::to_value(loaded()).unwrap(),
            json!({
                "loading": false,
                "errors": {},
                "data": { "1": { "id": 1, "name": "Gnar Mike" } },
                "sortedIds": ["1"],
            })
        );
    }

    #[test]
    fn test_request_sets_loading_and_clears_errors() {
        let config = config();
        let state = EntityState {
            errors: auth_errors(),
            ..loaded()
        };
        let next = config.reduce(state, &config.actions().update_request());
        assert!(next.loading);
        assert!(next.errors.is_empty());
        assert_eq!(next.data, loaded().data);
    }

    #[test]
    fn test_create_success_adds_entity() {
        let config = config();
        let actions = config.actions();
        let action = actions.success_action(&json!([user()]), |data| actions.create_success(data));
        assert_eq!(config.reduce(EntityState::initial(), &action), loaded());
    }

    #[test]
    fn test_update_success_replaces_entity_and_keeps_order() {
        let config = config();
        let actions = config.actions();
        let renamed = json!({ "id": 1, "name": "Kolide", "something": "else" });
        let action = actions.success_action(&json!([{ "id": 2 }, renamed]), |data| {
            actions.update_success(data)
        });

        let next = config.reduce(loaded(), &action);
        assert_eq!(next.get("1"), Some(&renamed));
        assert_eq!(next.sorted_ids, vec!["1", "2"]);
    }

    #[test]
    fn test_load_all_success_replaces_everything() {
        let config = config();
        let actions = config.actions();
        let joe = json!({ "id": 101, "name": "Joe Schmoe" });
        let action = actions.success_action(&json!([joe]), |data| actions.load_all_success(data));

        let next = config.reduce(loaded(), &action);
        assert_eq!(next.data, BTreeMap::from([("101".to_string(), joe)]));
        assert_eq!(next.sorted_ids, vec!["101"]);
        assert!(!next.loading);
    }

    #[test]
    fn test_success_without_sorted_ids_uses_entity_keys() {
        let config = config();
        let action = config
            .actions()
            .load_success(json!({ "users": { "7": { "id": 7 } } }));
        let next = config.reduce(EntityState::initial(), &action);
        assert_eq!(next.sorted_ids, vec!["7"]);
    }

    #[test]
    fn test_destroy_success_accepts_id_object_bare_id_and_payload() {
        let config = config();
        let actions = config.actions();

        for data in [
            json!({ "id": 1 }),
            json!(1),
            json!("1"),
            json!({ "users": { "1": { "id": 1 } }, "sortedIds": ["1"] }),
        ] {
            let next = config.reduce(loaded(), &actions.destroy_success(data.clone()));
            assert_eq!(
                next,
                EntityState::initial(),
                "destroying with {data} should empty the state"
            );
        }
    }

    #[test]
    fn test_destroy_of_unknown_id_is_harmless() {
        let config = config();
        let state = EntityState {
            loading: true,
            ..loaded()
        };
        let next = config.reduce(state, &config.actions().destroy_success(json!({ "id": 42 })));
        assert!(!next.loading);
        assert_eq!(next.data, loaded().data);
    }

    #[test]
    fn test_failure_replaces_errors_and_keeps_data() {
        let config = config();
        let state = EntityState {
            loading: true,
            ..loaded()
        };
        let next = config.reduce(state, &config.actions().destroy_failure(auth_errors()));
        assert_eq!(
            next,
            EntityState {
                errors: auth_errors(),
                ..loaded()
            }
        );
    }

    #[test]
    fn test_clear_errors_only_touches_errors() {
        let config = config();
        let state = EntityState {
            loading: true,
            errors: auth_errors(),
            ..loaded()
        };
        let next = config.reduce(state, &config.actions().clear_errors());
        assert_eq!(
            next,
            EntityState {
                loading: true,
                ..loaded()
            }
        );
    }

    #[test]
    fn test_other_entities_are_ignored() {
        let users = config();
        let posts = EntityConfig::builder("posts").build().unwrap();
        let next = users.reduce(loaded(), &posts.actions().load_request());
        assert_eq!(next, loaded());
    }

    #[test]
    fn test_custom_schema_key() {
        let config = EntityConfig::builder("users")
            .schema(Schema::new("people"))
            .build()
            .unwrap();
        let actions = config.actions();
        let action = actions.success_action(&json!([user()]), |data| actions.load_success(data));
        assert_eq!(action.data(), Some(&json!({ "people": { "1": user() }, "sortedIds": ["1"] })));
        assert_eq!(config.reduce(EntityState::initial(), &action), loaded());
    }
}
