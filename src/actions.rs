//! # Action Creators
//!
//! [`Actions`] is the per-entity set of action creators:
//!
//! | Creator | Produces |
//! |---------|----------|
//! | `clear_errors()` | `{type: CLEAR_ERRORS}` |
//! | `<op>_request()` | `{type: <OP>_REQUEST}` |
//! | `<op>_success(data)` | `{type: <OP>_SUCCESS, payload: {data}}` |
//! | `<op>_failure(errors)` | `{type: <OP>_FAILURE, payload: {errors}}` |
//! | `<op>(params)` | a [`Thunk`] driving the whole request |
//! | `silent_<op>(params)` | the same thunk, without dispatches |
//!
//! for `<op>` in `create`, `destroy`, `load` and `update`. `load_all` only has
//! `load_all_success`, `load_all` and `silent_load_all`; its request and
//! failure are the `load` ones.

use crate::action::{Action, Errors};
use crate::action_types::{ActionKind, Operation};
use crate::config::EntityConfig;
use crate::error::EntityError;
use crate::thunk::{Thunk, ThunkOptions};
use paste::paste;
use serde_json::Value;
use std::str::FromStr;

/// Action creators bound to one [`EntityConfig`].
#[derive(Clone, Copy)]
pub struct Actions<'a> {
    config: &'a EntityConfig,
}

impl<'a> Actions<'a> {
    pub(crate) fn new(config: &'a EntityConfig) -> Self {
        Self { config }
    }

    fn of_kind(&self, kind: ActionKind) -> &'a str {
        self.config.action_types().get(kind)
    }

    pub fn clear_errors(&self) -> Action {
        Action::new(self.of_kind(ActionKind::ClearErrors))
    }

    pub fn request(&self, operation: Operation) -> Action {
        Action::new(self.of_kind(operation.request_kind()))
    }

    pub fn success(&self, operation: Operation, data: Value) -> Action {
        Action::with_data(self.of_kind(operation.success_kind()), data)
    }

    pub fn failure(&self, operation: Operation, errors: Errors) -> Action {
        Action::with_errors(self.of_kind(operation.failure_kind()), errors)
    }

    /// Normalizes raw `records` through the schema and wraps the result with
    /// `creator`, e.g. `|data| actions.create_success(data)`.
    ///
    /// Every SUCCESS payload a thunk dispatches goes through here, so they all
    /// share the `{ <entity>: {..}, sortedIds: [..] }` shape.
    pub fn success_action<F>(&self, records: &Value, creator: F) -> Action
    where
        F: FnOnce(Value) -> Action,
    {
        creator(self.config.schema().normalize(records))
    }

    /// Builds a thunk for `operation`.
    ///
    /// Fails with [`EntityError::UnknownRequestType`] when no handler was
    /// configured for it, before anything is dispatched.
    pub fn thunk(
        &self,
        operation: Operation,
        params: Value,
        options: ThunkOptions,
    ) -> Result<Thunk, EntityError> {
        Thunk::new(self.config, operation, params, options)
    }

    /// Like [`Actions::thunk`], for an operation given by name (`"LOAD_ALL"`).
    pub fn thunk_for(
        &self,
        operation: &str,
        params: Value,
        options: ThunkOptions,
    ) -> Result<Thunk, EntityError> {
        self.thunk(Operation::from_str(operation)?, params, options)
    }

    pub fn load_all_success(&self, data: Value) -> Action {
        self.success(Operation::LoadAll, data)
    }

    pub fn load_all(&self, params: Value) -> Result<Thunk, EntityError> {
        self.thunk(Operation::LoadAll, params, ThunkOptions::default())
    }

    pub fn silent_load_all(&self, params: Value) -> Result<Thunk, EntityError> {
        self.thunk(Operation::LoadAll, params, ThunkOptions::silent())
    }
}

macro_rules! operation_creators {
    ($($op:ident => $variant:ident),* $(,)?) => {
        paste! {
            impl<'a> Actions<'a> {
                $(
                    pub fn [<$op _request>](&self) -> Action {
                        self.request(Operation::$variant)
                    }

                    pub fn [<$op _success>](&self, data: Value) -> Action {
                        self.success(Operation::$variant, data)
                    }

                    pub fn [<$op _failure>](&self, errors: Errors) -> Action {
                        self.failure(Operation::$variant, errors)
                    }

                    pub fn $op(&self, params: Value) -> Result<Thunk, EntityError> {
                        self.thunk(Operation::$variant, params, ThunkOptions::default())
                    }

                    pub fn [<silent_ $op>](&self, params: Value) -> Result<Thunk, EntityError> {
                        self.thunk(Operation::$variant, params, ThunkOptions::silent())
                    }
                )*
            }
        }
    };
}

operation_creators!(
    create => Create,
    destroy => Destroy,
    load => Load,
    update => Update,
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> EntityConfig {
        EntityConfig::builder("users").build().unwrap()
    }

    fn errors() -> Errors {
        let mut errors = Errors::new();
        errors.insert("base".into(), json!("something went wrong"));
        errors
    }

    #[test]
    fn test_clear_errors() {
        let config = config();
        assert_eq!(config.actions().clear_errors(), Action::new("users_CLEAR_ERRORS"));
    }

    #[test]
    fn test_request_creators_carry_no_payload() {
        let config = config();
        let actions = config.actions();
        assert_eq!(actions.create_request(), Action::new("users_CREATE_REQUEST"));
        assert_eq!(actions.destroy_request(), Action::new("users_DESTROY_REQUEST"));
        assert_eq!(actions.load_request(), Action::new("users_LOAD_REQUEST"));
        assert_eq!(actions.update_request(), Action::new("users_UPDATE_REQUEST"));
    }

    #[test]
    fn test_success_creators_set_data() {
        let config = config();
        let actions = config.actions();
        let data = json!({ "id": 1, "name": "Mike" });
        assert_eq!(
            actions.create_success(data.clone()),
            Action::with_data("users_CREATE_SUCCESS", data.clone())
        );
        assert_eq!(
            actions.destroy_success(data.clone()),
            Action::with_data("users_DESTROY_SUCCESS", data.clone())
        );
        assert_eq!(
            actions.load_success(data.clone()),
            Action::with_data("users_LOAD_SUCCESS", data.clone())
        );
        assert_eq!(
            actions.load_all_success(data.clone()),
            Action::with_data("users_LOAD_ALL_SUCCESS", data.clone())
        );
        assert_eq!(
            actions.update_success(data.clone()),
            Action::with_data("users_UPDATE_SUCCESS", data)
        );
    }

    #[test]
    fn test_failure_creators_set_errors() {
        let config = config();
        let actions = config.actions();
        assert_eq!(
            actions.create_failure(errors()),
            Action::with_errors("users_CREATE_FAILURE", errors())
        );
        assert_eq!(
            actions.destroy_failure(errors()),
            Action::with_errors("users_DESTROY_FAILURE", errors())
        );
        assert_eq!(
            actions.load_failure(errors()),
            Action::with_errors("users_LOAD_FAILURE", errors())
        );
        assert_eq!(
            actions.update_failure(errors()),
            Action::with_errors("users_UPDATE_FAILURE", errors())
        );
    }

    #[test]
    fn test_success_action_normalizes_records() {
        let config = config();
        let actions = config.actions();
        let action = actions.success_action(&json!([{ "id": 1, "name": "Mike" }]), |data| {
            actions.create_success(data)
        });
        assert_eq!(
            action,
            Action::with_data(
                "users_CREATE_SUCCESS",
                json!({ "users": { "1": { "id": 1, "name": "Mike" } }, "sortedIds": ["1"] })
            )
        );

        let empty = actions.success_action(&Value::Null, |data| actions.load_all_success(data));
        assert_eq!(empty.data(), Some(&json!({ "users": {}, "sortedIds": [] })));
    }

    #[test]
    fn test_thunk_for_unknown_name() {
        let config = config();
        let err = config
            .actions()
            .thunk_for("foobar", Value::Null, ThunkOptions::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "Unknown request type: foobar");
    }

    #[test]
    fn test_thunk_creators_report_missing_handlers() {
        let config = EntityConfig::builder("users")
            .load_fn(|params: Value| async move { Ok(params) })
            .build()
            .unwrap();
        let actions = config.actions();

        assert!(actions.load(Value::Null).is_ok());
        assert!(actions.silent_load(Value::Null).unwrap().is_silent());
        for result in [
            actions.create(Value::Null),
            actions.silent_destroy(Value::Null),
            actions.update(Value::Null),
            actions.load_all(Value::Null),
        ] {
            assert!(matches!(result, Err(EntityError::UnknownRequestType(_))));
        }
    }
}
