//! # Entity Configuration
//!
//! [`EntityConfig`] is built once per entity type and is the entry point to
//! everything else: its [`ActionTypes`], its [`Actions`] and its reducer.
//!
//! ```rust
//! use redux_entity::{EntityConfig, RemoteError};
//! use serde_json::{json, Value};
//!
//! let config = EntityConfig::builder("users")
//!     .load_all_fn(|_params: Value| async move {
//!         Ok::<_, RemoteError>(json!({ "users": [{ "id": 1, "name": "Gnar" }] }))
//!     })
//!     .parse_api_response_fn(|response| response["users"].clone())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(
//!     config.action_types().get(redux_entity::ActionKind::LoadAllSuccess),
//!     "users_LOAD_ALL_SUCCESS"
//! );
//! ```
//!
//! The config is immutable once built and cheap to clone; thunks keep a clone
//! so they can outlive the borrow they were created from.

use crate::action::{Action, Errors};
use crate::action_types::{ActionTypes, Operation};
use crate::actions::Actions;
use crate::error::{EntityError, RemoteError};
use crate::reducer::{self, EntityState};
use crate::schema::{Schema, SORTED_IDS_KEY};
use crate::thunk::RequestHandler;
use paste::paste;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tracing::debug;

/// Transforms a raw response, or one element of it.
pub type ParseFn = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// Turns a handler rejection into the errors carried by a FAILURE action.
pub type ErrorFormatter = Arc<dyn Fn(&RemoteError) -> Errors + Send + Sync>;

const PARSE_ENTITY_NOT_ARRAY: &str = "parseEntityFunc must be called on an array. Use the parseApiResponseFunc to format the response correctly.";

/// Configuration for one entity type.
#[derive(Clone)]
pub struct EntityConfig {
    inner: Arc<ConfigInner>,
}

struct ConfigInner {
    entity_name: String,
    schema: Schema,
    action_types: ActionTypes,
    handlers: HashMap<Operation, Arc<dyn RequestHandler>>,
    parse_api_response: Option<ParseFn>,
    parse_entity: Option<ParseFn>,
    parse_server_errors: Option<ErrorFormatter>,
}

impl EntityConfig {
    pub fn builder(entity_name: impl Into<String>) -> EntityConfigBuilder {
        EntityConfigBuilder::new(entity_name)
    }

    pub fn entity_name(&self) -> &str {
        &self.inner.entity_name
    }

    pub fn schema(&self) -> &Schema {
        &self.inner.schema
    }

    pub fn action_types(&self) -> &ActionTypes {
        &self.inner.action_types
    }

    pub fn actions(&self) -> Actions<'_> {
        Actions::new(self)
    }

    /// The request handler configured for `operation`, if any.
    pub fn handler(&self, operation: Operation) -> Option<&Arc<dyn RequestHandler>> {
        self.inner.handlers.get(&operation)
    }

    /// The state an entity starts from.
    pub fn initial_state() -> EntityState {
        EntityState::initial()
    }

    /// Applies the parse functions to a raw response.
    ///
    /// `parse_api_response_fn` runs first and may return any shape.
    /// `parse_entity_fn` is then mapped over every element, which requires an
    /// array at that point.
    pub fn parse(&self, response: Value) -> Result<Value, EntityError> {
        let response = match &self.inner.parse_api_response {
            Some(parse_api_response) => parse_api_response(response),
            None => response,
        };

        let Some(parse_entity) = &self.inner.parse_entity else {
            return Ok(response);
        };
        match response {
            Value::Array(items) => Ok(Value::Array(
                items.into_iter().map(|item| parse_entity(item)).collect(),
            )),
            _ => Err(EntityError::InvalidInput(PARSE_ENTITY_NOT_ARRAY.to_string())),
        }
    }

    /// Formats a rejection for the FAILURE payload.
    ///
    /// Without a configured formatter the body is used as is; a body that is not
    /// an object is carried under `base`.
    pub fn format_errors(&self, error: &RemoteError) -> Errors {
        if let Some(format) = &self.inner.parse_server_errors {
            return format(error);
        }
        match error.body() {
            Value::Object(errors) => errors.clone(),
            other => {
                let mut errors = Errors::new();
                errors.insert("base".to_string(), other.clone());
                errors
            }
        }
    }

    /// Folds `action` into `state`.
    pub fn reduce(&self, state: EntityState, action: &Action) -> EntityState {
        reducer::reduce(self.action_types(), self.schema(), state, action)
    }

    /// The reducer as a function of an optional previous state.
    ///
    /// `None` stands for "no state yet" and starts from [`EntityState::initial`].
    pub fn reducer(&self) -> impl Fn(Option<EntityState>, &Action) -> EntityState + '_ {
        move |state: Option<EntityState>, action: &Action| {
            self.reduce(state.unwrap_or_default(), action)
        }
    }
}

impl fmt::Debug for EntityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut operations: Vec<&str> = self.inner.handlers.keys().map(Operation::as_str).collect();
        operations.sort_unstable();
        f.debug_struct("EntityConfig")
            .field("entity_name", &self.inner.entity_name)
            .field("schema", &self.inner.schema)
            .field("operations", &operations)
            .field("parse_api_response", &self.inner.parse_api_response.is_some())
            .field("parse_entity", &self.inner.parse_entity.is_some())
            .field("parse_server_errors", &self.inner.parse_server_errors.is_some())
            .finish()
    }
}

/// Builder for [`EntityConfig`].
pub struct EntityConfigBuilder {
    entity_name: String,
    schema: Option<Schema>,
    handlers: HashMap<Operation, Arc<dyn RequestHandler>>,
    parse_api_response: Option<ParseFn>,
    parse_entity: Option<ParseFn>,
    parse_server_errors: Option<ErrorFormatter>,
}

/// Generates `<op>_fn` (closure) and `<op>_handler` (trait object) setters.
macro_rules! request_setters {
    ($($op:ident => $variant:ident),* $(,)?) => {
        paste! {
            impl EntityConfigBuilder {
                $(
                    pub fn [<$op _fn>]<F, Fut>(self, f: F) -> Self
                    where
                        F: Fn(Value) -> Fut + Send + Sync + 'static,
                        Fut: Future<Output = Result<Value, RemoteError>> + Send + 'static,
                    {
                        self.request_handler(Operation::$variant, Arc::new(f))
                    }

                    pub fn [<$op _handler>](self, handler: Arc<dyn RequestHandler>) -> Self {
                        self.request_handler(Operation::$variant, handler)
                    }
                )*
            }
        }
    };
}

request_setters!(
    create => Create,
    destroy => Destroy,
    load => Load,
    load_all => LoadAll,
    update => Update,
);

impl EntityConfigBuilder {
    pub fn new(entity_name: impl Into<String>) -> Self {
        Self {
            entity_name: entity_name.into(),
            schema: None,
            handlers: HashMap::new(),
            parse_api_response: None,
            parse_entity: None,
            parse_server_errors: None,
        }
    }

    /// Overrides the default schema (keyed by the entity name, id field `id`).
    pub fn schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn request_handler(
        mut self,
        operation: Operation,
        handler: Arc<dyn RequestHandler>,
    ) -> Self {
        self.handlers.insert(operation, handler);
        self
    }

    pub fn parse_api_response_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.parse_api_response = Some(Arc::new(f));
        self
    }

    pub fn parse_entity_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.parse_entity = Some(Arc::new(f));
        self
    }

    pub fn parse_server_errors_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&RemoteError) -> Errors + Send + Sync + 'static,
    {
        self.parse_server_errors = Some(Arc::new(f));
        self
    }

    pub fn build(self) -> Result<EntityConfig, EntityError> {
        if self.entity_name.is_empty() {
            return Err(EntityError::EmptyEntityName);
        }

        let schema = self
            .schema
            .unwrap_or_else(|| Schema::new(self.entity_name.clone()));
        if schema.key() == SORTED_IDS_KEY {
            return Err(EntityError::ReservedSchemaKey(schema.key().to_string()));
        }
        let action_types = ActionTypes::new(&self.entity_name);
        debug!(
            entity = %self.entity_name,
            operations = self.handlers.len(),
            "Entity configured"
        );

        Ok(EntityConfig {
            inner: Arc::new(ConfigInner {
                entity_name: self.entity_name,
                schema,
                action_types,
                handlers: self.handlers,
                parse_api_response: self.parse_api_response,
                parse_entity: self.parse_entity,
                parse_server_errors: self.parse_server_errors,
            }),
        })
    }
}
