//! # Thunks
//!
//! A thunk is an action creator that does asynchronous work and dispatches
//! further actions while it runs. Here it is a plain value: build it with one of
//! the thunk creators on [`Actions`](crate::actions::Actions), then `run` it
//! against anything that can [`Dispatch`].
//!
//! ## Lifecycle
//!
//! 1. Dispatch the operation's REQUEST action (unless silent).
//! 2. Await the configured [`RequestHandler`].
//! 3. On success: parse the response, normalize it into the SUCCESS action,
//!    dispatch it (unless silent) and return the parsed data.
//! 4. On failure: format the rejection into the FAILURE action, dispatch it
//!    (unless silent) and return the original, unformatted rejection.
//!
//! Dispatches are synchronous and ordered. The only suspension point is the
//! handler call. There is no timeout and no cancellation; two thunks in flight
//! for the same entity race, and the last one to finish wins.

use crate::action::{Action, Errors};
use crate::action_types::Operation;
use crate::config::EntityConfig;
use crate::error::{EntityError, RemoteError};
use async_trait::async_trait;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, info_span, warn, Instrument};

/// An external call that a thunk drives: create, load, update, ...
///
/// Any `Fn(Value) -> impl Future<Output = Result<Value, RemoteError>>` closure
/// implements this trait, so most callers never implement it by hand.
#[async_trait]
pub trait RequestHandler: Send + Sync {
    async fn call(&self, params: Value) -> Result<Value, RemoteError>;
}

#[async_trait]
impl<F, Fut> RequestHandler for F
where
    F: Fn(Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value, RemoteError>> + Send + 'static,
{
    async fn call(&self, params: Value) -> Result<Value, RemoteError> {
        (self)(params).await
    }
}

/// The capability to hand an action to the store.
///
/// Dispatching must not block: the store applies the action within its own
/// dispatch cycle.
pub trait Dispatch: Send + Sync {
    fn dispatch(&self, action: Action);
}

impl<D: Dispatch + ?Sized> Dispatch for Arc<D> {
    fn dispatch(&self, action: Action) {
        (**self).dispatch(action)
    }
}

/// Options accepted by every thunk creator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThunkOptions {
    /// Suppress the REQUEST, SUCCESS and FAILURE dispatches.
    pub silent: bool,
}

impl ThunkOptions {
    pub fn silent() -> Self {
        Self { silent: true }
    }
}

/// A ready-to-run thunk. Creating one already checked that a handler exists.
pub struct Thunk {
    config: EntityConfig,
    operation: Operation,
    params: Value,
    options: ThunkOptions,
    handler: Arc<dyn RequestHandler>,
}

impl Thunk {
    pub(crate) fn new(
        config: &EntityConfig,
        operation: Operation,
        params: Value,
        options: ThunkOptions,
    ) -> Result<Self, EntityError> {
        let handler = config
            .handler(operation)
            .cloned()
            .ok_or_else(|| EntityError::UnknownRequestType(operation.to_string()))?;
        Ok(Self {
            config: config.clone(),
            operation,
            params,
            options,
            handler,
        })
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn params(&self) -> &Value {
        &self.params
    }

    pub fn is_silent(&self) -> bool {
        self.options.silent
    }

    /// Runs the call, dispatching lifecycle actions to `dispatch`.
    ///
    /// Resolves with the parsed response. A handler rejection comes back as
    /// [`EntityError::Remote`] holding the original rejection.
    pub async fn run<D>(self, dispatch: &D) -> Result<Value, EntityError>
    where
        D: Dispatch + ?Sized,
    {
        let span = info_span!(
            "thunk",
            entity = %self.config.entity_name(),
            operation = %self.operation,
            silent = self.options.silent,
        );
        self.execute(dispatch).instrument(span).await
    }

    async fn execute<D>(self, dispatch: &D) -> Result<Value, EntityError>
    where
        D: Dispatch + ?Sized,
    {
        let actions = self.config.actions();
        self.send(dispatch, || actions.request(self.operation));

        debug!(params = ?self.params, "Calling request handler");
        match self.handler.call(self.params.clone()).await {
            Ok(response) => {
                let parsed = match self.config.parse(response) {
                    Ok(parsed) => parsed,
                    Err(e) => {
                        warn!(error = %e, "Response parsing failed");
                        self.send(dispatch, || {
                            let mut errors = Errors::new();
                            errors.insert("base".to_string(), Value::String(e.to_string()));
                            actions.failure(self.operation, errors)
                        });
                        return Err(e);
                    }
                };

                let records = self.success_records(&parsed);
                self.send(dispatch, || {
                    actions.success_action(records, |data| actions.success(self.operation, data))
                });
                info!("Request succeeded");
                Ok(parsed)
            }
            Err(remote) => {
                warn!(error = %remote, "Request failed");
                self.send(dispatch, || {
                    actions.failure(self.operation, self.config.format_errors(&remote))
                });
                Err(EntityError::Remote(remote))
            }
        }
    }

    fn send<D>(&self, dispatch: &D, action: impl FnOnce() -> Action)
    where
        D: Dispatch + ?Sized,
    {
        if !self.options.silent {
            dispatch.dispatch(action());
        }
    }

    /// Records for the SUCCESS payload.
    ///
    /// Destroy endpoints commonly answer with an empty body; in that case the
    /// params name the removed entity.
    fn success_records<'a>(&'a self, parsed: &'a Value) -> &'a Value {
        let schema = self.config.schema();
        if self.operation == Operation::Destroy
            && !schema.has_ids(parsed)
            && schema.id_of(&self.params).is_some()
        {
            &self.params
        } else {
            parsed
        }
    }
}

impl std::fmt::Debug for Thunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Thunk")
            .field("entity", &self.config.entity_name())
            .field("operation", &self.operation)
            .field("params", &self.params)
            .field("options", &self.options)
            .finish()
    }
}
