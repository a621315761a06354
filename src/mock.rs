//! # Mocks
//!
//! Test doubles for both ends of a thunk.
//!
//! - [`MockStore`] records every dispatched action instead of reducing it, so a
//!   test can assert on the exact sequence a thunk produced.
//! - [`MockApi`] is a [`RequestHandler`] driven by an expectation queue: each
//!   call pops the next expectation and answers with it.
//!
//! ```rust
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! use redux_entity::mock::{MockApi, MockStore};
//! use redux_entity::EntityConfig;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let api = Arc::new(MockApi::new());
//! api.expect_call().return_ok(json!([{ "id": 1 }]));
//!
//! let config = EntityConfig::builder("users")
//!     .load_all_handler(api.clone())
//!     .build()
//!     .unwrap();
//! let store = MockStore::new();
//! config.actions().load_all(json!({})).unwrap().run(&store).await.unwrap();
//!
//! assert_eq!(store.action_types(), vec!["users_LOAD_REQUEST", "users_LOAD_ALL_SUCCESS"]);
//! api.verify();
//! # }
//! ```

use crate::action::Action;
use crate::error::RemoteError;
use crate::thunk::{Dispatch, RequestHandler};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A dispatcher that only records.
#[derive(Debug, Clone, Default)]
pub struct MockStore {
    actions: Arc<Mutex<Vec<Action>>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every action dispatched so far, in order.
    pub fn actions(&self) -> Vec<Action> {
        lock(&self.actions).clone()
    }

    pub fn action_types(&self) -> Vec<String> {
        lock(&self.actions)
            .iter()
            .map(|action| action.action_type.clone())
            .collect()
    }

    /// The first recorded action of the given type.
    pub fn find(&self, action_type: &str) -> Option<Action> {
        lock(&self.actions)
            .iter()
            .find(|action| action.action_type == action_type)
            .cloned()
    }

    pub fn clear(&self) {
        lock(&self.actions).clear();
    }
}

impl Dispatch for MockStore {
    fn dispatch(&self, action: Action) {
        lock(&self.actions).push(action);
    }
}

/// A request handler answering from a queue of expectations.
///
/// A call with no expectation left panics, as does [`MockApi::verify`] with
/// expectations still queued.
#[derive(Debug, Default)]
pub struct MockApi {
    expectations: Arc<Mutex<VecDeque<Result<Value, RemoteError>>>>,
    calls: Arc<Mutex<Vec<Value>>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the answer to the next call.
    pub fn expect_call(&self) -> CallExpectationBuilder {
        CallExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// The params of every call received so far.
    pub fn calls(&self) -> Vec<Value> {
        lock(&self.calls).clone()
    }

    pub fn verify(&self) {
        let remaining = lock(&self.expectations).len();
        if remaining > 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

#[async_trait]
impl RequestHandler for MockApi {
    async fn call(&self, params: Value) -> Result<Value, RemoteError> {
        lock(&self.calls).push(params.clone());
        let next = lock(&self.expectations).pop_front();
        match next {
            Some(response) => response,
            None => panic!("Unexpected call with params {params}"),
        }
    }
}

/// Builder for one [`MockApi`] answer.
pub struct CallExpectationBuilder {
    expectations: Arc<Mutex<VecDeque<Result<Value, RemoteError>>>>,
}

impl CallExpectationBuilder {
    pub fn return_ok(self, response: Value) {
        lock(&self.expectations).push_back(Ok(response));
    }

    pub fn return_err(self, error: RemoteError) {
        lock(&self.expectations).push_back(Err(error));
    }
}
