//! # redux-entity
//!
//! Uniform CRUD action creators and a normalized reducer for a named entity.
//!
//! Configure an entity once with its request handlers and get back:
//!
//! - **Action types**: the 14 `"{entity}_{SUFFIX}"` strings ([`ActionTypes`]).
//! - **Action creators**: plain REQUEST/SUCCESS/FAILURE/CLEAR_ERRORS creators,
//!   plus thunks that call a handler and dispatch the whole sequence
//!   ([`Actions`], [`Thunk`]).
//! - **A reducer**: folds those actions into
//!   `{ loading, errors, data, sortedIds }` ([`EntityState`]).
//!
//! ```rust
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), redux_entity::EntityError> {
//! use redux_entity::{EntityConfig, EntitySystem, RemoteError};
//! use serde_json::{json, Value};
//!
//! let config = EntityConfig::builder("users")
//!     .create_fn(|params: Value| async move {
//!         Ok::<_, RemoteError>(json!({ "id": 1, "name": params["name"] }))
//!     })
//!     .build()?;
//!
//! let system = EntitySystem::start(config.clone());
//! config
//!     .actions()
//!     .create(json!({ "name": "Gnar" }))?
//!     .run(&system.store)
//!     .await?;
//!
//! let state = system.shutdown().await?;
//! assert_eq!(state.sorted_ids, vec!["1"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module tour
//!
//! - [`config`]: [`EntityConfig`] and its builder, response parsing.
//! - [`actions`] and [`thunk`]: creators and the async request lifecycle.
//! - [`reducer`]: the state transition table.
//! - [`store`] and [`lifecycle`]: a small actor-based host to run thunks against.
//! - [`mock`]: [`MockStore`](mock::MockStore) and [`MockApi`](mock::MockApi) for tests.
//!
//! Logging goes through `tracing`; call [`lifecycle::setup_tracing`] once and
//! filter with `RUST_LOG`.

pub mod action;
pub mod action_types;
pub mod actions;
pub mod config;
pub mod error;
pub mod helpers;
pub mod lifecycle;
pub mod mock;
pub mod reducer;
pub mod schema;
pub mod store;
pub mod thunk;

pub use action::{Action, Errors, Payload};
pub use action_types::{ActionKind, ActionTypes, Operation, Phase};
pub use actions::Actions;
pub use config::{EntityConfig, EntityConfigBuilder};
pub use error::{EntityError, RemoteError};
pub use lifecycle::EntitySystem;
pub use reducer::EntityState;
pub use schema::Schema;
pub use store::{StoreActor, StoreClient, StoreRequest};
pub use thunk::{Dispatch, RequestHandler, Thunk, ThunkOptions};
