//! A minimal store host: an actor that owns one [`EntityState`](crate::EntityState)
//! and a client that thunks dispatch through.
//!
//! ```rust
//! # async fn demo() -> Result<(), redux_entity::EntityError> {
//! use redux_entity::{Dispatch, EntityConfig, StoreActor};
//!
//! let config = EntityConfig::builder("users").build()?;
//! let (actor, store) = StoreActor::new(config.clone());
//! let handle = tokio::spawn(actor.run());
//!
//! store.dispatch(config.actions().load_request());
//! assert!(store.state().await?.loading);
//!
//! drop(store);
//! let final_state = handle.await.unwrap();
//! assert!(final_state.loading);
//! # Ok(())
//! # }
//! ```

mod actor;
mod client;
mod message;

pub use actor::StoreActor;
pub use client::StoreClient;
pub use message::{Response, StoreRequest};
