//! Starting and stopping the store host, plus tracing setup.
//!
//! - [`EntitySystem`] spawns a [`StoreActor`](crate::StoreActor) for one entity
//!   and shuts it down again.
//! - [`setup_tracing`] installs the log subscriber.

mod entity_system;
pub mod tracing;

pub use self::entity_system::EntitySystem;
pub use self::tracing::setup_tracing;
