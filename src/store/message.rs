//! # Store Messages
//!
//! The requests a [`StoreClient`](super::StoreClient) sends to its
//! [`StoreActor`](super::StoreActor).

use crate::action::Action;
use crate::reducer::EntityState;
use tokio::sync::oneshot;

/// One-shot channel the actor answers on.
pub type Response<T> = oneshot::Sender<T>;

/// A request to the store actor.
///
/// - **Dispatch**: fold an action into the state. Fire and forget.
/// - **GetState**: answer with a snapshot of the state. Because the channel is
///   FIFO, the snapshot reflects every action sent before it.
#[derive(Debug)]
pub enum StoreRequest {
    Dispatch(Action),
    GetState { respond_to: Response<EntityState> },
}
