//! # Store Client
//!
//! The cloneable handle thunks dispatch through.

use super::message::StoreRequest;
use crate::action::Action;
use crate::error::EntityError;
use crate::reducer::EntityState;
use crate::thunk::Dispatch;
use tokio::sync::{mpsc, oneshot};
use tracing::warn;

/// Handle to a running [`StoreActor`](super::StoreActor).
///
/// Holds only a sender, so clones are cheap and can be moved into spawned
/// tasks. The actor stops once every clone is dropped.
#[derive(Debug, Clone)]
pub struct StoreClient {
    entity: String,
    sender: mpsc::UnboundedSender<StoreRequest>,
}

impl StoreClient {
    pub fn new(entity: impl Into<String>, sender: mpsc::UnboundedSender<StoreRequest>) -> Self {
        Self {
            entity: entity.into(),
            sender,
        }
    }

    /// Queues `action`, failing with [`EntityError::StoreClosed`] if the actor is gone.
    pub fn try_dispatch(&self, action: Action) -> Result<(), EntityError> {
        self.sender
            .send(StoreRequest::Dispatch(action))
            .map_err(|_| EntityError::StoreClosed)
    }

    /// A snapshot of the state after every action queued so far.
    pub async fn state(&self) -> Result<EntityState, EntityError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::GetState { respond_to })
            .map_err(|_| EntityError::StoreClosed)?;
        response.await.map_err(|_| EntityError::StoreDropped)
    }
}

impl Dispatch for StoreClient {
    fn dispatch(&self, action: Action) {
        if let Err(e) = self.try_dispatch(action) {
            warn!(entity = %self.entity, error = %e, "Dropping action");
        }
    }
}
