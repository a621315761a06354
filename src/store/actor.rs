//! # Store Actor
//!
//! Owns one entity's [`EntityState`] and folds dispatched actions into it, one
//! message at a time. Exclusive ownership inside the task means the state needs
//! no lock.

use super::client::StoreClient;
use super::message::StoreRequest;
use crate::config::EntityConfig;
use crate::reducer::EntityState;
use tokio::sync::mpsc;
use tracing::{debug, info};

pub struct StoreActor {
    config: EntityConfig,
    receiver: mpsc::UnboundedReceiver<StoreRequest>,
    state: EntityState,
}

impl StoreActor {
    /// Creates the actor and the client that talks to it. Nothing runs until
    /// [`StoreActor::run`] is spawned.
    pub fn new(config: EntityConfig) -> (Self, StoreClient) {
        Self::with_state(config, EntityState::initial())
    }

    /// Like [`StoreActor::new`], starting from a preloaded state.
    pub fn with_state(config: EntityConfig, state: EntityState) -> (Self, StoreClient) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let client = StoreClient::new(config.entity_name(), sender);
        let actor = Self {
            config,
            receiver,
            state,
        };
        (actor, client)
    }

    /// Processes requests until every client is dropped, then returns the
    /// final state.
    pub async fn run(mut self) -> EntityState {
        let entity = self.config.entity_name().to_string();
        info!(%entity, "Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Dispatch(action) => {
                    debug!(%entity, action_type = %action.action_type, "Dispatch");
                    let state = std::mem::take(&mut self.state);
                    self.state = self.config.reduce(state, &action);
                }
                StoreRequest::GetState { respond_to } => {
                    debug!(%entity, size = self.state.len(), "GetState");
                    let _ = respond_to.send(self.state.clone());
                }
            }
        }

        info!(%entity, size = self.state.len(), "Shutdown");
        self.state
    }
}
