use crate::action::Action;
use crate::action_types::Operation;
use crate::config::EntityConfig;
use crate::error::EntityError;
use crate::reducer::EntityState;
use crate::store::{StoreActor, StoreClient};
use crate::thunk::{Dispatch, ThunkOptions};
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// One entity wired to a running store.
///
/// ```ignore
/// let system = EntitySystem::start(config);
/// system.run(Operation::LoadAll, json!({})).await?;
/// let state = system.shutdown().await?;
/// ```
pub struct EntitySystem {
    /// The entity's configuration; thunks are built from it.
    pub config: EntityConfig,

    /// Client for the store actor. Clone it to dispatch from other tasks.
    pub store: StoreClient,

    handle: JoinHandle<EntityState>,
}

impl EntitySystem {
    /// Spawns the store actor. Must be called inside a Tokio runtime.
    pub fn start(config: EntityConfig) -> Self {
        let (actor, store) = StoreActor::new(config.clone());
        let handle = tokio::spawn(actor.run());
        info!(entity = %config.entity_name(), "Entity system started");
        Self {
            config,
            store,
            handle,
        }
    }

    /// Builds and runs the thunk for `operation` against the store.
    pub async fn run(&self, operation: Operation, params: Value) -> Result<Value, EntityError> {
        self.config
            .actions()
            .thunk(operation, params, ThunkOptions::default())?
            .run(&self.store)
            .await
    }

    pub fn dispatch(&self, action: Action) {
        self.store.dispatch(action);
    }

    pub async fn state(&self) -> Result<EntityState, EntityError> {
        self.store.state().await
    }

    /// Drops this system's client and waits for the actor to drain its queue.
    ///
    /// Clones of [`EntitySystem::store`] handed out earlier keep the actor alive
    /// until they are dropped too.
    pub async fn shutdown(self) -> Result<EntityState, EntityError> {
        info!(entity = %self.config.entity_name(), "Shutting down entity system");
        drop(self.store);

        match self.handle.await {
            Ok(state) => {
                info!(size = state.len(), "Entity system shutdown complete");
                Ok(state)
            }
            Err(e) => {
                error!("Store task failed: {:?}", e);
                Err(EntityError::StoreDropped)
            }
        }
    }
}
