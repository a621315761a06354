//! Demo: a `users` entity backed by an in-memory API.
//!
//! Walks through create, load all, update and destroy, then shows a failed
//! request and clearing its errors. Run with `RUST_LOG=info cargo run`.

use redux_entity::lifecycle::setup_tracing;
use redux_entity::{EntityConfig, EntityError, EntitySystem, Operation, RemoteError};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{info, warn, Instrument};

/// Stands in for a REST backend.
#[derive(Clone, Default)]
struct UsersApi {
    rows: Arc<Mutex<BTreeMap<u64, Value>>>,
    next_id: Arc<AtomicU64>,
}

impl UsersApi {
    fn rows(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<u64, Value>>, RemoteError> {
        self.rows
            .lock()
            .map_err(|_| RemoteError::new(json!({ "status": 500, "message": "poisoned" })))
    }

    fn create(&self, params: Value) -> Result<Value, RemoteError> {
        let Some(name) = params.get("name").and_then(Value::as_str) else {
            return Err(RemoteError::new(json!({
                "status": 422,
                "message": { "errors": [{ "name": "name", "reason": "can't be blank" }] },
            })));
        };
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let user = json!({ "id": id, "name": name });
        self.rows()?.insert(id, user.clone());
        Ok(user)
    }

    fn load_all(&self) -> Result<Value, RemoteError> {
        let users: Vec<Value> = self.rows()?.values().cloned().collect();
        let total = users.len();
        Ok(json!({ "users": users, "total": total }))
    }

    fn update(&self, params: Value) -> Result<Value, RemoteError> {
        let id = params.get("id").and_then(Value::as_u64).unwrap_or_default();
        let mut rows = self.rows()?;
        let Some(user) = rows.get_mut(&id) else {
            return Err(RemoteError::new(json!({ "status": 404 })));
        };
        if let Some(name) = params.get("name") {
            user["name"] = name.clone();
        }
        Ok(json!({ "users": [user.clone()] }))
    }

    fn destroy(&self, params: Value) -> Result<Value, RemoteError> {
        let id = params.get("id").and_then(Value::as_u64).unwrap_or_default();
        match self.rows()?.remove(&id) {
            Some(_) => Ok(Value::Null),
            None => Err(RemoteError::new(json!({ "status": 404 }))),
        }
    }
}

fn users_config(api: UsersApi) -> Result<EntityConfig, EntityError> {
    let (create, load_all, update, destroy) = (api.clone(), api.clone(), api.clone(), api);
    EntityConfig::builder("users")
        .create_fn(move |params: Value| {
            let api = create.clone();
            async move { api.create(params) }
        })
        .load_all_fn(move |_params: Value| {
            let api = load_all.clone();
            async move { api.load_all() }
        })
        .update_fn(move |params: Value| {
            let api = update.clone();
            async move { api.update(params) }
        })
        .destroy_fn(move |params: Value| {
            let api = destroy.clone();
            async move { api.destroy(params) }
        })
        .parse_api_response_fn(|response| {
            if response.get("users").is_some() {
                response["users"].clone()
            } else {
                response
            }
        })
        .parse_server_errors_fn(redux_entity::helpers::format_error_response)
        .build()
}

#[tokio::main]
async fn main() -> Result<(), EntityError> {
    setup_tracing();

    info!("Starting users demo");
    let system = EntitySystem::start(users_config(UsersApi::default())?);

    let span = tracing::info_span!("user_creation");
    async {
        for name in ["Gnar Mike", "Kolide"] {
            let user = system.run(Operation::Create, json!({ "name": name })).await?;
            info!(%user, "User created");
        }
        Ok::<_, EntityError>(())
    }
    .instrument(span)
    .await?;

    let users = system.run(Operation::LoadAll, json!({})).await?;
    info!(%users, "Users loaded");

    system
        .run(Operation::Update, json!({ "id": 1, "name": "Gnar" }))
        .await?;
    system.run(Operation::Destroy, json!({ "id": 2 })).await?;

    let span = tracing::info_span!("invalid_create");
    let rejected = system
        .run(Operation::Create, json!({}))
        .instrument(span)
        .await;
    if let Err(e) = rejected {
        let state = system.state().await?;
        warn!(error = %e, errors = ?state.errors, "Create rejected");
        system.dispatch(system.config.actions().clear_errors());
    }

    let state = system.shutdown().await?;
    let users: Vec<&Value> = state.sorted().collect();
    info!(?users, sorted_ids = ?state.sorted_ids, "Demo completed successfully");
    Ok(())
}
