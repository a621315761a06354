//! # Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered
//! by `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=info cargo run     # thunk spans, successes, failures, store start/stop
//! RUST_LOG=debug cargo run    # plus every dispatched action and handler params
//! ```
//!
//! With `RUST_LOG=info` a create looks like:
//!
//! ```text
//! INFO thunk: Request succeeded entity="users" operation=CREATE silent=false
//! ```
//!
//! Module paths are hidden; the `entity` field says where a line came from.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
