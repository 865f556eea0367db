// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! wfe-http: `axum` ingress for the workflow engine (§6) — routes, the
//! API-key check, and the periodic notification executor loop.

pub mod auth;
pub mod config;
pub mod defaults;
pub mod error;
pub mod executor_loop;
pub mod routes;
pub mod state;

pub use config::EngineConfig;
pub use state::AppState;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::Store;

/// The full router (§6's route table). Generic over the store so tests
/// can mount it against `wfe_storage::MemoryStore`.
pub fn router<S: Store + Send + Sync + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/", get(routes::liveness))
        .route("/events/:type_tag/:id", post(routes::dispatch_event::<S>))
        .route("/results/:type_tag/:id", post(routes::apply_result::<S>))
        .route("/notifications/dispatch", post(routes::trigger_notifications_dispatch::<S>))
        .route("/notifications/single", post(routes::send_single_notification::<S>))
        .route("/notifications/batch", post(routes::send_batch_notifications::<S>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
