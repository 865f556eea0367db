// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The background worker that ships the transactional outbox (§9:
//! "Commit-coupled dispatch → transactional outbox... shipped by a
//! background worker"). Runs the notification executor's periodic sweep
//! on a fixed interval alongside the `axum` request tasks.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::interval;
use tracing::{info, warn};
use wfe_dispatch::DeliveryBackend;
use wfe_engine::NotificationExecutor;

use crate::state::Store;

/// Spawns the periodic sweep, returning its `JoinHandle` so callers can
/// await it at shutdown if they choose to.
pub fn spawn<S: Store + Send + Sync + 'static>(
    store: Arc<S>,
    delivery: Arc<dyn DeliveryBackend>,
    views: Arc<dyn wfe_core::ViewResolver>,
    period: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        loop {
            ticker.tick().await;
            let executor = NotificationExecutor::new(delivery.as_ref(), views.as_ref());
            match executor.run_periodic(store.as_ref(), chrono::Utc::now()).await {
                Ok(sent) => {
                    if sent > 0 {
                        info!(sent, "notification sweep delivered dispatches");
                    }
                }
                Err(err) => warn!(error = %err, "notification sweep failed, will retry next tick"),
            }
        }
    })
}
