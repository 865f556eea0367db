// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `engine_server`: the default ingress binary (§6). Boots with an empty
//! `WorkflowEngine` — registering `allow`/`on`/`after`/`add_notification`
//! rules and resource types is per-application configuration, outside
//! this crate's scope (§1). A deployment that needs real rules links
//! `wfe-http::router` into its own binary instead of running this one.

use std::sync::Arc;
use std::time::Duration;

use wfe_bus::SubscriptionBus;
use wfe_core::{ResourceRegistry, RoleRegistry};
use wfe_dispatch::{DeliveryBackend, HttpClient, HttpDeliveryBackend, PassthroughAuth, QueueClient};
use wfe_engine::{NotificationRegistry, TransitionBinder, WorkflowEngine};
use wfe_fsm::EngineBuilder;
use wfe_http::defaults::{NullAddressBook, PassthroughViewResolver};
use wfe_http::{router, AppState, EngineConfig};
use wfe_storage::PostgresStore;

const NOTIFICATION_SWEEP_PERIOD: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).init();

    let config = EngineConfig::from_env()?;
    let store = Arc::new(PostgresStore::connect(&config.database_url, 10).await?);

    let engine = Arc::new(WorkflowEngine::new(
        ResourceRegistry::new(),
        EngineBuilder::new().build(),
        SubscriptionBus::new(),
        TransitionBinder::new(),
        NotificationRegistry::new(),
        RoleRegistry::new(),
    ));

    let http_client = HttpClient::new();
    let queue = QueueClient::new(
        http_client,
        config.torque_url.clone(),
        PassthroughAuth::new(vec!["ENGINE-API-KEY".to_string()], config.api_key.clone()),
    );
    let delivery: Arc<dyn DeliveryBackend> = Arc::new(HttpDeliveryBackend::new(queue, config.webhooks_url.clone()));
    let views: Arc<dyn wfe_core::ViewResolver> = Arc::new(PassthroughViewResolver);
    let addresses: Arc<dyn wfe_engine::AddressBook> = Arc::new(NullAddressBook);
    let config = Arc::new(config);

    wfe_http::executor_loop::spawn(store.clone(), delivery.clone(), views.clone(), NOTIFICATION_SWEEP_PERIOD);

    let state = AppState { store, engine, delivery, views, addresses, config };
    let app = router(state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
    tracing::info!(addr = "0.0.0.0:8080", "engine_server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
