// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `engine_notification`: runs the notification executor once against the
//! configured database and exits (§6). Intended to be driven by an
//! external scheduler (cron, a Kubernetes CronJob) for deployments that
//! don't want the always-on sweep in `engine_server`.

mod exit_error;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use exit_error::ExitError;
use wfe_dispatch::{DeliveryBackend, HttpClient, HttpDeliveryBackend, PassthroughAuth, QueueClient};
use wfe_engine::NotificationExecutor;
use wfe_http::defaults::PassthroughViewResolver;
use wfe_http::EngineConfig;
use wfe_storage::PostgresStore;

#[derive(Parser)]
#[command(name = "engine_notification", about = "Run the notification executor's periodic sweep once and exit")]
struct Args {
    /// Maximum Postgres connections to open for this one-shot run.
    #[arg(long, default_value_t = 2)]
    max_connections: u32,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).init();
    let args = Args::parse();

    match run(args).await {
        Ok(sent) => {
            tracing::info!(sent, "notification sweep complete");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "notification sweep failed");
            eprintln!("engine_notification: {err}");
            ExitCode::from(err.code as u8)
        }
    }
}

async fn run(args: Args) -> Result<usize, ExitError> {
    let config = EngineConfig::from_env()?;
    let store = PostgresStore::connect(&config.database_url, args.max_connections).await?;

    let http_client = HttpClient::new();
    let queue = QueueClient::new(
        http_client,
        config.torque_url.clone(),
        PassthroughAuth::new(vec!["ENGINE-API-KEY".to_string()], config.api_key.clone()),
    );
    let delivery: Arc<dyn DeliveryBackend> = Arc::new(HttpDeliveryBackend::new(queue, config.webhooks_url.clone()));
    let views: Arc<dyn wfe_core::ViewResolver> = Arc::new(PassthroughViewResolver);

    let executor = NotificationExecutor::new(delivery.as_ref(), views.as_ref());
    let sent = executor.run_periodic(&store, chrono::Utc::now()).await?;
    Ok(sent)
}
