//! # smarthoused — smarthouse daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialize logging
//! - Initialize the `SQLite` connection pool and run migrations
//! - Pick the controller (API or virtual house) and the notifier
//! - Construct the house manager, injecting adapters via port traits
//! - Start the periodic rule cycle
//! - Build the axum router, bind to a TCP port and serve
//! - Handle graceful shutdown (SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;
mod wiring;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use smarthouse_adapter_http_axum::router;
use smarthouse_adapter_http_axum::state::AppState;
use smarthouse_adapter_storage_sqlite_sqlx::SqliteSettingsRepository;
use smarthouse_app::scheduler::Scheduler;
use smarthouse_app::services::house_manager::HouseManager;
use smarthouse_domain::engine::RuleEngine;

use config::Config;
use wiring::{HouseController, HouseNotifier};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    init_tracing(&config.logging.filter);
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        database = %config.database_url(),
        "smarthoused starting"
    );

    // Database
    let db = smarthouse_adapter_storage_sqlite_sqlx::Config {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;
    let settings = SqliteSettingsRepository::new(db.pool().clone());

    // Ports
    let controller = HouseController::from_config(&config)?;
    let notifier = HouseNotifier::from_config(&config)?;
    let engine = RuleEngine::new(config.notifications.recipient.clone());

    // Services
    let manager = Arc::new(HouseManager::new(controller, settings, notifier, engine));
    let scheduler = Scheduler::start(Arc::clone(&manager), config.poll_interval());

    // HTTP
    let app = router::build(AppState::from_arc(manager));
    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(address = %bind_addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    scheduler.abort();
    tracing::info!("smarthoused stopped");
    Ok(())
}

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
