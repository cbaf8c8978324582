//! `taskboard` server binary.
//!
//! Serves the task-tracking HTTP API backed by `PostgreSQL`.
//!
//! # Usage
//!
//! ```bash
//! # Run on the default address 0.0.0.0:3000
//! DATABASE_URL=postgres://localhost/taskboard cargo run --bin taskboard
//!
//! # Custom address and config file
//! cargo run --bin taskboard -- --bind 127.0.0.1:8080 --config taskboard.toml
//! ```

use std::sync::Arc;

use clap::Parser;
use mockable::DefaultClock;
use taskboard::api::{TaskboardHandlers, http};
use taskboard::config::{AppConfig, CliArgs, ConfigError};
use taskboard::store::{self, StoreError};
use taskboard::task::{adapters::postgres::PostgresTaskRepository, services::TaskLifecycleService};
use taskboard::user::{
    adapters::postgres::PostgresUserRepository, services::UserRegistrationService,
};
use thiserror::Error;

#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },
    #[error("server terminated: {0}")]
    Serve(#[source] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let cli = CliArgs::parse();
    let config = AppConfig::load(&cli)?;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(
        addr = %config.bind_addr,
        policy = %config.transition_policy,
        "starting taskboard server"
    );

    let pool = store::open(&config.store).await?;
    let tasks = Arc::new(PostgresTaskRepository::new(pool.clone()));
    let users = Arc::new(PostgresUserRepository::new(pool));
    let clock = Arc::new(DefaultClock);

    let lifecycle = TaskLifecycleService::new(tasks, Arc::clone(&users), Arc::clone(&clock))
        .with_transition_policy(config.transition_policy);
    let registration = UserRegistrationService::new(users, clock);
    let app = http::router(Arc::new(TaskboardHandlers::new(lifecycle, registration)));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .map_err(|source| StartupError::Bind {
            addr: config.bind_addr.clone(),
            source,
        })?;
    tracing::info!(addr = %config.bind_addr, "taskboard listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(StartupError::Serve)?;

    tracing::info!("taskboard stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
