//! Bank back-office service - Main Application Entry Point
//!
//! A REST API for a minimal banking back office: it opens customer accounts,
//! reports balances, and records deposits and withdrawals in a transaction
//! ledger.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx (async queries)
//! - **Passwords**: argon2id hashes
//! - **Format**: JSON requests/responses
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Create database connection pool
//! 3. Run database migrations (unless disabled)
//! 4. Build the storage handles, services and HTTP router
//! 5. Serve until Ctrl-C / SIGTERM, then close the pool

mod config;
mod db;
mod error;
mod handlers;
mod models;
mod services;
mod store;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::{handlers::AppState, store::PgStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Reads RUST_LOG, defaults to "info"
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = config::Config::from_env()?;
    tracing::info!("Configuration loaded");

    let pool = db::create_pool(&config.database_url, config.database_max_connections).await?;
    tracing::info!(
        max_connections = config.database_max_connections,
        "Database pool created"
    );

    if config.run_migrations {
        db::run_migrations(&pool).await?;
        tracing::info!("Database migrations complete");
    } else {
        tracing::info!("Skipping migrations, schema is provisioned externally");
    }

    // One store serves as both account store and ledger
    let store = Arc::new(PgStore::new(pool.clone()));
    let state = AppState::new(store.clone(), store);
    let app = handlers::router(state);

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Database pool closed, shutting down");

    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
