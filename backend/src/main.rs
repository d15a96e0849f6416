//! Main entry point for the account service.
//!
//! This file initializes the Axum web server, sets up the database connection
//! and schema, and registers the account routes.

mod api;
mod auth;
mod config;
mod database;
mod errors;
mod repositories;
mod services;
mod utils;

use anyhow::{Context, Result};
use auth::password::{PasswordHasher, PasswordPolicy};
use axum::{Extension, Router, routing::get};
use config::Config;
use database::Database;
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::fmt::init;
use utils::jwt::JwtUtils;

#[tokio::main]
async fn main() -> Result<()> {
    init();

    let config = Config::from_env()?;
    let db = Database::new(&config).await?;
    db.migrate().await?;

    let jwt_utils = Arc::new(JwtUtils::from_config(&config));
    let policy = PasswordPolicy::from_config(&config);
    if !policy.enforce_min_length {
        warn!("Minimum password length is not enforced");
    }
    let hasher = tokio::task::spawn_blocking(move || PasswordHasher::new(policy))
        .await
        .context("password hasher setup panicked")?
        .context("failed to build password hasher")?;

    let app = app_router(db.pool().clone(), jwt_utils, Arc::new(hasher));

    let bind_address = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {}", bind_address))?;

    info!("Starting account service on port {}", config.server_port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    db.close().await;
    Ok(())
}

/// Builds the full application router with its shared dependencies attached.
fn app_router(pool: SqlitePool, jwt_utils: Arc<JwtUtils>, hasher: Arc<PasswordHasher>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .merge(auth::routes::auth_router())
        .layer(Extension(pool))
        .layer(Extension(jwt_utils))
        .layer(Extension(hasher))
}

async fn root_handler() -> &'static str {
    "Hello, World!"
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
