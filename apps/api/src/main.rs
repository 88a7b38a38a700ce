//! # Armory API Server
//!
//! Process entry point: wires configuration, PostgreSQL, Redis, the two
//! services, the background token sweeper, and the axum router.
//!
//! ## Startup Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  .env ──► tracing ──► ApiConfig ──► PostgreSQL (+ migrations)       │
//! │                                          │                          │
//! │                                          ▼                          │
//! │                                  Redis ConnectionManager            │
//! │                                          │                          │
//! │                                          ▼                          │
//! │                 JwtManager ──► AuthService / GadgetService          │
//! │                                          │                          │
//! │                                          ▼                          │
//! │              token sweeper (tokio task) + axum::serve               │
//! │                                          │                          │
//! │                         SIGINT / SIGTERM ┘ graceful shutdown        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both store connections are required at startup. Once running, a Redis
//! outage only degrades caching (the ConnectionManager reconnects on its
//! own); a PostgreSQL outage surfaces as InternalError responses.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use armory_api::auth::JwtManager;
use armory_api::config::ApiConfig;
use armory_api::http::create_router;
use armory_api::services::{AuthService, GadgetService};
use armory_api::state::AppState;
use armory_api::tasks::spawn_token_sweeper;
use armory_cache::{CacheConfig, CacheStore};
use armory_core::random::ThreadRandom;
use armory_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("armory_api=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Armory API server...");

    let config = ApiConfig::load()?;
    info!(
        port = config.http_port,
        db_url = %config.database_url.chars().take(30).collect::<String>(),
        "Configuration loaded"
    );

    let db = Database::new(
        DbConfig::new(&config.database_url).max_connections(config.db_max_connections),
    )
    .await?;
    info!("Connected to PostgreSQL, migrations complete");

    let cache = CacheStore::connect(CacheConfig::new(&config.redis_url)).await?;
    info!("Connected to Redis");

    let jwt = Arc::new(JwtManager::new(
        config.jwt_secret.clone(),
        config.refresh_token_secret.clone(),
        config.jwt_access_lifetime_secs,
        config.jwt_refresh_lifetime_secs,
    ));

    let auth = AuthService::new(db.clone(), jwt);
    let gadgets = GadgetService::new(db.clone(), cache.clone(), Arc::new(ThreadRandom));
    let state = AppState::new(db.clone(), cache, auth, gadgets);

    let sweeper = spawn_token_sweeper(db, config.token_sweep_interval_secs);

    let app = create_router(state);
    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweeper.abort();
    info!("Server shutdown complete");

    Ok(())
}

/// Resolves on SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
