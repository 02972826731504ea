//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, cache tier setup, and Axum server
//! lifecycle.

use crate::config::Config;
use crate::infrastructure::cache::{CacheBackend, InMemoryCache, LayeredCache, RedisCache};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - In-process primary cache, plus the Redis mirror when configured
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Database connection fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate");

    let primary: Arc<dyn CacheBackend> = Arc::new(InMemoryCache::new());
    let mirror: Option<Arc<dyn CacheBackend>> = if let Some(redis_url) = &config.redis_url {
        match RedisCache::connect(redis_url).await {
            Ok(redis) => {
                tracing::info!("Cache mirror enabled (Redis)");
                Some(Arc::new(redis))
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Running without mirror.", e);
                None
            }
        }
    } else {
        tracing::info!("Cache mirror disabled");
        None
    };

    let cache = Arc::new(LayeredCache::new(
        primary,
        mirror,
        Duration::from_secs(config.cache_ttl_seconds),
    ));

    let state = AppState::new(Arc::new(pool), cache);

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;

    Ok(())
}
