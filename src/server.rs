//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, cache setup, worker spawning, and Axum
//! server lifecycle.

use crate::application::services::{AuthService, LinkService, RefreshTokenService};
use crate::config::Config;
use crate::domain::click_worker::run_click_worker;
use crate::domain::token_signer::TokenSigner;
use crate::infrastructure::cache::{MemoryValidationCache, RedisValidationCache, ValidationCache};
use crate::infrastructure::jwt::JwtTokenSigner;
use crate::infrastructure::persistence::{
    PgLinkRepository, PgRefreshTokenRepository, PgUserRepository,
};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and migrations
/// - Validation cache (Redis, with in-memory fallback)
/// - Background click worker
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if the database connection, bind, or server runtime
/// fails.
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;

    let cache: Arc<dyn ValidationCache> = match &config.redis_url {
        Some(redis_url) => {
            match RedisValidationCache::connect(redis_url, config.validation_cache_ttl_seconds)
                .await
            {
                Ok(redis) => {
                    tracing::info!("Validation cache enabled (Redis)");
                    Arc::new(redis)
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to connect to Redis: {}. Using in-memory cache.",
                        e
                    );
                    Arc::new(MemoryValidationCache::new(
                        config.validation_cache_ttl_seconds,
                    ))
                }
            }
        }
        None => {
            tracing::info!("Validation cache enabled (in-memory)");
            Arc::new(MemoryValidationCache::new(
                config.validation_cache_ttl_seconds,
            ))
        }
    };

    let pool = Arc::new(pool);
    let link_repository = Arc::new(PgLinkRepository::new(pool.clone()));
    let user_repository = Arc::new(PgUserRepository::new(pool.clone()));
    let token_repository = Arc::new(PgRefreshTokenRepository::new(pool.clone()));

    let (click_tx, click_rx) = mpsc::channel(config.click_queue_capacity);
    tokio::spawn(run_click_worker(click_rx, link_repository.clone()));
    tracing::info!("Click worker started");

    let link_service = Arc::new(LinkService::new(
        link_repository,
        click_tx,
        config.short_code_length,
        config.link_ttl_days,
    ));

    let refresh_tokens = Arc::new(RefreshTokenService::new(
        token_repository,
        user_repository.clone(),
        config.refresh_token_ttl_seconds,
    ));

    let signer: Arc<dyn TokenSigner> =
        Arc::new(JwtTokenSigner::new(&config.jwt_secret, config.jwt_ttl_seconds));

    let auth_service = Arc::new(AuthService::new(
        user_repository,
        refresh_tokens,
        signer,
        cache.clone(),
    ));

    let state = AppState {
        pool,
        link_service,
        auth_service,
        cache,
        base_url: config.base_url.clone(),
    };

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;

    Ok(())
}
