//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server
//! starts.
//!
//! ## Required Variables
//!
//! - `JWT_SECRET` - HMAC secret for access-token signing
//! - Either `DATABASE_URL` or all of (`DB_HOST`, `DB_USER`, `DB_PASSWORD`, `DB_NAME`)
//!
//! ## Optional Variables
//!
//! - `REDIS_URL` - Redis connection for the validation cache; without it an
//!   in-process cache is used
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `BASE_URL` - Public base URL for short links (default: `http://localhost:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `SHORT_CODE_LENGTH` - Generated code length (default: 6)
//! - `LINK_TTL_DAYS` - Default link lifetime (default: 365)
//! - `REFRESH_TOKEN_TTL_SECONDS` - Refresh token lifetime (default: 86400)
//! - `VALIDATION_CACHE_TTL_SECONDS` - Positive-validation cache TTL (default: 300)
//! - `JWT_TTL_SECONDS` - Access token lifetime (default: 3600)
//! - `CLICK_QUEUE_CAPACITY` - Click event buffer size (default: 10000)

use anyhow::{Context, Result};
use std::env;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: Option<String>,
    pub listen_addr: String,
    pub base_url: String,
    pub log_level: String,
    pub log_format: String,

    /// HMAC secret used to sign access tokens. Must be non-empty.
    pub jwt_secret: String,
    /// Access token lifetime in seconds.
    pub jwt_ttl_seconds: i64,
    /// Refresh token lifetime in seconds.
    pub refresh_token_ttl_seconds: i64,
    /// TTL for cached positive token validations, independent of the
    /// token's own remaining lifetime.
    pub validation_cache_ttl_seconds: u64,

    /// Length of generated short codes.
    pub short_code_length: usize,
    /// Default link lifetime in days when the caller gives no expiry.
    pub link_ttl_days: i64,
    /// Click event channel capacity.
    pub click_queue_capacity: usize,

    // ── PgPool settings ─────────────────────────────────────────────────────
    /// Maximum number of connections in the pool (`DB_MAX_CONNECTIONS`, default: 10).
    pub db_max_connections: u32,
    /// Timeout for acquiring a connection from the pool in seconds
    /// (`DB_CONNECT_TIMEOUT`, default: 30).
    pub db_connect_timeout: u64,
    /// Idle connection lifetime in seconds before it is closed
    /// (`DB_IDLE_TIMEOUT`, default: 600).
    pub db_idle_timeout: u64,
    /// Maximum connection lifetime in seconds (`DB_MAX_LIFETIME`, default: 1800).
    pub db_max_lifetime: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required database configuration or `JWT_SECRET`
    /// is missing.
    pub fn from_env() -> Result<Self> {
        let database_url =
            Self::load_database_url().context("Failed to load database configuration")?;

        let redis_url = env::var("REDIS_URL").ok().filter(|v| !v.is_empty());

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let base_url =
            env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;

        let jwt_ttl_seconds = env_parse("JWT_TTL_SECONDS", 3600);
        let refresh_token_ttl_seconds = env_parse("REFRESH_TOKEN_TTL_SECONDS", 86_400);
        let validation_cache_ttl_seconds = env_parse("VALIDATION_CACHE_TTL_SECONDS", 300);

        let short_code_length = env_parse("SHORT_CODE_LENGTH", 6);
        let link_ttl_days = env_parse("LINK_TTL_DAYS", 365);
        let click_queue_capacity = env_parse("CLICK_QUEUE_CAPACITY", 10_000);

        let db_max_connections = env_parse("DB_MAX_CONNECTIONS", 10);
        let db_connect_timeout = env_parse("DB_CONNECT_TIMEOUT", 30);
        let db_idle_timeout = env_parse("DB_IDLE_TIMEOUT", 600);
        let db_max_lifetime = env_parse("DB_MAX_LIFETIME", 1800);

        Ok(Self {
            database_url,
            redis_url,
            listen_addr,
            base_url,
            log_level,
            log_format,
            jwt_secret,
            jwt_ttl_seconds,
            refresh_token_ttl_seconds,
            validation_cache_ttl_seconds,
            short_code_length,
            link_ttl_days,
            click_queue_capacity,
            db_max_connections,
            db_connect_timeout,
            db_idle_timeout,
            db_max_lifetime,
        })
    }

    /// Loads database URL with fallback to component-based configuration.
    ///
    /// Priority:
    /// 1. `DATABASE_URL` environment variable
    /// 2. Constructed from `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD`, `DB_NAME`
    fn load_database_url() -> Result<String> {
        if let Ok(url) = env::var("DATABASE_URL") {
            return Ok(url);
        }

        let host = env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string());
        let port = env::var("DB_PORT").unwrap_or_else(|_| "5432".to_string());
        let user =
            env::var("DB_USER").context("DB_USER must be set when DATABASE_URL is not provided")?;
        let password = env::var("DB_PASSWORD")
            .context("DB_PASSWORD must be set when DATABASE_URL is not provided")?;
        let name =
            env::var("DB_NAME").context("DB_NAME must be set when DATABASE_URL is not provided")?;

        Ok(format!(
            "postgres://{}:{}@{}:{}/{}",
            user, password, host, port, name
        ))
    }
}

/// Reads an env var and parses it, falling back to `default` when absent or
/// unparsable.
fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
