use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{AuthService, LinkService};
use crate::infrastructure::cache::ValidationCache;
use crate::infrastructure::persistence::{
    PgLinkRepository, PgRefreshTokenRepository, PgUserRepository,
};

/// Shared application state injected into all handlers.
#[derive(Clone)]
pub struct AppState {
    pub pool: Arc<PgPool>,
    pub link_service: Arc<LinkService<PgLinkRepository>>,
    pub auth_service: Arc<AuthService<PgUserRepository, PgRefreshTokenRepository>>,
    pub cache: Arc<dyn ValidationCache>,
    /// Base URL prepended to short codes in API responses.
    pub base_url: String,
}
