//! API route configuration.

use crate::api::handlers::{
    create_url_handler, delete_url_handler, list_urls_handler, login_handler, logout_handler,
    refresh_handler, register_handler, stats_handler, validate_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

/// Authentication routes, publicly reachable.
///
/// # Endpoints
///
/// - `POST /register` - Create an account, returns a token pair
/// - `POST /login`    - Authenticate, rotates the refresh token
/// - `POST /refresh`  - Exchange a refresh token for a new access token
/// - `POST /logout`   - Revoke refresh tokens and evict cached state
/// - `GET  /validate` - Validate an access token (cached)
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .route("/refresh", post(refresh_handler))
        .route("/logout", post(logout_handler))
        .route("/validate", get(validate_handler))
}

/// Link routes, protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `POST   /urls`        - Create a short link
/// - `GET    /urls`        - List the caller's active links (paginated)
/// - `DELETE /urls/{code}` - Soft-delete one of the caller's links
/// - `GET    /stats`       - Aggregated statistics for the caller
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/urls", post(create_url_handler).get(list_urls_handler))
        .route("/urls/{code}", delete(delete_url_handler))
        .route("/stats", get(stats_handler))
}
