//! Health check endpoint.

use axum::{Json, extract::State};

use crate::api::dto::health::HealthResponse;
use crate::state::AppState;

/// Reports service health including database and cache reachability.
///
/// # Endpoint
///
/// `GET /health`
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let database_up = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(state.pool.as_ref())
        .await
        .is_ok();

    let cache_up = state.cache.health_check().await;

    let status = if database_up && cache_up {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        database: if database_up { "up" } else { "down" },
        cache: if cache_up { "up" } else { "down" },
    })
}
