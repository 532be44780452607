//! Handler for per-owner link statistics.

use axum::{Extension, Json, extract::State};

use crate::api::dto::links::{StatsResponse, UrlResponse};
use crate::api::middleware::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Aggregated statistics for the authenticated caller.
///
/// # Endpoint
///
/// `GET /api/stats`
///
/// Counts and click totals are aggregated in the database; the top list is
/// the caller's five most-clicked active links.
pub async fn stats_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(username)): Extension<CurrentUser>,
) -> Result<Json<StatsResponse>, AppError> {
    let stats = state.link_service.stats_for_owner(&username).await?;

    let top_urls = stats
        .top_links
        .into_iter()
        .map(|link| {
            let short_url = state
                .link_service
                .short_url(&state.base_url, &link.short_code);
            UrlResponse::from_link(link, short_url)
        })
        .collect();

    Ok(Json(StatsResponse {
        total_urls: stats.active_count,
        total_clicks: stats.total_clicks,
        active_urls: stats.active_count,
        top_urls,
    }))
}
