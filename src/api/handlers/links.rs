//! Handlers for link management endpoints (create, list, delete).

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::links::{CreateUrlRequest, UrlListResponse, UrlResponse};
use crate::api::dto::pagination::PaginationParams;
use crate::api::middleware::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link owned by the authenticated caller.
///
/// # Endpoint
///
/// `POST /api/urls`
///
/// # Errors
///
/// Returns 400 Bad Request for a non-http(s) URL and 409 Conflict when the
/// requested custom alias is already taken (by any record, active or not).
pub async fn create_url_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(username)): Extension<CurrentUser>,
    Json(payload): Json<CreateUrlRequest>,
) -> Result<(StatusCode, Json<UrlResponse>), AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .create_link(payload.url, username, payload.custom_alias, payload.expires_at)
        .await?;

    let short_url = state
        .link_service
        .short_url(&state.base_url, &link.short_code);

    Ok((
        StatusCode::CREATED,
        Json(UrlResponse::from_link(link, short_url)),
    ))
}

/// Lists the caller's active links, newest first.
///
/// # Endpoint
///
/// `GET /api/urls?page=0&size=10`
pub async fn list_urls_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(username)): Extension<CurrentUser>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<UrlListResponse>, AppError> {
    let (page, size, offset, limit) = params
        .validate_and_get_offset_limit()
        .map_err(|message| AppError::bad_request(message, json!({})))?;

    let links = state
        .link_service
        .list_for_owner(&username, offset, limit)
        .await?;

    let items = links
        .into_iter()
        .map(|link| {
            let short_url = state
                .link_service
                .short_url(&state.base_url, &link.short_code);
            UrlResponse::from_link(link, short_url)
        })
        .collect();

    Ok(Json(UrlListResponse { items, page, size }))
}

/// Soft-deletes one of the caller's links.
///
/// # Endpoint
///
/// `DELETE /api/urls/{code}`
///
/// The record is deactivated, not removed; its code is never reused and
/// subsequent redirects answer 404.
///
/// # Errors
///
/// Returns 404 Not Found if no active link has this code and 401 if it
/// belongs to another owner.
pub async fn delete_url_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    Extension(CurrentUser(username)): Extension<CurrentUser>,
) -> Result<StatusCode, AppError> {
    state.link_service.delete_link(&code, &username).await?;

    Ok(StatusCode::NO_CONTENT)
}
