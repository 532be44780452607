//! Handlers for authentication endpoints.

use axum::{
    Json,
    extract::{Query, State},
};
use validator::Validate;

use crate::api::dto::auth::{
    AuthResponse, LoginRequest, LogoutRequest, MessageResponse, RefreshTokenRequest,
    RegisterRequest, ValidateQuery, ValidationResponse,
};
use crate::error::AppError;
use crate::state::AppState;

/// Registers a new account.
///
/// # Endpoint
///
/// `POST /api/auth/register`
///
/// # Errors
///
/// Returns 400 Bad Request on invalid input, 409 Conflict on a taken
/// username or email.
pub async fn register_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate()?;

    let tokens = state
        .auth_service
        .register(&payload.username, &payload.email, &payload.password)
        .await?;

    Ok(Json(tokens.into()))
}

/// Logs in with username and password.
///
/// # Endpoint
///
/// `POST /api/auth/login`
///
/// Issuing the response rotates the caller's refresh token: any previously
/// issued refresh token for this account stops resolving.
///
/// # Errors
///
/// Returns 401 Unauthorized on bad credentials without revealing whether
/// the account exists.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate()?;

    let tokens = state
        .auth_service
        .login(&payload.username, &payload.password)
        .await?;

    Ok(Json(tokens.into()))
}

/// Exchanges a refresh token for a new access token.
///
/// # Endpoint
///
/// `POST /api/auth/refresh`
///
/// The refresh token in the response is the same string the client sent;
/// it remains valid until its TTL elapses or a new login replaces it.
///
/// # Errors
///
/// Returns 404 Not Found for an unknown token, 410 Gone for an expired one.
pub async fn refresh_handler(
    State(state): State<AppState>,
    Json(payload): Json<RefreshTokenRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate()?;

    let tokens = state.auth_service.refresh(&payload.refresh_token).await?;

    Ok(Json(tokens.into()))
}

/// Logs an owner out, revoking refresh tokens and evicting cached state.
///
/// # Endpoint
///
/// `POST /api/auth/logout`
pub async fn logout_handler(
    State(state): State<AppState>,
    Json(payload): Json<LogoutRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    payload.validate()?;

    state.auth_service.logout(&payload.username).await?;

    Ok(Json(MessageResponse {
        message: "Logged out successfully".to_string(),
    }))
}

/// Validates an access token.
///
/// # Endpoint
///
/// `GET /api/auth/validate?token=...`
///
/// Positive results may be served from the validation cache for up to its
/// TTL; negative results are always recomputed.
pub async fn validate_handler(
    State(state): State<AppState>,
    Query(query): Query<ValidateQuery>,
) -> Json<ValidationResponse> {
    let validation = state.auth_service.validate_token(&query.token).await;

    Json(validation.into())
}
