//! Bearer token authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;

use crate::{error::AppError, state::AppState};

/// Username of the authenticated caller, injected into request extensions.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub String);

/// Authenticates requests using Bearer access tokens.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// # Authentication Flow
///
/// 1. Extract token from `Authorization` header
/// 2. Run it through the cached validation path
/// 3. Inject [`CurrentUser`] for downstream handlers
///
/// A positive validation may come from the cache; within the cache TTL a
/// token stays accepted here even if it was invalidated elsewhere.
///
/// # Errors
///
/// Returns `401 Unauthorized` if the header is missing or the token does
/// not validate.
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    let validation = st.auth_service.validate_token(&token).await;

    if !validation.valid {
        return Err(AppError::unauthorized(
            "Unauthorized",
            json!({"reason": "Invalid or expired token"}),
        ));
    }

    let username = validation.username.ok_or_else(|| {
        AppError::unauthorized(
            "Unauthorized",
            json!({"reason": "Token carries no owner"}),
        )
    })?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(CurrentUser(username));

    Ok(next.run(req).await)
}
