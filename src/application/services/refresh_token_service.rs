//! Refresh token issuance, verification, and revocation.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde_json::json;
use tracing::debug;

use crate::domain::entities::{NewRefreshToken, RefreshToken};
use crate::domain::repositories::{RefreshTokenRepository, UserRepository};
use crate::error::AppError;
use crate::utils::code_generator::generate_refresh_token;

/// Service enforcing single-active-refresh-token-per-owner semantics.
///
/// Issuing always rotates: the owner's previous token is removed before the
/// new one is inserted, inside one repository transaction. Verification does
/// not rotate; the same token string stays valid for repeated use until its
/// TTL elapses or a new `issue` replaces it.
pub struct RefreshTokenService<R: RefreshTokenRepository, U: UserRepository> {
    repository: Arc<R>,
    user_repository: Arc<U>,
    token_ttl: Duration,
}

impl<R: RefreshTokenRepository, U: UserRepository> RefreshTokenService<R, U> {
    /// Creates a new refresh token service.
    pub fn new(repository: Arc<R>, user_repository: Arc<U>, token_ttl_seconds: i64) -> Self {
        Self {
            repository,
            user_repository,
            token_ttl: Duration::seconds(token_ttl_seconds),
        }
    }

    /// Issues a fresh token for an owner, replacing any existing one.
    ///
    /// The token value is 256 random bits; uniqueness is probabilistic and
    /// not re-checked.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no user has this id.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn issue(&self, user_id: i64) -> Result<RefreshToken, AppError> {
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "user_id": user_id })))?;

        debug!(user_id = user.id, "Rotating refresh token");

        let new_token = NewRefreshToken {
            token: generate_refresh_token(),
            user_id: user.id,
            expiry_date: Utc::now() + self.token_ttl,
        };

        self.repository.replace_for_user(new_token).await
    }

    /// Exact-match token lookup. No side effects.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn find(&self, token: &str) -> Result<Option<RefreshToken>, AppError> {
        self.repository.find_by_token(token).await
    }

    /// Verifies a token and returns it unchanged.
    ///
    /// An expired token is deleted as a side effect before the error is
    /// returned, so later lookups come back empty.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no row holds this token.
    /// Returns [`AppError::Expired`] if the token is past its expiry date.
    pub async fn verify(&self, token: &str) -> Result<RefreshToken, AppError> {
        let stored = self
            .repository
            .find_by_token(token)
            .await?
            .ok_or_else(|| AppError::not_found("Invalid refresh token", json!({})))?;

        if stored.is_expired() {
            self.repository.delete_by_token(token).await?;

            return Err(AppError::expired(
                "Refresh token was expired. Please make a new signin request",
                json!({}),
            ));
        }

        Ok(stored)
    }

    /// Deletes every token belonging to an owner. Used on logout.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no user has this username.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn revoke_for_owner(&self, username: &str) -> Result<(), AppError> {
        let user = self
            .user_repository
            .find_by_username(username)
            .await?
            .ok_or_else(|| {
                AppError::not_found("User not found", json!({ "username": username }))
            })?;

        let removed = self.repository.delete_for_user(user.id).await?;

        debug!(user_id = user.id, removed, "Revoked refresh tokens");

        Ok(())
    }
}
