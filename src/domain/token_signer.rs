//! Access-token signing contract.
//!
//! Refresh tokens are opaque database rows; access tokens are signed values
//! verified without a database round trip. The signing scheme itself is a
//! collaborator concern behind this trait.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Outcome of verifying an access token.
///
/// Serializable so positive results can live in the validation cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenValidation {
    pub valid: bool,
    pub username: Option<String>,
}

impl TokenValidation {
    /// A successful validation for the given owner.
    pub fn valid(username: impl Into<String>) -> Self {
        Self {
            valid: true,
            username: Some(username.into()),
        }
    }

    /// A failed validation. Carries no owner.
    pub fn invalid() -> Self {
        Self {
            valid: false,
            username: None,
        }
    }
}

/// Signs and verifies access tokens for an owner username.
///
/// # Implementations
///
/// - [`crate::infrastructure::jwt::JwtTokenSigner`] - HMAC-signed JWTs
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
pub trait TokenSigner: Send + Sync {
    /// Signs a new access token for `username`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if signing fails.
    fn sign(&self, username: &str) -> Result<String, AppError>;

    /// Verifies a token's signature and expiry.
    ///
    /// Never fails: malformed, tampered, and expired tokens all yield
    /// [`TokenValidation::invalid`].
    fn verify(&self, token: &str) -> TokenValidation;
}
