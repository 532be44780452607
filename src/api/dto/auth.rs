//! DTOs for authentication endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::AuthTokens;
use crate::domain::token_signer::TokenValidation;

/// Request to register a new account.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Username cannot be empty"))]
    pub username: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,
}

/// Request to log in with existing credentials.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username cannot be empty"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
}

/// Request to exchange a refresh token for a new access token.
#[derive(Debug, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token cannot be empty"))]
    pub refresh_token: String,
}

/// Request to log out an owner.
#[derive(Debug, Deserialize, Validate)]
pub struct LogoutRequest {
    #[validate(length(min = 1, message = "Username cannot be empty"))]
    pub username: String,
}

/// Query parameters for the token validation endpoint.
#[derive(Debug, Deserialize)]
pub struct ValidateQuery {
    pub token: String,
}

/// Token pair returned after registration, login, or refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub username: String,
    pub email: String,
    pub token_type: &'static str,
}

impl From<AuthTokens> for AuthResponse {
    fn from(tokens: AuthTokens) -> Self {
        Self {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            username: tokens.username,
            email: tokens.email,
            token_type: "Bearer",
        }
    }
}

/// Result of validating an access token.
#[derive(Debug, Serialize)]
pub struct ValidationResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl From<TokenValidation> for ValidationResponse {
    fn from(validation: TokenValidation) -> Self {
        Self {
            valid: validation.valid,
            username: validation.username,
        }
    }
}

/// Simple acknowledgement message.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_rejects_short_password() {
        let request = RegisterRequest {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "12345".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_register_rejects_bad_email() {
        let request = RegisterRequest {
            username: "alice".to_string(),
            email: "not-an-email".to_string(),
            password: "hunter22".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_register_accepts_valid_input() {
        let request = RegisterRequest {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "hunter22".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_auth_response_token_type() {
        let response: AuthResponse = AuthTokens {
            access_token: "a".to_string(),
            refresh_token: "r".to_string(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
        }
        .into();

        assert_eq!(response.token_type, "Bearer");
    }

    #[test]
    fn test_validation_response_omits_absent_username() {
        let response: ValidationResponse = TokenValidation::invalid().into();
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"valid":false}"#);
    }
}
