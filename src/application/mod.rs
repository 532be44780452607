//! Application layer services implementing business logic.
//!
//! Services consume repository traits from the domain layer and provide a
//! clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short link lifecycle
//! - [`services::refresh_token_service::RefreshTokenService`] - Refresh token rotation
//! - [`services::auth_service::AuthService`] - Credentials and cached token validation

pub mod services;
