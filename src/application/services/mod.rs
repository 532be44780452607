//! Business logic services for the application layer.

pub mod auth_service;
pub mod link_service;
pub mod refresh_token_service;

pub use auth_service::{AuthService, AuthTokens};
pub use link_service::LinkService;
pub use refresh_token_service::RefreshTokenService;
