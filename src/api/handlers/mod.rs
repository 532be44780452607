//! HTTP request handlers for API endpoints.

pub mod auth;
pub mod health;
pub mod links;
pub mod redirect;
pub mod stats;

pub use auth::{
    login_handler, logout_handler, refresh_handler, register_handler, validate_handler,
};
pub use health::health_handler;
pub use links::{create_url_handler, delete_url_handler, list_urls_handler};
pub use redirect::redirect_handler;
pub use stats::stats_handler;
