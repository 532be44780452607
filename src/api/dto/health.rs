//! DTOs for the health endpoint.

use serde::Serialize;

/// Health check response reporting dependency status.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
    pub cache: &'static str,
}
