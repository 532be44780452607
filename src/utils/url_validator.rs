//! Validation of URLs submitted for shortening.

use crate::error::AppError;
use serde_json::json;
use url::Url;

/// Checks that `raw` is an absolute `http` or `https` URL.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the URL fails to parse, is relative,
/// or uses any other scheme.
pub fn validate_url(raw: &str) -> Result<(), AppError> {
    let parsed = Url::parse(raw).map_err(|e| {
        AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(AppError::bad_request(
            "URL must start with http:// or https://",
            json!({ "scheme": other }),
        )),
    }
}
