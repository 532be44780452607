//! Pagination query parameters.

use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};

/// Pagination query parameters.
///
/// Uses `serde_with` to parse page numbers from query strings as integers.
/// Pages are zero-indexed.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<u32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub size: Option<u32>,
}

impl PaginationParams {
    /// Validates pagination parameters and converts to database offset/limit.
    ///
    /// # Defaults
    ///
    /// - `page`: 0
    /// - `size`: 10
    ///
    /// # Validation
    ///
    /// Page size must be between 1 and 100.
    ///
    /// # Returns
    ///
    /// `(page, size, offset, limit)` with offset/limit ready for SQL.
    pub fn validate_and_get_offset_limit(&self) -> Result<(u32, u32, i64, i64), String> {
        let page = self.page.unwrap_or(0);
        let size = self.size.unwrap_or(10);

        if !(1..=100).contains(&size) {
            return Err("Page size must be between 1 and 100".to_string());
        }

        let offset = (page as i64) * (size as i64);
        let limit = size as i64;

        Ok((page, size, offset, limit))
    }
}
