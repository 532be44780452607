//! Click event model for asynchronous click counting.

/// A pending click-count increment for a short code.
///
/// Created by the resolve path and sent over a bounded channel so the
/// redirect response never waits on the counter write. Processed by
/// [`crate::domain::click_worker::run_click_worker`].
#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub code: String,
}

impl ClickEvent {
    /// Creates a new click event for `code`.
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}
