//! Background worker applying click-count increments.

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::warn;

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::LinkRepository;

/// Drains the click channel and applies one atomic increment per event.
///
/// The increment is a single UPDATE expression in the repository, so
/// concurrent redirects to the same code never lose counts. A failed
/// increment is logged and dropped; it must never fail the redirect that
/// produced it.
///
/// Runs until the sending side is closed.
pub async fn run_click_worker<L: LinkRepository>(
    mut rx: mpsc::Receiver<ClickEvent>,
    repository: Arc<L>,
) {
    while let Some(event) = rx.recv().await {
        if let Err(e) = repository.increment_click_count(&event.code).await {
            warn!(code = %event.code, error = %e, "Failed to increment click count");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use serde_json::json;

    #[tokio::test]
    async fn test_worker_increments_each_event() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_increment_click_count()
            .withf(|code| code == "abc123")
            .times(3)
            .returning(|_| Ok(()));

        let (tx, rx) = mpsc::channel(16);
        let worker = tokio::spawn(run_click_worker(rx, Arc::new(mock_repo)));

        for _ in 0..3 {
            tx.send(ClickEvent::new("abc123")).await.unwrap();
        }
        drop(tx);

        worker.await.unwrap();
    }

    #[tokio::test]
    async fn test_worker_survives_increment_failure() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_increment_click_count()
            .times(2)
            .returning(|_| {
                Err(crate::error::AppError::internal("Database error", json!({})))
            });

        let (tx, rx) = mpsc::channel(16);
        let worker = tokio::spawn(run_click_worker(rx, Arc::new(mock_repo)));

        tx.send(ClickEvent::new("a")).await.unwrap();
        tx.send(ClickEvent::new("b")).await.unwrap();
        drop(tx);

        // Worker keeps draining after errors and exits cleanly.
        worker.await.unwrap();
    }
}
