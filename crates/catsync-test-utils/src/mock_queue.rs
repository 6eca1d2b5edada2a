// SPDX-FileCopyrightText: 2026 Catsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock cursor queue capturing every enqueued cursor.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use catsync_core::traits::{CursorQueue, SyncAdapter};
use catsync_core::{RepublishError, SyncCursor};

#[derive(Default)]
pub struct MockQueue {
    enqueued: Arc<Mutex<Vec<SyncCursor>>>,
    failing: Arc<AtomicBool>,
}

impl MockQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// A queue whose every enqueue fails with HTTP 503.
    pub fn failing() -> Self {
        let queue = Self::new();
        queue.failing.store(true, Ordering::SeqCst);
        queue
    }

    /// Successfully enqueued cursors, in order.
    pub async fn enqueued(&self) -> Vec<SyncCursor> {
        self.enqueued.lock().await.clone()
    }
}

impl SyncAdapter for MockQueue {
    fn name(&self) -> &str {
        "mock-queue"
    }
}

#[async_trait]
impl CursorQueue for MockQueue {
    async fn enqueue(&self, cursor: SyncCursor) -> Result<(), RepublishError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(RepublishError::Status {
                status: 503,
                body: "mock failure".to_string(),
            });
        }
        self.enqueued.lock().await.push(cursor);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn advance_records_the_next_cursor() {
        let queue = MockQueue::new();
        queue.advance(SyncCursor::new(3)).await.unwrap();
        assert_eq!(queue.enqueued().await, [SyncCursor::new(4)]);
    }

    #[tokio::test]
    async fn failing_queue_records_nothing() {
        let queue = MockQueue::failing();
        assert!(queue.advance(SyncCursor::START).await.is_err());
        assert!(queue.enqueued().await.is_empty());
    }
}
