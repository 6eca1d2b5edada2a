// SPDX-FileCopyrightText: 2026 Catsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-process cursor queue for the local driver.

use async_trait::async_trait;
use catsync_core::traits::{CursorQueue, SyncAdapter};
use catsync_core::{RepublishError, SyncCursor};
use tokio::sync::mpsc;

use crate::envelope::encode_cursor;

/// Sending half: enqueues encoded cursor payloads on an mpsc channel.
#[derive(Debug, Clone)]
pub struct LocalQueue {
    tx: mpsc::UnboundedSender<Vec<u8>>,
}

/// Receiving half, drained by the local driver.
#[derive(Debug)]
pub struct LocalReceiver {
    rx: mpsc::UnboundedReceiver<Vec<u8>>,
}

impl LocalQueue {
    /// Creates a connected queue and receiver.
    pub fn channel() -> (LocalQueue, LocalReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (LocalQueue { tx }, LocalReceiver { rx })
    }
}

impl LocalReceiver {
    /// Waits for the next payload. `None` once every queue handle is dropped.
    pub async fn recv(&mut self) -> Option<Vec<u8>> {
        self.rx.recv().await
    }

    /// Takes a payload if one is already queued.
    pub fn try_recv(&mut self) -> Option<Vec<u8>> {
        self.rx.try_recv().ok()
    }
}

impl SyncAdapter for LocalQueue {
    fn name(&self) -> &str {
        "local"
    }
}

#[async_trait]
impl CursorQueue for LocalQueue {
    async fn enqueue(&self, cursor: SyncCursor) -> Result<(), RepublishError> {
        self.tx
            .send(encode_cursor(cursor))
            .map_err(|_| RepublishError::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::decode_cursor;

    #[tokio::test]
    async fn advance_enqueues_next_cursor_payload() {
        let (queue, mut rx) = LocalQueue::channel();
        let next = queue.advance(SyncCursor::new(9)).await.unwrap();
        assert_eq!(next, SyncCursor::new(10));

        let payload = rx.recv().await.unwrap();
        assert_eq!(payload, br#"{"offset":"10"}"#.to_vec());
        assert_eq!(decode_cursor(&payload).unwrap(), next);
        assert!(rx.try_recv().is_none());
    }

    #[tokio::test]
    async fn dropped_receiver_closes_the_queue() {
        let (queue, rx) = LocalQueue::channel();
        drop(rx);
        let err = queue.enqueue(SyncCursor::START).await.unwrap_err();
        assert!(matches!(err, RepublishError::Closed));
    }
}
