// SPDX-FileCopyrightText: 2026 Catsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock source catalog for deterministic testing.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use catsync_core::traits::{PageSource, SyncAdapter};
use catsync_core::{FetchError, SourceRecord, SyncCursor};

/// A source catalog that serves pre-loaded pages.
///
/// Offsets without a page return an empty page, i.e. the end of the catalog.
/// Every requested cursor is recorded.
pub struct MockPageSource {
    pages: Arc<Mutex<HashMap<u64, Vec<SourceRecord>>>>,
    fail_status: Arc<Mutex<Option<u16>>>,
    requested: Arc<Mutex<Vec<SyncCursor>>>,
}

impl MockPageSource {
    /// Create a source with an empty catalog.
    pub fn new() -> Self {
        Self {
            pages: Arc::new(Mutex::new(HashMap::new())),
            fail_status: Arc::new(Mutex::new(None)),
            requested: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a source serving `records[i]` at offset `i`.
    pub fn with_records(records: Vec<SourceRecord>) -> Self {
        let pages = records
            .into_iter()
            .enumerate()
            .map(|(i, record)| (i as u64, vec![record]))
            .collect();
        Self {
            pages: Arc::new(Mutex::new(pages)),
            ..Self::new()
        }
    }

    /// Serve `records` as the page at `offset`.
    pub async fn set_page(&self, offset: u64, records: Vec<SourceRecord>) {
        self.pages.lock().await.insert(offset, records);
    }

    /// Make every fetch fail with HTTP `status`.
    pub async fn fail_with_status(&self, status: u16) {
        *self.fail_status.lock().await = Some(status);
    }

    /// Cursors passed to `fetch_page`, in call order.
    pub async fn requested(&self) -> Vec<SyncCursor> {
        self.requested.lock().await.clone()
    }
}

impl Default for MockPageSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncAdapter for MockPageSource {
    fn name(&self) -> &str {
        "mock-source"
    }
}

#[async_trait]
impl PageSource for MockPageSource {
    async fn fetch_page(&self, cursor: SyncCursor) -> Result<Vec<SourceRecord>, FetchError> {
        self.requested.lock().await.push(cursor);

        if let Some(status) = *self.fail_status.lock().await {
            return Err(FetchError::Status {
                status,
                body: "mock failure".to_string(),
            });
        }

        Ok(self
            .pages
            .lock()
            .await
            .get(&cursor.offset())
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[tokio::test]
    async fn serves_one_record_per_offset_then_ends() {
        let source = MockPageSource::with_records(fixtures::catalog(2));
        assert_eq!(source.fetch_page(SyncCursor::new(1)).await.unwrap()[0].model, "SKU-1");
        assert!(source.fetch_page(SyncCursor::new(2)).await.unwrap().is_empty());
        assert_eq!(
            source.requested().await,
            [SyncCursor::new(1), SyncCursor::new(2)]
        );
    }

    #[tokio::test]
    async fn injected_failure_is_returned() {
        let source = MockPageSource::with_records(fixtures::catalog(1));
        source.fail_with_status(503).await;
        let err = source.fetch_page(SyncCursor::START).await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 503, .. }));
    }
}
