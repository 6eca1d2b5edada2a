// SPDX-FileCopyrightText: 2026 Catsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock destination catalog capturing every publish.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use catsync_core::traits::{RecordSink, SyncAdapter};
use catsync_core::{DestinationRecord, IdempotencyKey, PublishError};

/// A destination catalog that records publishes.
///
/// Publishes of SKUs registered with [`MockRecordSink::reject_sku`] fail with
/// HTTP 422 and are captured separately.
pub struct MockRecordSink {
    published: Arc<Mutex<Vec<(DestinationRecord, IdempotencyKey)>>>,
    rejected: Arc<Mutex<Vec<DestinationRecord>>>,
    reject_skus: Arc<Mutex<HashSet<String>>>,
}

impl MockRecordSink {
    pub fn new() -> Self {
        Self {
            published: Arc::new(Mutex::new(Vec::new())),
            rejected: Arc::new(Mutex::new(Vec::new())),
            reject_skus: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Fail every publish of `sku`.
    pub async fn reject_sku(&self, sku: &str) {
        self.reject_skus.lock().await.insert(sku.to_string());
    }

    /// Successfully published records with their keys.
    pub async fn published(&self) -> Vec<(DestinationRecord, IdempotencyKey)> {
        self.published.lock().await.clone()
    }

    /// Number of successful publishes.
    pub async fn published_count(&self) -> usize {
        self.published.lock().await.len()
    }

    /// Records whose publish was rejected.
    pub async fn rejected(&self) -> Vec<DestinationRecord> {
        self.rejected.lock().await.clone()
    }

    /// Total publish attempts.
    pub async fn attempts(&self) -> usize {
        self.published.lock().await.len() + self.rejected.lock().await.len()
    }
}

impl Default for MockRecordSink {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncAdapter for MockRecordSink {
    fn name(&self) -> &str {
        "mock-sink"
    }
}

#[async_trait]
impl RecordSink for MockRecordSink {
    async fn publish_record(
        &self,
        record: &DestinationRecord,
        key: &IdempotencyKey,
    ) -> Result<(), PublishError> {
        if self.reject_skus.lock().await.contains(&record.sku) {
            self.rejected.lock().await.push(record.clone());
            return Err(PublishError::Status {
                status: 422,
                body: format!("sku {} rejected", record.sku),
            });
        }
        self.published
            .lock()
            .await
            .push((record.clone(), key.clone()));
        Ok(())
    }
}
