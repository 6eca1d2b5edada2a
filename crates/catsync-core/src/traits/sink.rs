// SPDX-FileCopyrightText: 2026 Catsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Destination catalog adapter trait.

use async_trait::async_trait;

use crate::error::PublishError;
use crate::record::DestinationRecord;
use crate::traits::adapter::SyncAdapter;
use crate::types::IdempotencyKey;

/// Writes transformed products to the destination catalog.
#[async_trait]
pub trait RecordSink: SyncAdapter {
    /// Creates or updates one record.
    ///
    /// `key` is forwarded to the destination so it can drop a duplicate
    /// write caused by redelivery of the same cursor.
    async fn publish_record(
        &self,
        record: &DestinationRecord,
        key: &IdempotencyKey,
    ) -> Result<(), PublishError>;
}
