// SPDX-FileCopyrightText: 2026 Catsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cursor queue adapter trait.

use async_trait::async_trait;

use crate::error::RepublishError;
use crate::types::SyncCursor;
use crate::traits::adapter::SyncAdapter;

/// Enqueues cursor messages that trigger future sync steps.
#[async_trait]
pub trait CursorQueue: SyncAdapter {
    /// Enqueues a message carrying exactly `cursor`.
    ///
    /// Used for the initial trigger and for operator re-injection.
    async fn enqueue(&self, cursor: SyncCursor) -> Result<(), RepublishError>;

    /// Enqueues the cursor that follows `cursor` and returns it.
    async fn advance(&self, cursor: SyncCursor) -> Result<SyncCursor, RepublishError> {
        let next = cursor.next()?;
        self.enqueue(next).await?;
        Ok(next)
    }
}
