// SPDX-FileCopyrightText: 2026 Catsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Completion notification adapter trait.

use async_trait::async_trait;

use crate::error::NotifyError;
use crate::traits::adapter::SyncAdapter;

/// Signals that the source catalog has been fully synced.
#[async_trait]
pub trait CompletionNotifier: SyncAdapter {
    async fn notify_completion(&self) -> Result<(), NotifyError>;
}
