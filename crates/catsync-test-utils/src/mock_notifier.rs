// SPDX-FileCopyrightText: 2026 Catsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock completion notifier.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;

use catsync_core::traits::{CompletionNotifier, SyncAdapter};
use catsync_core::NotifyError;

/// Counts notifications; optionally fails each one after counting it.
#[derive(Default)]
pub struct MockNotifier {
    calls: Arc<AtomicUsize>,
    failing: Arc<AtomicBool>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier whose every call fails with HTTP 500.
    pub fn failing() -> Self {
        let notifier = Self::new();
        notifier.failing.store(true, Ordering::SeqCst);
        notifier
    }

    /// Number of `notify_completion` calls, failed ones included.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SyncAdapter for MockNotifier {
    fn name(&self) -> &str {
        "mock-notifier"
    }
}

#[async_trait]
impl CompletionNotifier for MockNotifier {
    async fn notify_completion(&self) -> Result<(), NotifyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(NotifyError::Status {
                status: 500,
                body: "mock failure".to_string(),
            });
        }
        Ok(())
    }
}
