// SPDX-FileCopyrightText: 2026 Catsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for catsync integration tests.
//!
//! Provides recording mock adapters with injectable failures, so sync steps
//! can be exercised without any external service.
//!
//! # Components
//!
//! - [`MockPageSource`] - Source catalog serving one record per offset
//! - [`MockRecordSink`] - Destination catalog capturing every publish
//! - [`MockNotifier`] - Completion notifier counting notifications
//! - [`MockQueue`] - Cursor queue capturing every enqueued cursor
//! - [`MockStack`] - All four, shared behind `Arc`s
//! - [`fixtures`] - Representative source records

pub mod fixtures;
pub mod mock_notifier;
pub mod mock_queue;
pub mod mock_sink;
pub mod mock_source;

use std::sync::Arc;

pub use mock_notifier::MockNotifier;
pub use mock_queue::MockQueue;
pub use mock_sink::MockRecordSink;
pub use mock_source::MockPageSource;

/// One instance of every mock, ready to inject into a sync step.
#[derive(Clone, Default)]
pub struct MockStack {
    pub source: Arc<MockPageSource>,
    pub sink: Arc<MockRecordSink>,
    pub notifier: Arc<MockNotifier>,
    pub queue: Arc<MockQueue>,
}

impl MockStack {
    /// A stack whose source serves `records`, one per offset from 0.
    pub fn with_records(records: Vec<catsync_core::SourceRecord>) -> Self {
        Self {
            source: Arc::new(MockPageSource::with_records(records)),
            ..Self::default()
        }
    }
}
