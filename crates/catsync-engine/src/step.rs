// SPDX-FileCopyrightText: 2026 Catsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One sync step: fetch a page, publish its records, then advance or finish.
//!
//! ```text
//! START -> FETCHED -> EMPTY -> NOTIFIED            (Completed)
//!                  -> NONEMPTY -> PUBLISHING -> ADVANCED (Advanced)
//! ```
//!
//! Any state can exit with a [`StepError`]; no error path republishes.

use std::sync::Arc;
use std::time::Instant;

use catsync_core::traits::{CompletionNotifier, CursorQueue, PageSource, RecordSink, SyncAdapter};
use catsync_core::{DecodeError, IdempotencyKey, SourceRecord, StepError, SyncCursor};
use catsync_mapping::transform;
use catsync_pubsub::{decode_cursor, decode_push};
use tracing::{debug, error, info, warn};

use crate::metrics;

/// How a step ended when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The page had records and the cursor `next` was enqueued.
    Advanced {
        next: SyncCursor,
        published: usize,
        failed: usize,
    },
    /// The page was empty; the run is over and nothing was enqueued.
    Completed,
}

impl StepOutcome {
    /// Label used for logs and the `outcome` metric.
    pub fn label(&self) -> &'static str {
        match self {
            StepOutcome::Advanced { .. } => "advanced",
            StepOutcome::Completed => "completed",
        }
    }
}

/// The sync step orchestrator.
///
/// Stateless between calls: concurrent or duplicate deliveries each run an
/// independent step against the shared collaborators.
#[derive(Clone)]
pub struct SyncStep {
    source: Arc<dyn PageSource>,
    sink: Arc<dyn RecordSink>,
    notifier: Arc<dyn CompletionNotifier>,
    queue: Arc<dyn CursorQueue>,
}

impl SyncStep {
    pub fn new(
        source: Arc<dyn PageSource>,
        sink: Arc<dyn RecordSink>,
        notifier: Arc<dyn CompletionNotifier>,
        queue: Arc<dyn CursorQueue>,
    ) -> Self {
        Self {
            source,
            sink,
            notifier,
            queue,
        }
    }

    /// Runs the step for a Pub/Sub push delivery body.
    pub async fn handle_push(&self, body: &[u8]) -> Result<StepOutcome, StepError> {
        let cursor = rejected_on_decode(decode_push(body))?;
        self.run(cursor).await
    }

    /// Runs the step for a raw cursor message payload.
    pub async fn handle_payload(&self, payload: &[u8]) -> Result<StepOutcome, StepError> {
        let cursor = rejected_on_decode(decode_cursor(payload))?;
        self.run(cursor).await
    }

    /// Runs the step for `cursor`.
    pub async fn run(&self, cursor: SyncCursor) -> Result<StepOutcome, StepError> {
        let started = Instant::now();
        let result = self.execute(cursor).await;
        let elapsed = started.elapsed().as_secs_f64();

        match &result {
            Ok(outcome) => {
                metrics::record_step(outcome.label(), elapsed);
            }
            Err(e) => {
                metrics::record_step(e.kind(), elapsed);
                error!(
                    offset = cursor.offset(),
                    kind = e.kind(),
                    error = %e,
                    "sync step failed, cursor not advanced"
                );
            }
        }
        result
    }

    async fn execute(&self, cursor: SyncCursor) -> Result<StepOutcome, StepError> {
        let records = self.source.fetch_page(cursor).await?;

        if records.is_empty() {
            info!(offset = cursor.offset(), "source catalog exhausted");
            self.notify().await;
            return Ok(StepOutcome::Completed);
        }

        let (published, failed) = self.publish_page(cursor, &records).await;
        let next = self.queue.advance(cursor).await?;

        info!(
            offset = cursor.offset(),
            next = next.offset(),
            published,
            failed,
            "sync step advanced"
        );
        Ok(StepOutcome::Advanced {
            next,
            published,
            failed,
        })
    }

    /// Transforms and publishes every record; failures are logged and counted.
    async fn publish_page(&self, cursor: SyncCursor, records: &[SourceRecord]) -> (usize, usize) {
        let mut published = 0;
        let mut failed = 0;

        for source in records {
            let record = transform(source);
            let key = IdempotencyKey::for_record(cursor, &record.sku);

            match self.sink.publish_record(&record, &key).await {
                Ok(()) => {
                    published += 1;
                    metrics::record_published();
                    debug!(offset = cursor.offset(), sku = %record.sku, "record published");
                }
                Err(e) => {
                    failed += 1;
                    metrics::record_failed();
                    warn!(
                        offset = cursor.offset(),
                        sku = %record.sku,
                        error = %e,
                        "failed to publish record"
                    );
                }
            }
        }

        (published, failed)
    }

    async fn notify(&self) {
        match self.notifier.notify_completion().await {
            Ok(()) => {
                metrics::record_notification("sent");
                info!(notifier = self.notifier.name(), "completion notification sent");
            }
            Err(e) => {
                metrics::record_notification("failed");
                warn!(
                    notifier = self.notifier.name(),
                    error = %e,
                    "failed to send completion notification"
                );
            }
        }
    }
}

fn rejected_on_decode(decoded: Result<SyncCursor, DecodeError>) -> Result<SyncCursor, StepError> {
    decoded.map_err(|e| {
        metrics::record_step("decode", 0.0);
        warn!(error = %e, "rejecting undecodable cursor message");
        StepError::Decode(e)
    })
}
