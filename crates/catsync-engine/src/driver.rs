// SPDX-FileCopyrightText: 2026 Catsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Local driver: runs a whole sync in process over a [`LocalQueue`].
//!
//! Each step's continuation is read back from the queue and executed next,
//! so the run walks exactly the message chain a deployed system would.

use std::sync::Arc;

use catsync_core::traits::{CompletionNotifier, CursorQueue, PageSource, RecordSink};
use catsync_core::{StepError, SyncCursor};
use catsync_pubsub::{LocalQueue, LocalReceiver};
use tracing::info;

use crate::step::{StepOutcome, SyncStep};

/// Totals of a local run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Steps executed, the final (empty) one included.
    pub steps: u64,
    pub published: usize,
    pub failed: usize,
    /// Cursor of the last executed step.
    pub last_cursor: SyncCursor,
    /// Whether the run reached the end of the source catalog.
    pub completed: bool,
}

/// Runs sync steps back to back until completion or the first fatal error.
pub struct LocalDriver {
    step: SyncStep,
    queue: LocalQueue,
    rx: LocalReceiver,
}

impl LocalDriver {
    pub fn new(
        source: Arc<dyn PageSource>,
        sink: Arc<dyn RecordSink>,
        notifier: Arc<dyn CompletionNotifier>,
    ) -> Self {
        let (queue, rx) = LocalQueue::channel();
        let step = SyncStep::new(source, sink, notifier, Arc::new(queue.clone()));
        Self { step, queue, rx }
    }

    /// Seeds the queue with `from` and drains it.
    pub async fn run(mut self, from: SyncCursor) -> Result<RunSummary, StepError> {
        self.queue.enqueue(from).await?;

        let mut summary = RunSummary {
            steps: 0,
            published: 0,
            failed: 0,
            last_cursor: from,
            completed: false,
        };

        while let Some(payload) = self.rx.try_recv() {
            let outcome = self.step.handle_payload(&payload).await?;
            summary.steps += 1;

            match outcome {
                StepOutcome::Advanced {
                    next,
                    published,
                    failed,
                } => {
                    summary.published += published;
                    summary.failed += failed;
                    summary.last_cursor = next;
                }
                StepOutcome::Completed => {
                    summary.completed = true;
                    break;
                }
            }
        }

        info!(
            steps = summary.steps,
            published = summary.published,
            failed = summary.failed,
            last_offset = summary.last_cursor.offset(),
            "local sync run finished"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catsync_test_utils::{MockStack, fixtures};

    fn driver(stack: &MockStack) -> LocalDriver {
        LocalDriver::new(
            stack.source.clone(),
            stack.sink.clone(),
            stack.notifier.clone(),
        )
    }

    #[tokio::test]
    async fn runs_until_the_catalog_is_exhausted() {
        let stack = MockStack::with_records(fixtures::catalog(3));

        let summary = driver(&stack).run(SyncCursor::START).await.unwrap();
        assert_eq!(
            summary,
            RunSummary {
                steps: 4,
                published: 3,
                failed: 0,
                last_cursor: SyncCursor::new(3),
                completed: true,
            }
        );
        assert_eq!(stack.sink.published_count().await, 3);
        assert_eq!(stack.notifier.calls(), 1);
        assert_eq!(
            stack.source.requested().await,
            (0..4).map(SyncCursor::new).collect::<Vec<_>>()
        );
    }

    #[tokio::test]
    async fn resumes_from_a_given_offset() {
        let stack = MockStack::with_records(fixtures::catalog(5));

        let summary = driver(&stack).run(SyncCursor::new(3)).await.unwrap();
        assert_eq!(summary.steps, 3);
        assert_eq!(summary.published, 2);
        assert!(summary.completed);
    }

    #[tokio::test]
    async fn stops_at_the_first_fatal_error() {
        let stack = MockStack::with_records(fixtures::catalog(2));
        stack.source.fail_with_status(500).await;

        let err = driver(&stack).run(SyncCursor::START).await.unwrap_err();
        assert_eq!(err.kind(), "fetch");
        assert_eq!(stack.sink.attempts().await, 0);
        assert_eq!(stack.notifier.calls(), 0);
    }

    #[tokio::test]
    async fn publish_failures_do_not_stop_the_run() {
        let stack = MockStack::with_records(fixtures::catalog(2));
        stack.sink.reject_sku("SKU-0-118").await;

        let summary = driver(&stack).run(SyncCursor::START).await.unwrap();
        assert_eq!(summary.published, 1);
        assert_eq!(summary.failed, 1);
        assert!(summary.completed);
    }
}
