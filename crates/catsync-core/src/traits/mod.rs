// SPDX-FileCopyrightText: 2026 Catsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter traits for the synchronizer's external collaborators.
//!
//! Every adapter extends [`SyncAdapter`] and uses `#[async_trait]` so the
//! orchestrator can hold them as `Arc<dyn Trait>`.

pub mod adapter;
pub mod notifier;
pub mod queue;
pub mod sink;
pub mod source;

pub use adapter::SyncAdapter;
pub use notifier::CompletionNotifier;
pub use queue::CursorQueue;
pub use sink::RecordSink;
pub use source::PageSource;
