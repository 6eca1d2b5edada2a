// SPDX-FileCopyrightText: 2026 Catsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the catsync catalog synchronizer.
//!
//! Defines the data model carried through one sync step, the adapter traits
//! for the four external collaborators (source catalog, destination catalog,
//! completion notifier, cursor queue) and the error taxonomy that decides
//! which failures halt a run.

pub mod error;
pub mod record;
pub mod traits;
pub mod types;

pub use error::{
    CatsyncError, DecodeError, FetchError, NotifyError, PublishError, RepublishError, StepError,
};
pub use record::{DestinationRecord, SourceRecord};
pub use types::{IdempotencyKey, SyncCursor};

pub use traits::{CompletionNotifier, CursorQueue, PageSource, RecordSink, SyncAdapter};
