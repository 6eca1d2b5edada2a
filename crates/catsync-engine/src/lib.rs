// SPDX-FileCopyrightText: 2026 Catsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sync step orchestrator for catsync.
//!
//! [`SyncStep`] executes the unit of work triggered by one cursor message.
//! [`LocalDriver`] chains steps in process for local runs.

pub mod driver;
pub mod metrics;
pub mod step;

pub use driver::{LocalDriver, RunSummary};
pub use step::{StepOutcome, SyncStep};
