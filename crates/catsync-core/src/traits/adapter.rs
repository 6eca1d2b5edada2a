// SPDX-FileCopyrightText: 2026 Catsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base trait shared by all adapters.

/// Identity shared by every external-collaborator adapter.
pub trait SyncAdapter: Send + Sync + 'static {
    /// Short name used in log fields and metric labels.
    fn name(&self) -> &str;
}
