// SPDX-FileCopyrightText: 2026 Catsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Source catalog adapter trait.

use async_trait::async_trait;

use crate::error::FetchError;
use crate::record::SourceRecord;
use crate::traits::adapter::SyncAdapter;
use crate::types::SyncCursor;

/// Reads pages of products from the source catalog.
#[async_trait]
pub trait PageSource: SyncAdapter {
    /// Fetches the page starting at `cursor`.
    ///
    /// An empty page means the catalog is exhausted; it is not an error.
    async fn fetch_page(&self, cursor: SyncCursor) -> Result<Vec<SourceRecord>, FetchError>;
}
