// SPDX-FileCopyrightText: 2026 Catsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! CatalogIQ source adapter for catsync.
//!
//! Implements [`PageSource`] over the CatalogIQ products API. Pages are one
//! record wide, so the cursor offset doubles as a record index.

pub mod client;

use std::time::Duration;

use async_trait::async_trait;
use catsync_config::CatsyncConfig;
use catsync_core::traits::{PageSource, SyncAdapter};
use catsync_core::{CatsyncError, FetchError, SourceRecord, SyncCursor};
use tracing::info;

pub use client::{API_KEY_HEADER, CatalogIqClient, PAGE_SIZE};

/// Source catalog backed by the CatalogIQ HTTP API.
pub struct CatalogIqSource {
    client: CatalogIqClient,
}

impl CatalogIqSource {
    /// Builds the source from the `[source]` and `[sync]` sections.
    pub fn from_config(config: &CatsyncConfig) -> Result<Self, CatsyncError> {
        let client = CatalogIqClient::new(
            &config.source.endpoint,
            &config.source.api_key,
            Duration::from_secs(config.sync.request_timeout_secs),
        )?;
        info!(endpoint = %config.source.endpoint, "CatalogIQ source initialized");
        Ok(Self { client })
    }
}

impl SyncAdapter for CatalogIqSource {
    fn name(&self) -> &str {
        "catalogiq"
    }
}

#[async_trait]
impl PageSource for CatalogIqSource {
    async fn fetch_page(&self, cursor: SyncCursor) -> Result<Vec<SourceRecord>, FetchError> {
        let records = self.client.fetch_page(cursor).await?;
        info!(
            offset = cursor.offset(),
            records = records.len(),
            "fetched source page"
        );
        Ok(records)
    }
}
