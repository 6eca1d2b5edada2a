// SPDX-FileCopyrightText: 2026 Catsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! BigCommerce destination adapter for catsync.
//!
//! Implements [`RecordSink`] by posting each transformed product to the
//! store's v3 catalog products endpoint.

pub mod client;

use std::time::Duration;

use async_trait::async_trait;
use catsync_config::CatsyncConfig;
use catsync_core::traits::{RecordSink, SyncAdapter};
use catsync_core::{CatsyncError, DestinationRecord, IdempotencyKey, PublishError};
use tracing::info;

pub use client::{AUTH_HEADER, BigCommerceClient, IDEMPOTENCY_HEADER};

/// Destination catalog backed by the BigCommerce REST API.
pub struct BigCommerceSink {
    client: BigCommerceClient,
}

impl BigCommerceSink {
    /// Builds the sink from the `[destination]` and `[sync]` sections.
    pub fn from_config(config: &CatsyncConfig) -> Result<Self, CatsyncError> {
        let endpoint = config.destination.products_endpoint();
        let client = BigCommerceClient::new(
            &endpoint,
            &config.destination.api_key,
            Duration::from_secs(config.sync.request_timeout_secs),
        )?;
        info!(
            store_hash = %config.destination.store_hash,
            "BigCommerce sink initialized"
        );
        Ok(Self { client })
    }
}

impl SyncAdapter for BigCommerceSink {
    fn name(&self) -> &str {
        "bigcommerce"
    }
}

#[async_trait]
impl RecordSink for BigCommerceSink {
    async fn publish_record(
        &self,
        record: &DestinationRecord,
        key: &IdempotencyKey,
    ) -> Result<(), PublishError> {
        self.client.create_product(record, key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_is_derived_from_store_hash() {
        let mut config = CatsyncConfig::default();
        config.destination.store_hash = "s7k2".into();
        let sink = BigCommerceSink::from_config(&config).unwrap();
        assert_eq!(
            sink.client.endpoint().as_str(),
            "https://api.bigcommerce.com/stores/s7k2/v3/catalog/products"
        );
        assert_eq!(sink.name(), "bigcommerce");
    }

    #[test]
    fn endpoint_override_wins() {
        let mut config = CatsyncConfig::default();
        config.destination.endpoint = Some("http://localhost:9000/products".into());
        let sink = BigCommerceSink::from_config(&config).unwrap();
        assert_eq!(sink.client.endpoint().as_str(), "http://localhost:9000/products");
    }

    #[test]
    fn control_characters_in_token_are_rejected() {
        let mut config = CatsyncConfig::default();
        config.destination.api_key = "bad\ntoken".into();
        assert!(matches!(
            BigCommerceSink::from_config(&config),
            Err(CatsyncError::Config(_))
        ));
    }
}
