// SPDX-FileCopyrightText: 2026 Catsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the BigCommerce v3 catalog products endpoint.

use std::time::Duration;

use catsync_core::{CatsyncError, DestinationRecord, IdempotencyKey, PublishError};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{StatusCode, Url};
use tracing::debug;

/// Header carrying the store API token (`X-Auth-Token` on the wire).
pub const AUTH_HEADER: &str = "x-auth-token";

/// Header carrying the per-record idempotency key.
pub const IDEMPOTENCY_HEADER: &str = "idempotency-key";

/// Authenticated client for `POST <endpoint>`.
#[derive(Debug, Clone)]
pub struct BigCommerceClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl BigCommerceClient {
    /// Creates a client posting to the products `endpoint`.
    pub fn new(endpoint: &str, api_key: &str, timeout: Duration) -> Result<Self, CatsyncError> {
        let endpoint = Url::parse(endpoint).map_err(|e| {
            CatsyncError::Config(format!("invalid destination endpoint `{endpoint}`: {e}"))
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTH_HEADER,
            HeaderValue::from_str(api_key).map_err(|e| {
                CatsyncError::Config(format!("invalid destination API key header value: {e}"))
            })?,
        );
        headers.insert("accept", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| CatsyncError::Client {
                message: format!("failed to build BigCommerce HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self { client, endpoint })
    }

    /// The products endpoint records are posted to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Posts one product. Only 200 and 201 count as success.
    pub async fn create_product(
        &self,
        record: &DestinationRecord,
        key: &IdempotencyKey,
    ) -> Result<(), PublishError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(IDEMPOTENCY_HEADER, key.as_str())
            .json(record)
            .send()
            .await
            .map_err(|e| PublishError::Transport {
                message: e.to_string(),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(sku = %record.sku, status = %status, "destination response received");

        match status {
            StatusCode::OK | StatusCode::CREATED => Ok(()),
            _ => {
                let body = response.text().await.unwrap_or_default();
                Err(PublishError::Status {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }
}
