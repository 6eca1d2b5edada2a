// SPDX-FileCopyrightText: 2026 Catsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cursor queue backed by the Pub/Sub REST `topics.publish` method.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use catsync_config::CatsyncConfig;
use catsync_config::model::QueueConfig;
use catsync_core::traits::{CursorQueue, SyncAdapter};
use catsync_core::{CatsyncError, IdempotencyKey, RepublishError, SyncCursor};
use reqwest::Url;
use reqwest::header::HeaderValue;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::envelope::encode_data;

/// Header the GCE metadata server requires on every request.
const METADATA_FLAVOR: &str = "metadata-flavor";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublishRequest {
    pub messages: Vec<OutgoingMessage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutgoingMessage {
    pub data: String,
    pub attributes: HashMap<String, String>,
}

impl PublishRequest {
    /// Single-message request carrying `cursor`.
    pub fn for_cursor(cursor: SyncCursor) -> Self {
        let attributes = HashMap::from([
            ("offset".to_string(), cursor.to_string()),
            (
                "idempotency_key".to_string(),
                IdempotencyKey::for_cursor(cursor).to_string(),
            ),
        ]);
        Self {
            messages: vec![OutgoingMessage {
                data: encode_data(cursor),
                attributes,
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PublishResponse {
    #[serde(default)]
    message_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct MetadataToken {
    access_token: String,
}

/// Where the bearer token for Pub/Sub comes from.
#[derive(Debug, Clone)]
enum TokenSource {
    Static(String),
    Metadata(Url),
}

/// Publishes cursor messages to one Pub/Sub topic.
pub struct PubSubPublisher {
    client: reqwest::Client,
    publish_url: Url,
    token: TokenSource,
}

impl PubSubPublisher {
    /// Builds the publisher from the `[queue]` and `[sync]` sections.
    pub fn from_config(config: &CatsyncConfig) -> Result<Self, CatsyncError> {
        Self::new(
            &config.queue,
            Duration::from_secs(config.sync.request_timeout_secs),
        )
    }

    /// Builds the publisher for one queue section.
    pub fn new(config: &QueueConfig, timeout: Duration) -> Result<Self, CatsyncError> {
        let publish_url = publish_url(&config.endpoint, &config.project_id, &config.topic_id)?;

        let token = match &config.access_token {
            Some(token) => TokenSource::Static(token.clone()),
            None => TokenSource::Metadata(Url::parse(&config.metadata_endpoint).map_err(|e| {
                CatsyncError::Config(format!(
                    "invalid queue metadata endpoint `{}`: {e}",
                    config.metadata_endpoint
                ))
            })?),
        };

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatsyncError::Client {
                message: format!("failed to build Pub/Sub HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        info!(topic = %config.topic_path(), "Pub/Sub publisher initialized");
        Ok(Self {
            client,
            publish_url,
            token,
        })
    }

    async fn access_token(&self) -> Result<String, RepublishError> {
        let url = match &self.token {
            TokenSource::Static(token) => return Ok(token.clone()),
            TokenSource::Metadata(url) => url,
        };

        let response = self
            .client
            .get(url.clone())
            .header(METADATA_FLAVOR, HeaderValue::from_static("Google"))
            .send()
            .await
            .map_err(|e| RepublishError::Auth(format!("metadata server unreachable: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RepublishError::Auth(format!(
                "metadata server returned {status}"
            )));
        }

        let token: MetadataToken = response
            .json()
            .await
            .map_err(|e| RepublishError::Auth(format!("invalid metadata token response: {e}")))?;
        Ok(token.access_token)
    }
}

fn publish_url(endpoint: &str, project: &str, topic: &str) -> Result<Url, CatsyncError> {
    let raw = format!(
        "{}/v1/projects/{project}/topics/{topic}:publish",
        endpoint.trim_end_matches('/')
    );
    Url::parse(&raw)
        .map_err(|e| CatsyncError::Config(format!("invalid queue endpoint `{endpoint}`: {e}")))
}

impl SyncAdapter for PubSubPublisher {
    fn name(&self) -> &str {
        "pubsub"
    }
}

#[async_trait]
impl CursorQueue for PubSubPublisher {
    async fn enqueue(&self, cursor: SyncCursor) -> Result<(), RepublishError> {
        let token = self.access_token().await?;

        let response = self
            .client
            .post(self.publish_url.clone())
            .bearer_auth(token)
            .json(&PublishRequest::for_cursor(cursor))
            .send()
            .await
            .map_err(|e| RepublishError::Transport {
                message: e.to_string(),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RepublishError::Status {
                status: status.as_u16(),
                body,
            });
        }

        // The message is already accepted; an unreadable body only costs the id.
        let ids = response
            .json::<PublishResponse>()
            .await
            .map(|r| r.message_ids)
            .unwrap_or_default();
        debug!(offset = cursor.offset(), message_ids = ?ids, "cursor published");
        Ok(())
    }
}
