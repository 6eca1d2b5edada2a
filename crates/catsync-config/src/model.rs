// SPDX-FileCopyrightText: 2026 Catsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelled key fails
//! at startup instead of silently falling back to a default.
//!
//! The defaults let the binary start against placeholder credentials for
//! local testing. They are not safe for production; see
//! [`crate::validation::placeholder_credentials`].

use serde::{Deserialize, Serialize};

/// Default CatalogIQ API key placeholder.
pub const PLACEHOLDER_CATALOGIQ_KEY: &str = "default_catalogiq_key";
/// Default BigCommerce API key placeholder.
pub const PLACEHOLDER_BIGCOMMERCE_KEY: &str = "default_bigcommerce_key";
/// Default BigCommerce store hash placeholder.
pub const PLACEHOLDER_STORE_HASH: &str = "default_store_hash";
/// Default Pub/Sub project placeholder.
pub const PLACEHOLDER_PROJECT: &str = "project-name";
/// Default Pub/Sub topic placeholder.
pub const PLACEHOLDER_TOPIC: &str = "topic-id";

const REDACTED: &str = "[REDACTED]";

/// Top-level catsync configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CatsyncConfig {
    /// Process-wide sync settings.
    #[serde(default)]
    pub sync: SyncConfig,

    /// CatalogIQ source catalog.
    #[serde(default)]
    pub source: SourceConfig,

    /// BigCommerce destination catalog.
    #[serde(default)]
    pub destination: DestinationConfig,

    /// SendGrid completion email.
    #[serde(default)]
    pub notifier: NotifierConfig,

    /// Pub/Sub cursor queue.
    #[serde(default)]
    pub queue: QueueConfig,

    /// Push endpoint listener.
    #[serde(default)]
    pub server: ServerConfig,
}

impl CatsyncConfig {
    /// Copy of the configuration with every credential replaced, for display.
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        config.source.api_key = REDACTED.to_string();
        config.destination.api_key = REDACTED.to_string();
        if config.notifier.api_key.is_some() {
            config.notifier.api_key = Some(REDACTED.to_string());
        }
        if config.queue.access_token.is_some() {
            config.queue.access_token = Some(REDACTED.to_string());
        }
        config
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SyncConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Per-request timeout applied to every outbound HTTP client.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    /// Products endpoint of the CatalogIQ API.
    #[serde(default = "default_source_endpoint")]
    pub endpoint: String,

    /// Value of the `Catalogiq-Api-Key` header.
    #[serde(default = "default_source_api_key")]
    pub api_key: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_source_endpoint(),
            api_key: default_source_api_key(),
        }
    }
}

fn default_source_endpoint() -> String {
    "https://catalogiq.app/api/v1/products".to_string()
}

fn default_source_api_key() -> String {
    PLACEHOLDER_CATALOGIQ_KEY.to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DestinationConfig {
    /// BigCommerce store hash, used to build the default endpoint.
    #[serde(default = "default_store_hash")]
    pub store_hash: String,

    /// Value of the `X-Auth-Token` header.
    #[serde(default = "default_destination_api_key")]
    pub api_key: String,

    /// Full products endpoint. Overrides the one derived from `store_hash`.
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl DestinationConfig {
    /// The products endpoint records are posted to.
    pub fn products_endpoint(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.clone(),
            None => format!(
                "https://api.bigcommerce.com/stores/{}/v3/catalog/products",
                self.store_hash
            ),
        }
    }
}

impl Default for DestinationConfig {
    fn default() -> Self {
        Self {
            store_hash: default_store_hash(),
            api_key: default_destination_api_key(),
            endpoint: None,
        }
    }
}

fn default_store_hash() -> String {
    PLACEHOLDER_STORE_HASH.to_string()
}

fn default_destination_api_key() -> String {
    PLACEHOLDER_BIGCOMMERCE_KEY.to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NotifierConfig {
    /// SendGrid API key. `None` makes every notification fail (and be logged).
    #[serde(default)]
    pub api_key: Option<String>,

    /// SendGrid mail send endpoint.
    #[serde(default = "default_notifier_endpoint")]
    pub endpoint: String,

    /// Sender address of the completion email.
    #[serde(default = "default_from_email")]
    pub from_email: String,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: default_notifier_endpoint(),
            from_email: default_from_email(),
        }
    }
}

fn default_notifier_endpoint() -> String {
    "https://api.sendgrid.com/v3/mail/send".to_string()
}

fn default_from_email() -> String {
    "info@catalogiq.app".to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct QueueConfig {
    /// Google Cloud project that owns the topic.
    #[serde(default = "default_project_id")]
    pub project_id: String,

    /// Topic that receives cursor messages.
    #[serde(default = "default_topic_id")]
    pub topic_id: String,

    /// Pub/Sub REST API base URL.
    #[serde(default = "default_queue_endpoint")]
    pub endpoint: String,

    /// Static OAuth access token. When unset, one is requested from
    /// `metadata_endpoint` before each publish.
    #[serde(default)]
    pub access_token: Option<String>,

    /// GCE metadata server token endpoint.
    #[serde(default = "default_metadata_endpoint")]
    pub metadata_endpoint: String,
}

impl QueueConfig {
    /// Fully qualified topic name, `projects/{project}/topics/{topic}`.
    pub fn topic_path(&self) -> String {
        format!("projects/{}/topics/{}", self.project_id, self.topic_id)
    }
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            project_id: default_project_id(),
            topic_id: default_topic_id(),
            endpoint: default_queue_endpoint(),
            access_token: None,
            metadata_endpoint: default_metadata_endpoint(),
        }
    }
}

fn default_project_id() -> String {
    PLACEHOLDER_PROJECT.to_string()
}

fn default_topic_id() -> String {
    PLACEHOLDER_TOPIC.to_string()
}

fn default_queue_endpoint() -> String {
    "https://pubsub.googleapis.com".to_string()
}

fn default_metadata_endpoint() -> String {
    "http://metadata.google.internal/computeMetadata/v1/instance/service-accounts/default/token"
        .to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Address the push endpoint binds to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port the push endpoint binds to.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destination_endpoint_is_derived_from_store_hash() {
        let config = DestinationConfig {
            store_hash: "abc123".into(),
            ..Default::default()
        };
        assert_eq!(
            config.products_endpoint(),
            "https://api.bigcommerce.com/stores/abc123/v3/catalog/products"
        );
    }

    #[test]
    fn destination_endpoint_override_wins() {
        let config = DestinationConfig {
            endpoint: Some("http://localhost:9000/products".into()),
            ..Default::default()
        };
        assert_eq!(config.products_endpoint(), "http://localhost:9000/products");
    }

    #[test]
    fn topic_path_combines_project_and_topic() {
        assert_eq!(
            QueueConfig::default().topic_path(),
            "projects/project-name/topics/topic-id"
        );
    }

    #[test]
    fn redacted_hides_every_credential() {
        let mut config = CatsyncConfig::default();
        config.notifier.api_key = Some("SG.secret".into());
        config.queue.access_token = Some("ya29.secret".into());

        let shown = config.redacted();
        assert_eq!(shown.source.api_key, "[REDACTED]");
        assert_eq!(shown.destination.api_key, "[REDACTED]");
        assert_eq!(shown.notifier.api_key.as_deref(), Some("[REDACTED]"));
        assert_eq!(shown.queue.access_token.as_deref(), Some("[REDACTED]"));
        assert_eq!(shown.destination.store_hash, config.destination.store_hash);
    }
}
