// SPDX-FileCopyrightText: 2026 Catsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SendGrid completion notifier for catsync.
//!
//! Implements [`CompletionNotifier`] by sending one fixed email through the
//! SendGrid v3 API once the source catalog is exhausted.

pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use catsync_config::CatsyncConfig;
use catsync_core::traits::{CompletionNotifier, SyncAdapter};
use catsync_core::{CatsyncError, NotifyError};
use reqwest::Url;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use tracing::{debug, info, warn};

use crate::types::MailRequest;

pub use types::{COMPLETION_BODY, COMPLETION_RECIPIENT, COMPLETION_SUBJECT};

/// Completion notifier backed by SendGrid.
///
/// Constructed even without an API key so the binary can start; every
/// notification then fails with [`NotifyError::NotConfigured`].
pub struct SendGridNotifier {
    client: Option<reqwest::Client>,
    endpoint: Url,
    from_email: String,
}

impl SendGridNotifier {
    /// Builds the notifier from the `[notifier]` and `[sync]` sections.
    pub fn from_config(config: &CatsyncConfig) -> Result<Self, CatsyncError> {
        let notifier = &config.notifier;
        let endpoint = Url::parse(&notifier.endpoint).map_err(|e| {
            CatsyncError::Config(format!(
                "invalid notifier endpoint `{}`: {e}",
                notifier.endpoint
            ))
        })?;

        let client = match &notifier.api_key {
            Some(key) => Some(build_client(
                key,
                Duration::from_secs(config.sync.request_timeout_secs),
            )?),
            None => {
                warn!("notifier.api_key is not set; completion emails will not be sent");
                None
            }
        };

        info!(from = %notifier.from_email, "SendGrid notifier initialized");
        Ok(Self {
            client,
            endpoint,
            from_email: notifier.from_email.clone(),
        })
    }

    /// Whether an API key was configured.
    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }
}

fn build_client(api_key: &str, timeout: Duration) -> Result<reqwest::Client, CatsyncError> {
    let mut headers = HeaderMap::new();
    let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
        CatsyncError::Config(format!("invalid notifier API key header value: {e}"))
    })?;
    auth.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth);

    reqwest::Client::builder()
        .default_headers(headers)
        .timeout(timeout)
        .build()
        .map_err(|e| CatsyncError::Client {
            message: format!("failed to build SendGrid HTTP client: {e}"),
            source: Some(Box::new(e)),
        })
}

impl SyncAdapter for SendGridNotifier {
    fn name(&self) -> &str {
        "sendgrid"
    }
}

#[async_trait]
impl CompletionNotifier for SendGridNotifier {
    async fn notify_completion(&self) -> Result<(), NotifyError> {
        let Some(client) = &self.client else {
            return Err(NotifyError::NotConfigured(
                "notifier.api_key is not set".to_string(),
            ));
        };

        let response = client
            .post(self.endpoint.clone())
            .json(&MailRequest::completion(&self.from_email))
            .send()
            .await
            .map_err(|e| NotifyError::Transport {
                message: e.to_string(),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, "SendGrid response received");

        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(NotifyError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer, api_key: Option<&str>) -> CatsyncConfig {
        let mut config = CatsyncConfig::default();
        config.notifier.endpoint = format!("{}/v3/mail/send", server.uri());
        config.notifier.api_key = api_key.map(str::to_string);
        config
    }

    #[tokio::test]
    async fn sends_completion_email_with_bearer_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v3/mail/send"))
            .and(header("authorization", "Bearer SG.test"))
            .and(body_partial_json(serde_json::json!({
                "subject": COMPLETION_SUBJECT,
                "from": {"email": "info@catalogiq.app"},
                "personalizations": [{"to": [{"email": COMPLETION_RECIPIENT}]}]
            })))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&server)
            .await;

        let notifier = SendGridNotifier::from_config(&config_for(&server, Some("SG.test"))).unwrap();
        assert!(notifier.is_configured());
        notifier.notify_completion().await.unwrap();
    }

    #[tokio::test]
    async fn missing_key_is_not_configured() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(202))
            .expect(0)
            .mount(&server)
            .await;

        let notifier = SendGridNotifier::from_config(&config_for(&server, None)).unwrap();
        assert!(!notifier.is_configured());
        let err = notifier.notify_completion().await.unwrap_err();
        assert!(matches!(err, NotifyError::NotConfigured(_)));
    }

    #[tokio::test]
    async fn rejected_key_is_a_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid key"))
            .mount(&server)
            .await;

        let notifier = SendGridNotifier::from_config(&config_for(&server, Some("SG.bad"))).unwrap();
        let err = notifier.notify_completion().await.unwrap_err();
        assert!(matches!(err, NotifyError::Status { status: 401, .. }));
    }

    #[tokio::test]
    async fn custom_sender_is_used() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(serde_json::json!({"from": {"email": "ops@example.com"}})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let mut config = config_for(&server, Some("SG.test"));
        config.notifier.from_email = "ops@example.com".into();
        SendGridNotifier::from_config(&config)
            .unwrap()
            .notify_completion()
            .await
            .unwrap();
    }
}
