// SPDX-FileCopyrightText: 2026 Catsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::{
    CatsyncConfig, PLACEHOLDER_BIGCOMMERCE_KEY, PLACEHOLDER_CATALOGIQ_KEY, PLACEHOLDER_PROJECT,
    PLACEHOLDER_STORE_HASH, PLACEHOLDER_TOPIC,
};

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &CatsyncConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    require_url(&mut errors, "source.endpoint", &config.source.endpoint);
    require_url(&mut errors, "notifier.endpoint", &config.notifier.endpoint);
    require_url(&mut errors, "queue.endpoint", &config.queue.endpoint);
    require_url(
        &mut errors,
        "queue.metadata_endpoint",
        &config.queue.metadata_endpoint,
    );
    if let Some(endpoint) = &config.destination.endpoint {
        require_url(&mut errors, "destination.endpoint", endpoint);
    }

    require_non_empty(&mut errors, "source.api_key", &config.source.api_key);
    require_non_empty(&mut errors, "destination.api_key", &config.destination.api_key);
    require_non_empty(&mut errors, "destination.store_hash", &config.destination.store_hash);
    require_non_empty(&mut errors, "queue.project_id", &config.queue.project_id);
    require_non_empty(&mut errors, "queue.topic_id", &config.queue.topic_id);
    require_non_empty(&mut errors, "server.host", &config.server.host);

    if !config.notifier.from_email.contains('@') {
        errors.push(ConfigError::Validation {
            message: format!(
                "notifier.from_email `{}` is not an email address",
                config.notifier.from_email
            ),
        });
    }

    if config.server.port == 0 {
        errors.push(ConfigError::Validation {
            message: "server.port must not be 0".to_string(),
        });
    }

    if config.sync.request_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "sync.request_timeout_secs must be at least 1".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Keys still holding the documented local-testing placeholders.
///
/// These values are accepted so the binary can start without credentials,
/// but a deployment using them cannot reach any real service.
pub fn placeholder_credentials(config: &CatsyncConfig) -> Vec<&'static str> {
    let checks = [
        ("source.api_key", config.source.api_key == PLACEHOLDER_CATALOGIQ_KEY),
        (
            "destination.api_key",
            config.destination.api_key == PLACEHOLDER_BIGCOMMERCE_KEY,
        ),
        (
            "destination.store_hash",
            config.destination.store_hash == PLACEHOLDER_STORE_HASH,
        ),
        ("queue.project_id", config.queue.project_id == PLACEHOLDER_PROJECT),
        ("queue.topic_id", config.queue.topic_id == PLACEHOLDER_TOPIC),
        ("notifier.api_key", config.notifier.api_key.is_none()),
    ];
    checks
        .into_iter()
        .filter_map(|(key, placeholder)| placeholder.then_some(key))
        .collect()
}

/// Log a warning for every placeholder credential still in use.
pub fn warn_placeholder_credentials(config: &CatsyncConfig) {
    for key in placeholder_credentials(config) {
        tracing::warn!(key, "configuration uses a local-testing placeholder");
    }
}

fn require_non_empty(errors: &mut Vec<ConfigError>, key: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: format!("{key} must not be empty"),
        });
    }
}

fn require_url(errors: &mut Vec<ConfigError>, key: &str, value: &str) {
    let value = value.trim();
    let host = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    match host {
        Some(rest) if !rest.is_empty() && !rest.starts_with('/') => {}
        _ => errors.push(ConfigError::Validation {
            message: format!("{key} `{value}` must be an http:// or https:// URL"),
        }),
    }
}
