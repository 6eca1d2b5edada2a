// SPDX-FileCopyrightText: 2026 Catsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Lookup order: `./catsync.toml` > `~/.config/catsync/catsync.toml` >
//! `/etc/catsync/catsync.toml`, then environment overrides.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::CatsyncConfig;

/// Config file name searched for in every directory of the hierarchy.
pub const CONFIG_FILE: &str = "catsync.toml";

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/catsync/catsync.toml";

/// Sections addressable through `CATSYNC_<SECTION>_<KEY>` variables.
const SECTIONS: &[&str] = &["sync", "source", "destination", "notifier", "queue", "server"];

/// Keys whose environment values are parsed as numbers. Every other key is
/// taken verbatim, so digit-only credentials such as `0042` stay strings.
const NUMERIC_KEYS: &[&str] = &["sync.request_timeout_secs", "server.port"];

/// Unprefixed variables honoured for compatibility with existing deployments.
const LEGACY_ENV: &[(&str, &str)] = &[
    ("CATALOGIQ_API_KEY", "source.api_key"),
    ("BIGCOMMERCE_API_KEY", "destination.api_key"),
    ("BIGCOMMERCE_STORE_HASH", "destination.store_hash"),
    ("SENDGRID_API_KEY", "notifier.api_key"),
    ("PORT", "server.port"),
];

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/catsync/catsync.toml`
/// 3. `~/.config/catsync/catsync.toml`
/// 4. `./catsync.toml`
/// 5. Legacy variables (`CATALOGIQ_API_KEY`, `SENDGRID_API_KEY`, `PORT`, ...)
/// 6. `CATSYNC_*` variables
pub fn load_config() -> Result<CatsyncConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<CatsyncConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CatsyncConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<CatsyncConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CatsyncConfig::default()))
        .merge(Toml::file(path))
        .merge(env_layers())
        .extract()
}

/// Build the Figment used for hierarchy loading, before extraction.
pub fn build_figment() -> Figment {
    let mut figment = Figment::new().merge(Serialized::defaults(CatsyncConfig::default()));
    for path in config_paths() {
        figment = figment.merge(Toml::file(path));
    }
    figment.merge(env_layers())
}

/// Config files in merge order, lowest precedence first.
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(SYSTEM_CONFIG_PATH)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("catsync").join(CONFIG_FILE));
    }
    paths.push(PathBuf::from(CONFIG_FILE));
    paths
}

/// Legacy variables first, then `CATSYNC_*` variables on top.
fn env_layers() -> Figment {
    Figment::new()
        .merge(numeric_values(legacy_env_provider()))
        .merge(string_values(legacy_env_provider()))
        .merge(numeric_values(env_provider()))
        .merge(string_values(env_provider()))
}

/// `CATSYNC_SOURCE_API_KEY` -> `source.api_key`.
///
/// Splits only at the first underscore after a known section name, so keys
/// that contain underscores themselves (`api_key`, `store_hash`) stay intact.
fn env_provider() -> Env {
    Env::prefixed("CATSYNC_").map(|key| section_key(key.as_str()).into())
}

fn legacy_env_provider() -> Env {
    let names: Vec<&str> = LEGACY_ENV.iter().map(|(name, _)| *name).collect();
    Env::raw().only(&names).map(|key| {
        LEGACY_ENV
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key.as_str()))
            .map(|(_, path)| (*path).to_string())
            .unwrap_or_else(|| key.as_str().to_ascii_lowercase())
            .into()
    })
}

fn is_numeric_key(key: &str) -> bool {
    NUMERIC_KEYS.iter().any(|numeric| numeric.eq_ignore_ascii_case(key))
}

/// The numeric keys of `env`, parsed by figment.
fn numeric_values(env: Env) -> Env {
    env.filter(|key| is_numeric_key(key.as_str()))
}

/// The remaining keys of `env`, kept as the raw variable text.
fn string_values(env: Env) -> Figment {
    env.filter(|key| !is_numeric_key(key.as_str()))
        .iter()
        .fold(Figment::new(), |figment, (key, value)| {
            figment.merge(Serialized::default(key.as_str(), value))
        })
}

fn section_key(key: &str) -> String {
    let key = key.to_ascii_lowercase();
    for section in SECTIONS {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|rest| rest.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_key_splits_after_section_only() {
        assert_eq!(section_key("source_api_key"), "source.api_key");
        assert_eq!(section_key("DESTINATION_STORE_HASH"), "destination.store_hash");
        assert_eq!(section_key("queue_metadata_endpoint"), "queue.metadata_endpoint");
        assert_eq!(section_key("sync_request_timeout_secs"), "sync.request_timeout_secs");
    }

    #[test]
    fn section_key_leaves_unknown_sections_alone() {
        assert_eq!(section_key("unknown_key"), "unknown_key");
    }

    #[test]
    fn only_port_and_timeout_are_numeric() {
        assert!(is_numeric_key("server.port"));
        assert!(is_numeric_key("sync.request_timeout_secs"));
        assert!(!is_numeric_key("destination.store_hash"));
        assert!(!is_numeric_key("source.api_key"));
    }

    #[test]
    fn local_file_has_highest_file_precedence() {
        let paths = config_paths();
        assert_eq!(paths.first().unwrap(), Path::new(SYSTEM_CONFIG_PATH));
        assert_eq!(paths.last().unwrap(), Path::new(CONFIG_FILE));
    }
}
