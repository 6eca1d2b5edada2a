// SPDX-FileCopyrightText: 2026 Catsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Figment-to-miette error bridge.
//!
//! Turns deserialization failures into diagnostics that point at the
//! offending line of `catsync.toml` and suggest the closest valid key.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Jaro-Winkler score above which a valid key is offered as a correction.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// A configuration error with enough context for miette to render it.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// A key that no section defines.
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(catsync::config::unknown_key),
        help("{}", unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        key: String,
        suggestion: Option<String>,
        valid_keys: String,
        #[label("not a catsync setting")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A value of the wrong type, e.g. a string for `server.port`.
    #[error("invalid type for `{key}`: {detail}")]
    #[diagnostic(code(catsync::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        key: String,
        detail: String,
        expected: String,
    },

    /// A required key with no default.
    #[error("missing required key `{key}`")]
    #[diagnostic(
        code(catsync::config::missing_key),
        help("set `{key}` in catsync.toml or export {}", env_var_for(key))
    )]
    MissingKey { key: String },

    /// A semantic check in [`crate::validation`] failed.
    #[error("validation error: {message}")]
    #[diagnostic(code(catsync::config::validation))]
    Validation { message: String },

    /// Anything figment reports that has no dedicated variant.
    #[error("configuration error: {0}")]
    #[diagnostic(code(catsync::config::other))]
    Other(String),
}

fn unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? valid keys here: {valid_keys}"),
        None => format!("valid keys here: {valid_keys}"),
    }
}

/// Environment variable that overrides a dotted config key.
pub fn env_var_for(key: &str) -> String {
    format!("CATSYNC_{}", key.replace('.', "_").to_ascii_uppercase())
}

/// Convert a `figment::Error` (which may hold several errors) into diagnostics.
///
/// `sources` pairs each loaded file path with its content so unknown keys can
/// be underlined in place.
pub fn figment_to_config_errors(
    err: figment::Error,
    sources: &[(String, String)],
) -> Vec<ConfigError> {
    use figment::error::Kind;

    err.into_iter()
        .map(|error| {
            let dotted = dotted_path(&error.path);
            match &error.kind {
                Kind::UnknownField(field, expected) => {
                    let suggestion = suggest_key(field, expected);
                    let (span, src) = locate(&error, field, sources);
                    ConfigError::UnknownKey {
                        key: join_key(&dotted, field),
                        suggestion,
                        valid_keys: expected.join(", "),
                        span,
                        src,
                    }
                }
                Kind::MissingField(field) => ConfigError::MissingKey {
                    key: join_key(&dotted, field),
                },
                Kind::InvalidType(actual, expected) => ConfigError::InvalidType {
                    key: dotted,
                    detail: format!("found {actual}"),
                    expected: expected.to_string(),
                },
                _ => ConfigError::Other(error.to_string()),
            }
        })
        .collect()
}

fn dotted_path(path: &[String]) -> String {
    path.join(".")
}

fn join_key(path: &str, field: &str) -> String {
    if path.is_empty() {
        field.to_string()
    } else if path == field || path.ends_with(&format!(".{field}")) {
        path.to_string()
    } else {
        format!("{path}.{field}")
    }
}

/// Find the file an error came from and the span of `field` inside it.
fn locate(
    error: &figment::Error,
    field: &str,
    sources: &[(String, String)],
) -> (Option<SourceSpan>, Option<NamedSource<String>>) {
    let Some(path) = error
        .metadata
        .as_ref()
        .and_then(|m| m.source.as_ref())
        .and_then(|s| match s {
            figment::Source::File(path) => Some(path.display().to_string()),
            _ => None,
        })
    else {
        return (None, None);
    };

    let Some((name, content)) = sources.iter().find(|(p, _)| *p == path) else {
        return (None, None);
    };

    let section = error
        .path
        .first()
        .filter(|segment| segment.as_str() != field)
        .map(String::as_str);

    match find_key_offset(content, section, field) {
        Some(offset) => (
            Some(SourceSpan::new(offset.into(), field.len())),
            Some(NamedSource::new(name, content.clone())),
        ),
        None => (None, None),
    }
}

/// Byte offset of `field` at the start of a line, inside `[section]` if given.
pub fn find_key_offset(content: &str, section: Option<&str>, field: &str) -> Option<usize> {
    let start = match section {
        Some(section) => {
            let header = format!("[{section}]");
            content.find(&header)? + header.len()
        }
        None => 0,
    };

    let mut offset = start;
    for line in content[start..].split_inclusive('\n') {
        let trimmed = line.trim_start();
        if trimmed.starts_with('[') && section.is_some() {
            // Reached the next section without finding the key.
            return None;
        }
        if let Some(after) = trimmed.strip_prefix(field) {
            if after.trim_start().starts_with('=') {
                return Some(offset + (line.len() - trimmed.len()));
            }
        }
        offset += line.len();
    }
    None
}

/// Closest valid key by Jaro-Winkler similarity, if close enough.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    valid_keys
        .iter()
        .map(|key| (strsim::jaro_winkler(unknown, key), *key))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, key)| key.to_string())
}

/// Render diagnostics to stderr with miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    use miette::GraphicalReportHandler;

    let handler = GraphicalReportHandler::new();
    for error in errors {
        let mut buf = String::new();
        match handler.render_report(&mut buf, error as &dyn Diagnostic) {
            Ok(()) => eprint!("{buf}"),
            Err(_) => eprintln!("error: {error}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggests_api_key_for_typo() {
        let valid = &["endpoint", "api_key"];
        assert_eq!(suggest_key("api_kye", valid), Some("api_key".to_string()));
    }

    #[test]
    fn suggests_store_hash_for_typo() {
        let valid = &["store_hash", "api_key", "endpoint"];
        assert_eq!(suggest_key("store_hsh", valid), Some("store_hash".to_string()));
    }

    #[test]
    fn no_suggestion_for_unrelated_key() {
        let valid = &["host", "port"];
        assert_eq!(suggest_key("zzzzzz", valid), None);
    }

    #[test]
    fn finds_key_inside_its_section() {
        let content = "[source]\nendpoint = \"x\"\n\n[destination]\napi_kye = \"y\"\n";
        let offset = find_key_offset(content, Some("destination"), "api_kye").unwrap();
        assert_eq!(&content[offset..offset + 7], "api_kye");
    }

    #[test]
    fn does_not_leak_into_next_section() {
        let content = "[source]\nendpoint = \"x\"\n[queue]\ntopic = \"t\"\n";
        assert_eq!(find_key_offset(content, Some("source"), "topic"), None);
    }

    #[test]
    fn env_var_names_follow_loader_mapping() {
        assert_eq!(env_var_for("destination.store_hash"), "CATSYNC_DESTINATION_STORE_HASH");
    }

    #[test]
    fn join_key_avoids_duplicating_the_field() {
        assert_eq!(join_key("source", "api_kye"), "source.api_kye");
        assert_eq!(join_key("", "sync"), "sync");
        assert_eq!(join_key("server.port", "port"), "server.port");
    }
}
