// SPDX-FileCopyrightText: 2026 Catsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cursor message codec and the Pub/Sub push envelope around it.
//!
//! A cursor message is the JSON object `{"offset": "<n>"}`. Pub/Sub wraps it
//! base64-encoded in `message.data` when delivering to a push endpoint.

use std::collections::HashMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use catsync_core::{DecodeError, SyncCursor};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body Pub/Sub posts to a push subscription endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushEnvelope {
    pub message: PushMessage,
    #[serde(default)]
    pub subscription: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushMessage {
    /// Base64 of the cursor payload.
    pub data: String,
    #[serde(default)]
    pub message_id: Option<String>,
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

/// Serializes `cursor` as a cursor message payload.
pub fn encode_cursor(cursor: SyncCursor) -> Vec<u8> {
    serde_json::json!({ "offset": cursor.to_string() })
        .to_string()
        .into_bytes()
}

/// Parses a raw cursor message payload.
///
/// The offset may be a decimal string or a bare non-negative integer.
pub fn decode_cursor(payload: &[u8]) -> Result<SyncCursor, DecodeError> {
    let value: Value =
        serde_json::from_slice(payload).map_err(|e| DecodeError::Payload(e.to_string()))?;
    let offset = value
        .as_object()
        .ok_or_else(|| DecodeError::Payload("expected a JSON object".to_string()))?
        .get("offset")
        .ok_or_else(|| DecodeError::Payload("missing `offset`".to_string()))?;

    match offset {
        Value::String(s) => s.parse(),
        Value::Number(n) => n
            .as_u64()
            .map(SyncCursor::new)
            .ok_or_else(|| DecodeError::Offset(n.to_string())),
        other => Err(DecodeError::Offset(other.to_string())),
    }
}

/// Base64-encodes a cursor payload for `message.data`.
pub fn encode_data(cursor: SyncCursor) -> String {
    STANDARD.encode(encode_cursor(cursor))
}

/// Extracts the cursor from a push delivery body.
pub fn decode_push(body: &[u8]) -> Result<SyncCursor, DecodeError> {
    let envelope: PushEnvelope =
        serde_json::from_slice(body).map_err(|e| DecodeError::Envelope(e.to_string()))?;
    let payload = STANDARD
        .decode(envelope.message.data.trim())
        .map_err(|e| DecodeError::Base64(e.to_string()))?;
    decode_cursor(&payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push_body(data: &str) -> Vec<u8> {
        serde_json::json!({
            "message": {"data": data, "messageId": "136969346945", "attributes": {}},
            "subscription": "projects/acme/subscriptions/catalog-sync"
        })
        .to_string()
        .into_bytes()
    }

    #[test]
    fn cursor_payload_uses_string_offset() {
        assert_eq!(encode_cursor(SyncCursor::new(42)), br#"{"offset":"42"}"#.to_vec());
    }

    #[test]
    fn decodes_string_and_integer_offsets() {
        assert_eq!(decode_cursor(br#"{"offset":"7"}"#).unwrap(), SyncCursor::new(7));
        assert_eq!(decode_cursor(br#"{"offset":7}"#).unwrap(), SyncCursor::new(7));
    }

    #[test]
    fn rejects_negative_and_non_numeric_offsets() {
        for payload in [
            &br#"{"offset":"-1"}"#[..],
            br#"{"offset":-1}"#,
            br#"{"offset":"abc"}"#,
            br#"{"offset":"1.5"}"#,
            br#"{"offset":1.5}"#,
            br#"{"offset":null}"#,
        ] {
            let err = decode_cursor(payload).unwrap_err();
            assert!(
                matches!(err, DecodeError::Offset(_)),
                "{}: {err:?}",
                String::from_utf8_lossy(payload)
            );
        }
    }

    #[test]
    fn rejects_payloads_without_offset() {
        assert!(matches!(
            decode_cursor(br#"{"cursor":"1"}"#),
            Err(DecodeError::Payload(_))
        ));
        assert!(matches!(decode_cursor(b"[1]"), Err(DecodeError::Payload(_))));
        assert!(matches!(decode_cursor(b"not json"), Err(DecodeError::Payload(_))));
    }

    #[test]
    fn decodes_push_envelope() {
        let body = push_body(&encode_data(SyncCursor::new(41)));
        assert_eq!(decode_push(&body).unwrap(), SyncCursor::new(41));
    }

    #[test]
    fn envelope_without_message_is_rejected() {
        let err = decode_push(br#"{"subscription":"s"}"#).unwrap_err();
        assert!(matches!(err, DecodeError::Envelope(_)));
    }

    #[test]
    fn bad_base64_is_rejected() {
        let err = decode_push(&push_body("%%% not base64 %%%")).unwrap_err();
        assert!(matches!(err, DecodeError::Base64(_)));
    }

    #[test]
    fn base64_of_garbage_is_a_payload_error() {
        let err = decode_push(&push_body(&STANDARD.encode("hello"))).unwrap_err();
        assert!(matches!(err, DecodeError::Payload(_)));
    }
}
