// SPDX-FileCopyrightText: 2026 Catsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cursor and idempotency types shared by every adapter.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{DecodeError, RepublishError};

/// Position of the next record to sync in the source catalog's ordering.
///
/// The cursor is the entire durable state of a sync run. It only moves
/// forward, one page at a time, by publishing a brand-new message.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SyncCursor(u64);

impl SyncCursor {
    /// The cursor a fresh run starts from.
    pub const START: SyncCursor = SyncCursor(0);

    pub fn new(offset: u64) -> Self {
        Self(offset)
    }

    pub fn offset(self) -> u64 {
        self.0
    }

    /// Returns the cursor that follows this one.
    pub fn next(self) -> Result<Self, RepublishError> {
        self.0
            .checked_add(1)
            .map(Self)
            .ok_or(RepublishError::Overflow { offset: self.0 })
    }
}

impl fmt::Display for SyncCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SyncCursor {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        // u64::from_str accepts a leading '+'; offsets on the wire never carry one.
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DecodeError::Offset(s.to_string()));
        }
        trimmed
            .parse::<u64>()
            .map(Self)
            .map_err(|_| DecodeError::Offset(s.to_string()))
    }
}

/// Deterministic token that lets downstream systems drop duplicate writes.
///
/// Derived from the cursor (and record identity), so a redelivered message
/// produces the same keys as the original delivery.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdempotencyKey(String);

impl IdempotencyKey {
    /// Key for writing the record with `sku` found at `cursor`.
    pub fn for_record(cursor: SyncCursor, sku: &str) -> Self {
        Self::derive(&format!("catsync/record/{}/{sku}", cursor.offset()))
    }

    /// Key for the message that carries `cursor`.
    pub fn for_cursor(cursor: SyncCursor) -> Self {
        Self::derive(&format!("catsync/cursor/{}", cursor.offset()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn derive(material: &str) -> Self {
        Self(hex::encode(Sha256::digest(material.as_bytes())))
    }
}

impl fmt::Display for IdempotencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
