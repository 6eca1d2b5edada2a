// SPDX-FileCopyrightText: 2026 Catsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cursor queue adapters for catsync.
//!
//! [`PubSubPublisher`] publishes cursor messages to a Google Cloud Pub/Sub
//! topic; [`LocalQueue`] keeps them in process for the local driver. The
//! [`envelope`] module decodes the push deliveries that trigger each step.

pub mod envelope;
pub mod local;
pub mod publisher;

pub use envelope::{PushEnvelope, decode_cursor, decode_push, encode_cursor};
pub use local::{LocalQueue, LocalReceiver};
pub use publisher::PubSubPublisher;
