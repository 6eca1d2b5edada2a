// SPDX-FileCopyrightText: 2026 Catsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error taxonomy for the catalog synchronizer.
//!
//! Each external collaborator has its own error type so the orchestrator can
//! apply a different propagation policy per failure kind:
//!
//! | Error              | Policy                                  |
//! |--------------------|-----------------------------------------|
//! | [`DecodeError`]    | fatal, no republish                     |
//! | [`FetchError`]     | fatal, no republish, run stalls         |
//! | [`PublishError`]   | logged, processing continues            |
//! | [`RepublishError`] | fatal, run stalls                       |
//! | [`NotifyError`]    | logged and swallowed                    |

use thiserror::Error;

/// Boxed error source shared by the transport variants.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The triggering message could not be turned into a cursor.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The push envelope was not valid JSON or lacked `message.data`.
    #[error("invalid push envelope: {0}")]
    Envelope(String),

    /// `message.data` was not valid base64.
    #[error("message data is not valid base64: {0}")]
    Base64(String),

    /// The decoded payload was not a JSON object with an `offset` key.
    #[error("invalid cursor payload: {0}")]
    Payload(String),

    /// The offset was present but not a non-negative integer.
    #[error("invalid offset `{0}`: expected a non-negative integer")]
    Offset(String),
}

/// The source catalog page could not be retrieved.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The source catalog answered with a non-success status.
    #[error("source catalog returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The request never produced a response (DNS, TLS, timeout, ...).
    #[error("source catalog request failed: {message}")]
    Transport {
        message: String,
        source: Option<BoxError>,
    },

    /// The response body was not a valid page.
    #[error("failed to decode source catalog page: {0}")]
    Decode(String),
}

/// One record could not be written to the destination catalog.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The destination catalog answered with a status other than 200/201.
    #[error("destination catalog returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The request never produced a response.
    #[error("destination catalog request failed: {message}")]
    Transport {
        message: String,
        source: Option<BoxError>,
    },
}

/// The next cursor could not be enqueued.
#[derive(Debug, Error)]
pub enum RepublishError {
    /// The cursor is already at `u64::MAX`.
    #[error("cursor {offset} cannot be advanced")]
    Overflow { offset: u64 },

    /// The queue answered with a non-success status.
    #[error("queue returned {status}: {body}")]
    Status { status: u16, body: String },

    /// No access token could be obtained for the queue.
    #[error("queue authentication failed: {0}")]
    Auth(String),

    /// The request never produced a response.
    #[error("queue request failed: {message}")]
    Transport {
        message: String,
        source: Option<BoxError>,
    },

    /// The local queue has no consumer anymore.
    #[error("queue is closed")]
    Closed,
}

/// The completion notification could not be sent.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// No API key is configured for the notification service.
    #[error("completion notifier is not configured: {0}")]
    NotConfigured(String),

    /// The notification service answered with a non-success status.
    #[error("notification service returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The request never produced a response.
    #[error("notification request failed: {message}")]
    Transport {
        message: String,
        source: Option<BoxError>,
    },
}

/// A failure that aborts one sync step.
///
/// Only the fatal kinds appear here; publish and notify failures are handled
/// inside the step.
#[derive(Debug, Error)]
pub enum StepError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Republish(#[from] RepublishError),
}

/// Process-level errors raised while wiring clients and serving.
#[derive(Debug, Error)]
pub enum CatsyncError {
    /// Invalid or unusable configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// An HTTP client could not be constructed.
    #[error("client error: {message}")]
    Client {
        message: String,
        source: Option<BoxError>,
    },

    /// The push endpoint could not bind or serve.
    #[error("server error: {message}")]
    Server {
        message: String,
        source: Option<BoxError>,
    },

    /// A sync step failed.
    #[error("sync step failed: {0}")]
    Step(#[from] StepError),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl StepError {
    /// Short label used for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            StepError::Decode(_) => "decode",
            StepError::Fetch(_) => "fetch",
            StepError::Republish(_) => "republish",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_error_is_transparent_over_its_cause() {
        let err: StepError = FetchError::Status {
            status: 500,
            body: "boom".into(),
        }
        .into();
        assert_eq!(err.to_string(), "source catalog returned 500: boom");
        assert_eq!(err.kind(), "fetch");
    }

    #[test]
    fn transport_errors_expose_their_source() {
        use std::error::Error as _;

        let err = PublishError::Transport {
            message: "connection reset".into(),
            source: Some(Box::new(std::io::Error::other("reset"))),
        };
        assert!(err.source().is_some());
    }

    #[test]
    fn step_error_converts_into_process_error() {
        let err: CatsyncError = StepError::from(RepublishError::Closed).into();
        assert!(matches!(err, CatsyncError::Step(StepError::Republish(_))));
    }
}
