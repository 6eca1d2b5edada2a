// SPDX-FileCopyrightText: 2026 Catsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SendGrid v3 `mail/send` request body.

use serde::Serialize;

/// Subject line of the completion email.
pub const COMPLETION_SUBJECT: &str = "Brand Completed";

/// Body of the completion email.
pub const COMPLETION_BODY: &str =
    "The synchronization process for your products has been completed successfully.";

/// Fixed recipient of the completion email.
pub const COMPLETION_RECIPIENT: &str = "notify@catalogiq.app";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MailRequest {
    pub personalizations: Vec<Personalization>,
    pub from: Address,
    pub subject: String,
    pub content: Vec<Content>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Personalization {
    pub to: Vec<Address>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Address {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Content {
    #[serde(rename = "type")]
    pub content_type: String,
    pub value: String,
}

impl MailRequest {
    /// The "sync completed" email sent from `from_email`.
    pub fn completion(from_email: &str) -> Self {
        Self {
            personalizations: vec![Personalization {
                to: vec![Address {
                    email: COMPLETION_RECIPIENT.to_string(),
                }],
            }],
            from: Address {
                email: from_email.to_string(),
            },
            subject: COMPLETION_SUBJECT.to_string(),
            content: vec![Content {
                content_type: "text/html".to_string(),
                value: COMPLETION_BODY.to_string(),
            }],
        }
    }
}
