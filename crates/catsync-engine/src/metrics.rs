// SPDX-FileCopyrightText: 2026 Catsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Metric registration and recording helpers.
//!
//! Uses the metrics-rs facade; without an installed recorder every call is a
//! no-op, so the engine can be driven from tests unchanged.

use metrics::{describe_counter, describe_histogram};

/// Register all catsync metric descriptions.
///
/// Called once at startup after the recorder is installed.
pub fn register_metrics() {
    describe_counter!("catsync_steps_total", "Sync steps by outcome");
    describe_counter!(
        "catsync_records_published_total",
        "Records accepted by the destination catalog"
    );
    describe_counter!(
        "catsync_records_failed_total",
        "Records the destination catalog rejected"
    );
    describe_counter!(
        "catsync_notifications_total",
        "Completion notifications by result"
    );
    describe_histogram!(
        "catsync_step_duration_seconds",
        "Wall time of one sync step in seconds"
    );
}

/// Record the end of a step. `outcome` is `advanced`, `completed` or an error kind.
pub fn record_step(outcome: &'static str, seconds: f64) {
    metrics::counter!("catsync_steps_total", "outcome" => outcome).increment(1);
    metrics::histogram!("catsync_step_duration_seconds").record(seconds);
}

/// Record one successful publish.
pub fn record_published() {
    metrics::counter!("catsync_records_published_total").increment(1);
}

/// Record one rejected publish.
pub fn record_failed() {
    metrics::counter!("catsync_records_failed_total").increment(1);
}

/// Record a notification attempt. `result` is `sent` or `failed`.
pub fn record_notification(result: &'static str) {
    metrics::counter!("catsync_notifications_total", "result" => result).increment(1);
}
