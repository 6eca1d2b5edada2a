// SPDX-FileCopyrightText: 2026 Catsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Operator commands: `step`, `trigger`, `run` and `config`.

use catsync_config::CatsyncConfig;
use catsync_core::traits::CursorQueue;
use catsync_core::{CatsyncError, SyncCursor};
use catsync_engine::StepOutcome;
use catsync_pubsub::PubSubPublisher;
use tracing::info;

use crate::wiring;

/// `catsync step --offset <n>`
pub async fn run_step(config: &CatsyncConfig, offset: u64) -> Result<(), CatsyncError> {
    let step = wiring::build_step(config)?;
    match step.run(SyncCursor::new(offset)).await? {
        StepOutcome::Advanced {
            next,
            published,
            failed,
        } => println!("advanced to offset {next}: {published} published, {failed} failed"),
        StepOutcome::Completed => println!("offset {offset} is past the end of the catalog; run completed"),
    }
    Ok(())
}

/// `catsync trigger --offset <n>`
pub async fn run_trigger(config: &CatsyncConfig, offset: u64) -> Result<(), CatsyncError> {
    let queue = PubSubPublisher::from_config(config)?;
    let cursor = SyncCursor::new(offset);
    queue
        .enqueue(cursor)
        .await
        .map_err(|e| CatsyncError::Step(e.into()))?;
    info!(offset, topic = %config.queue.topic_path(), "cursor message published");
    println!("published offset {offset} to {}", config.queue.topic_path());
    Ok(())
}

/// `catsync run --from <n>`
pub async fn run_local(config: &CatsyncConfig, from: u64) -> Result<(), CatsyncError> {
    let driver = wiring::build_local_driver(config)?;
    let summary = driver.run(SyncCursor::new(from)).await?;
    println!(
        "{} steps, {} published, {} failed, stopped at offset {}{}",
        summary.steps,
        summary.published,
        summary.failed,
        summary.last_cursor,
        if summary.completed { " (completed)" } else { "" }
    );
    Ok(())
}

/// `catsync config`
pub fn show_config(config: &CatsyncConfig) -> Result<(), CatsyncError> {
    print!("{}", render_config(config)?);
    Ok(())
}

fn render_config(config: &CatsyncConfig) -> Result<String, CatsyncError> {
    toml::to_string_pretty(&config.redacted())
        .map_err(|e| CatsyncError::Internal(format!("failed to render configuration: {e}")))
}
