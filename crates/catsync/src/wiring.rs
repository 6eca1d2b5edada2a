// SPDX-FileCopyrightText: 2026 Catsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builds the concrete adapters from configuration.

use std::sync::Arc;

use catsync_bigcommerce::BigCommerceSink;
use catsync_catalogiq::CatalogIqSource;
use catsync_config::CatsyncConfig;
use catsync_core::CatsyncError;
use catsync_engine::{LocalDriver, SyncStep};
use catsync_pubsub::PubSubPublisher;
use catsync_sendgrid::SendGridNotifier;

/// The three HTTP adapters every sync step needs besides its queue.
pub struct Adapters {
    pub source: Arc<CatalogIqSource>,
    pub sink: Arc<BigCommerceSink>,
    pub notifier: Arc<SendGridNotifier>,
}

pub fn build_adapters(config: &CatsyncConfig) -> Result<Adapters, CatsyncError> {
    Ok(Adapters {
        source: Arc::new(CatalogIqSource::from_config(config)?),
        sink: Arc::new(BigCommerceSink::from_config(config)?),
        notifier: Arc::new(SendGridNotifier::from_config(config)?),
    })
}

/// A sync step whose continuations go to Pub/Sub.
pub fn build_step(config: &CatsyncConfig) -> Result<SyncStep, CatsyncError> {
    let adapters = build_adapters(config)?;
    let queue = Arc::new(PubSubPublisher::from_config(config)?);
    Ok(SyncStep::new(
        adapters.source,
        adapters.sink,
        adapters.notifier,
        queue,
    ))
}

/// A driver whose continuations stay in process.
pub fn build_local_driver(config: &CatsyncConfig) -> Result<LocalDriver, CatsyncError> {
    let adapters = build_adapters(config)?;
    Ok(LocalDriver::new(
        adapters.source,
        adapters.sink,
        adapters.notifier,
    ))
}
