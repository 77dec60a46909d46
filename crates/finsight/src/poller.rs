//! Live-price refresh loop
//!
//! The live-prices panel refreshes itself on a fixed cadence: one cycle
//! runs, then exactly one follow-up delay is armed, counted from the
//! cycle's completion. The chain never overlaps itself and never halts on
//! failure; a failed cycle already rendered the panel's static message and
//! the next delay is armed all the same. The spawned task runs until the
//! handle shuts it down.

use crate::dashboard::Dashboard;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Recurring live-price refresh task
pub struct PricePoller {
    dashboard: Arc<Dashboard>,
    interval: Duration,
}

impl PricePoller {
    /// Create a poller driving the given dashboard
    pub fn new(dashboard: Arc<Dashboard>, interval: Duration) -> Self {
        Self {
            dashboard,
            interval,
        }
    }

    /// Start the refresh chain and hand back its owning handle
    ///
    /// The first cycle runs immediately; no backoff, no jitter, no cap on
    /// the chain length.
    pub fn spawn(self) -> PollerHandle {
        info!(
            "starting live-price poller, refresh delay {:?}",
            self.interval
        );

        let task = tokio::spawn(async move {
            loop {
                self.dashboard.refresh_live_prices().await;
                debug!("live-price cycle complete, next in {:?}", self.interval);
                tokio::time::sleep(self.interval).await;
            }
        });

        PollerHandle { task }
    }
}

/// Owned handle to a running poller
///
/// Dropping the handle detaches the chain (it keeps running until the
/// runtime shuts down); call [`PollerHandle::shutdown`] for an explicit
/// teardown.
#[derive(Debug)]
pub struct PollerHandle {
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Stop the refresh chain
    pub fn shutdown(&self) {
        self.task.abort();
    }

    /// Whether the chain has stopped
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
