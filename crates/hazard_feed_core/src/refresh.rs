//! Periodic re-aggregation for long-lived map views.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, warn};

use crate::aggregator::Aggregator;
use crate::models::AggregatedFeed;

pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(15 * 60);

/// Shorter periods are raised to this; `tokio::time::interval` rejects zero.
pub const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(1);

/// Owns the refresh task. Dropping it (or calling `stop`) cancels the timer.
pub struct RefreshLoop {
    handle: JoinHandle<()>,
    feed_rx: watch::Receiver<Option<Arc<AggregatedFeed>>>,
}

impl RefreshLoop {
    /// Aggregates immediately, then once per `period` (at least
    /// [`MIN_REFRESH_INTERVAL`]). Must be called inside a tokio runtime.
    pub fn spawn(aggregator: Arc<Aggregator>, period: Duration) -> Self {
        if period < MIN_REFRESH_INTERVAL {
            warn!(requested = ?period, "refresh period too short, using minimum");
        }
        let period = period.max(MIN_REFRESH_INTERVAL);
        let (feed_tx, feed_rx) = watch::channel(None);
        let handle = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                match aggregator.fetch_all().await {
                    Ok(feed) => {
                        info!(events = feed.events.len(), sources = %feed.sources, "hazard feed refreshed");
                        if feed_tx.send(Some(Arc::new(feed))).is_err() {
                            // Every receiver is gone, nobody is watching.
                            break;
                        }
                    }
                    // Keep showing the previous feed.
                    Err(e) => warn!(error = %e, "hazard feed refresh failed"),
                }
            }
        });
        Self { handle, feed_rx }
    }

    /// Most recent successful feed, if any pass has completed.
    pub fn latest(&self) -> Option<Arc<AggregatedFeed>> {
        self.feed_rx.borrow().clone()
    }

    /// Receiver that is notified on every successful refresh.
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<AggregatedFeed>>> {
        self.feed_rx.clone()
    }

    pub fn stop(&self) {
        self.handle.abort();
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for RefreshLoop {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
