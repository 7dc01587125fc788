//! Indexer configuration.

use std::time::Duration;

/// Tuning knobs for the indexing loop.
#[derive(Debug, Clone)]
pub struct IndexerConfig {
    /// Initial delay when the chain has no new block (or is
    /// unavailable). Doubles per idle round up to `max_backoff` and
    /// resets on progress.
    pub poll_interval: Duration,
    /// Upper bound for the backoff delay.
    pub max_backoff: Duration,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(250),
            max_backoff: Duration::from_secs(10),
        }
    }
}

impl IndexerConfig {
    /// The delay following `current`, capped at `max_backoff`.
    pub fn next_backoff(&self, current: Duration) -> Duration {
        (current * 2).min(self.max_backoff)
    }
}
