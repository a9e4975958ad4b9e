//! Configuration types for the recipe searcher.

use std::time::Duration;

/// Default cap on diverse path search workers.
pub const DEFAULT_MAX_WORKERS: usize = 4;

/// Default pause between two attempts of the same worker.
pub const DEFAULT_ATTEMPT_DELAY: Duration = Duration::from_millis(1);

/// Default number of duplicate-only attempts after which a worker gives up.
pub const DEFAULT_MAX_STALE_ATTEMPTS: usize = 32;

/// Default upper bound on attempts per worker.
pub const DEFAULT_MAX_ATTEMPTS_PER_WORKER: usize = 256;

/// Upper bound on the slots of the multi-tree candidate channel.
///
/// The quota only caps how many trees are kept; buffering never grows past
/// this, whatever quota the caller asks for.
pub const MAX_STREAM_CAPACITY: usize = 64;

/// Configuration for the recipe searcher.
///
/// Only the diverse multi-path search reads these settings; tree builders
/// and single path resolution have no tunables.
///
/// # Example
///
/// ```rust
/// use alchemy_search::SearchConfig;
/// use std::time::Duration;
///
/// let config = SearchConfig::builder()
///     .with_max_workers(8)
///     .with_attempt_delay(Duration::ZERO)
///     .with_base_seed(42)
///     .build();
/// assert_eq!(config.max_workers, 8);
/// ```
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Upper bound on concurrent diverse search workers.
    pub max_workers: usize,
    /// Pause between attempts of the same worker.
    pub attempt_delay: Duration,
    /// Seed of worker 0; worker `i` starts at `base_seed + i`.
    pub base_seed: u64,
    /// Consecutive duplicate-only attempts after which a worker exits.
    pub max_stale_attempts: usize,
    /// Hard cap on attempts per worker.
    pub max_attempts_per_worker: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_workers: DEFAULT_MAX_WORKERS,
            attempt_delay: DEFAULT_ATTEMPT_DELAY,
            base_seed: 1,
            max_stale_attempts: DEFAULT_MAX_STALE_ATTEMPTS,
            max_attempts_per_worker: DEFAULT_MAX_ATTEMPTS_PER_WORKER,
        }
    }
}

impl SearchConfig {
    /// Creates a new builder for SearchConfig.
    pub fn builder() -> SearchConfigBuilder {
        SearchConfigBuilder::default()
    }
}

/// Builder for SearchConfig.
#[derive(Debug, Clone, Default)]
pub struct SearchConfigBuilder {
    config: SearchConfig,
}

impl SearchConfigBuilder {
    /// Sets the worker cap (clamped to at least one).
    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.config.max_workers = max_workers.max(1);
        self
    }

    /// Sets the pause between attempts.
    pub fn with_attempt_delay(mut self, delay: Duration) -> Self {
        self.config.attempt_delay = delay;
        self
    }

    /// Sets the seed of worker 0.
    pub fn with_base_seed(mut self, seed: u64) -> Self {
        self.config.base_seed = seed;
        self
    }

    /// Sets the stale attempt limit (clamped to at least one).
    pub fn with_max_stale_attempts(mut self, attempts: usize) -> Self {
        self.config.max_stale_attempts = attempts.max(1);
        self
    }

    /// Sets the per-worker attempt cap (clamped to at least one).
    pub fn with_max_attempts_per_worker(mut self, attempts: usize) -> Self {
        self.config.max_attempts_per_worker = attempts.max(1);
        self
    }

    /// Builds the SearchConfig.
    pub fn build(self) -> SearchConfig {
        self.config
    }
}
