//! src/config.rs
//!
//! Configuration for the parallel integrator.
//!
//! `IntegratorConfig` stores the run parameters that control how the
//! iteration space is split and how the controller supervises its workers.
//!
//! Example:
//! ```ignore
//! let config = IntegratorConfig::builder()
//!     .total_intervals(1_000_000_000)
//!     .block_size(3_316_220)
//!     .num_workers(4)
//!     .poll_interval(Duration::from_millis(100))
//!     .build();
//! ```
//!
//! # Performance considerations:
//! - `block_size`: Larger blocks mean fewer lock acquisitions but coarser
//!   load balancing near the end of the range
//! - `poll_interval`: Lower values wake idle workers sooner at the cost of
//!   more controller wake passes

use std::time::Duration;

/// Default number of sub-intervals in the iteration space.
pub const DEFAULT_TOTAL_INTERVALS: u64 = 1_000_000_000;

/// Default number of sub-intervals granted per work claim.
pub const DEFAULT_BLOCK_SIZE: u64 = 3_316_220;

/// Default number of worker threads.
pub const DEFAULT_NUM_WORKERS: usize = 4;

/// Default controller sleep between wake passes (milliseconds).
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Configuration for the Integrator
#[derive(Clone, Debug)]
pub struct IntegratorConfig {
    /// Total number of sub-intervals in `[0, 1)` (the iteration space)
    pub total_intervals: u64,
    /// Number of sub-intervals handed out per work claim
    pub block_size: u64,
    /// Number of worker threads (must be > 0)
    pub num_workers: usize,
    /// Controller sleep granularity between wake passes.
    /// Not a correctness knob - just how quickly idle workers are revived.
    pub poll_interval: Duration,
    /// Maximum time to wait for each worker to report back at shutdown.
    /// If exceeded, returns an error (assuming a worker is stuck). Default: 30s
    pub join_timeout: Duration,
    /// Whether workers print one diagnostic line per completed block
    pub log_blocks: bool,
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self {
            total_intervals: DEFAULT_TOTAL_INTERVALS,
            block_size: DEFAULT_BLOCK_SIZE,
            num_workers: DEFAULT_NUM_WORKERS,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            join_timeout: Duration::from_secs(30),
            log_blocks: true,
        }
    }
}

impl IntegratorConfig {
    pub fn builder() -> IntegratorConfigBuilder {
        IntegratorConfigBuilder::default()
    }
}

/// Builder for IntegratorConfig with method chaining
#[derive(Default)]
pub struct IntegratorConfigBuilder {
    config: IntegratorConfig,
}

impl IntegratorConfigBuilder {
    /// Set the total number of sub-intervals (must be > 0)
    pub fn total_intervals(mut self, total: u64) -> Self {
        self.config.total_intervals = total;
        self
    }

    /// Set the block size handed out per claim (must be > 0)
    pub fn block_size(mut self, size: u64) -> Self {
        self.config.block_size = size;
        self
    }

    /// Set the number of worker threads
    pub fn num_workers(mut self, workers: usize) -> Self {
        self.config.num_workers = workers;
        self
    }

    /// Set the controller polling interval
    ///
    /// - Too low: More responsive wake-ups, more controller passes.
    /// - Too high: Idle workers sit parked for up to one interval.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.config.poll_interval = interval;
        self
    }

    /// Set the per-worker join timeout.
    ///
    /// - Too low: May abort a legitimate long-running final block
    /// - Too high: Delays detection of a stuck worker
    pub fn join_timeout(mut self, timeout: Duration) -> Self {
        self.config.join_timeout = timeout;
        self
    }

    /// Enable or disable the per-block diagnostic line.
    pub fn log_blocks(mut self, log: bool) -> Self {
        self.config.log_blocks = log;
        self
    }

    /// Build the final configuration.
    pub fn build(self) -> IntegratorConfig {
        self.config
    }
}
