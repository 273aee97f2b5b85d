//! src/integrator.rs
//!
//! The controller: owns the run configuration, spawns the worker pool,
//! drives the poll/wake loop, and orchestrates shutdown and harvest.
//!
//! One `run()` call is one computation: a fresh distributor is built, all
//! workers start parked and receive one launch wake, then the controller
//! polls until every block has been handed out, waking any worker that has
//! parked itself in the meantime. Shutdown is cooperative - the flag is set
//! and every worker gets one final unconditional wake so it can observe it.
//! The controller is reusable; no state persists across runs.

use anyhow::{anyhow, Context, Result};
use std::f64::consts::PI;
use std::sync::Arc;
use std::thread;

use crate::config::IntegratorConfig;
use crate::distributor::{Block, WorkDistributor};
use crate::workers::{WorkerPool, WorkerSummary};

/// Outcome of one computation run.
#[derive(Debug)]
pub struct RunReport {
    /// The midpoint-rule estimate of the integral
    pub estimate: f64,
    /// The analytic value of the integral (π) for comparison
    pub reference: f64,
    /// Per-worker records, ordered by worker id
    pub workers: Vec<WorkerSummary>,
}

impl RunReport {
    /// Total number of blocks processed across all workers.
    pub fn blocks_processed(&self) -> usize {
        self.workers.iter().map(|w| w.blocks.len()).sum()
    }

    /// Every claimed block across all workers, ordered by start index.
    /// A correct run tiles the iteration space exactly.
    pub fn claimed_blocks(&self) -> Vec<Block> {
        let mut blocks: Vec<Block> = self
            .workers
            .iter()
            .flat_map(|w| w.blocks.iter().copied())
            .collect();
        blocks.sort_by_key(|b| b.start);
        blocks
    }
}

/// Coordinates one pool of workers over one shared distributor per run.
pub struct Integrator {
    config: IntegratorConfig,
}

impl Integrator {
    /// Validates the configuration and builds a controller.
    ///
    /// # Errors
    /// - `num_workers` is 0
    /// - `block_size` is 0
    /// - `total_intervals` is 0
    pub fn new(config: IntegratorConfig) -> Result<Self> {
        if config.num_workers == 0 {
            return Err(anyhow!(
                "Cannot run with 0 workers. \
                Set num_workers > 0; the engine has no single-threaded fallback."
            ));
        }
        if config.block_size == 0 {
            return Err(anyhow!(
                "Block size must be greater than 0; a zero-size claim would never \
                advance the work cursor."
            ));
        }
        if config.total_intervals == 0 {
            return Err(anyhow!("Total intervals must be greater than 0"));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &IntegratorConfig {
        &self.config
    }

    /// Executes one full computation and returns the report.
    pub fn run(&self) -> Result<RunReport> {
        let distributor = Arc::new(WorkDistributor::new(
            self.config.total_intervals,
            self.config.block_size,
        ));

        let pool = WorkerPool::spawn(
            self.config.num_workers,
            distributor.clone(),
            self.config.log_blocks,
        )
        .context("Failed to initialize worker pool")?;

        // Launch: every worker was created parked; one wake apiece starts
        // the first pass.
        pool.wake_all();

        // Poll until the whole space has been handed out, reviving workers
        // that parked after their previous block. Completion lags reality by
        // at most one interval.
        while !distributor.is_exhausted() {
            pool.wake_parked();
            thread::sleep(self.config.poll_interval);
        }

        // Cooperative shutdown. The wake is unconditional: the parked flags
        // are best-effort and must not decide who gets the final wake.
        distributor.request_shutdown();
        pool.wake_all();

        let workers = pool
            .join_all(self.config.join_timeout)
            .context("Failed to harvest worker results")?;

        let estimate = distributor.accumulator() * (1.0 / self.config.total_intervals as f64);
        Ok(RunReport {
            estimate,
            reference: PI,
            workers,
        })
    }
}
