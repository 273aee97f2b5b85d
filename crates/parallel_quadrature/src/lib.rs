//! src/lib.rs
//!
//! Parallel midpoint-rule quadrature over a fixed iteration space.
//!
//! The crate estimates π by integrating `4 / (1 + x²)` over `[0, 1]` with a
//! midpoint Riemann sum, split across a pool of native worker threads. Work
//! is handed out in fixed-size blocks from a single lock-guarded ledger;
//! idle workers park themselves and are woken by a polling controller.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌──────────────────┐
//!                 │ IntegratorConfig │ (intervals, block size, workers, ...)
//!                 └────────┬─────────┘
//!                          │
//!                          ↓
//!                   ┌────────────┐
//!                   │ Integrator │ (controller: launch / wake / shutdown)
//!                   └─────┬──────┘
//!                         │ spawns N parked workers
//!                         ↓
//!                  [Worker Threads]
//!                         │ claim block → midpoint sum → contribute → park
//!                         ↓
//!                 ┌─────────────────┐
//!                 │ WorkDistributor │ (cursor + accumulator + shutdown flag,
//!                 └────────┬────────┘  one mutex)
//!                          │ final accumulator
//!                          ↓
//!                    ┌───────────┐
//!                    │ RunReport │ (estimate + per-worker block records)
//!                    └───────────┘
//! ```

pub mod config;
pub mod distributor;
pub mod integrand;
pub mod integrator;
mod workers;

pub use config::IntegratorConfig;
pub use distributor::{Block, WorkDistributor};
pub use integrator::{Integrator, RunReport};
pub use workers::WorkerSummary;
