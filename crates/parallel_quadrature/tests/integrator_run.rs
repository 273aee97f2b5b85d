//! End-to-end tests for the parallel midpoint integrator.
//!
//! Tests cover:
//! - Convergence of the estimate toward π
//! - Agreement across worker counts (no lost updates)
//! - Block coverage (claimed blocks tile the space, boundary truncation)
//! - Lifecycle (termination with idle workers, reusable controller)
//! - Configuration validation

mod common;
use common::test_config;

use anyhow::Result;
use parallel_quadrature::{Block, Integrator, IntegratorConfig};
use std::f64::consts::PI;

/// Asserts that `blocks` (sorted by start) exactly tile `[0, total)`.
fn assert_tiles(blocks: &[Block], total: u64) {
    let mut cursor = 0;
    for block in blocks {
        assert_eq!(
            block.start, cursor,
            "gap or overlap at index {} (block starts at {})",
            cursor, block.start
        );
        cursor = block.end();
    }
    assert_eq!(cursor, total, "claimed blocks stop short of the space");
}

// ============================================================================
// 1. Numerical behavior
// ============================================================================

#[test]
fn estimate_converges_to_pi() -> Result<()> {
    let integrator = Integrator::new(test_config(2_000_000, 37_501, 4))?;
    let report = integrator.run()?;

    assert!(
        (report.estimate - PI).abs() < 1e-9,
        "estimate {} differs from pi by {}",
        report.estimate,
        (report.estimate - PI).abs()
    );
    assert_eq!(report.reference, PI);
    Ok(())
}

#[test]
fn estimates_agree_across_worker_counts() -> Result<()> {
    let mut estimates = Vec::new();
    for workers in [1, 2, 4, 16] {
        let integrator = Integrator::new(test_config(400_000, 7_919, workers))?;
        estimates.push(integrator.run()?.estimate);
    }

    let first = estimates[0];
    for (i, estimate) in estimates.iter().enumerate() {
        assert!(
            ((estimate - first) / first).abs() < 1e-9,
            "worker-count run {} diverged: {} vs {}",
            i,
            estimate,
            first
        );
    }
    Ok(())
}

// ============================================================================
// 2. Work coverage
// ============================================================================

#[test]
fn claimed_blocks_tile_the_iteration_space() -> Result<()> {
    let total = 100_000;
    let integrator = Integrator::new(test_config(total, 1_024, 4))?;
    let report = integrator.run()?;

    assert_tiles(&report.claimed_blocks(), total);
    Ok(())
}

#[test]
fn boundary_block_is_truncated_at_total() -> Result<()> {
    // 10_000 is not a multiple of 3_000: the last block must end at total.
    let total = 10_000;
    let integrator = Integrator::new(test_config(total, 3_000, 2))?;
    let report = integrator.run()?;

    let blocks = report.claimed_blocks();
    assert_tiles(&blocks, total);
    assert_eq!(blocks.last().unwrap().len, 1_000);
    Ok(())
}

#[test]
fn block_size_larger_than_total_yields_one_block() -> Result<()> {
    let integrator = Integrator::new(test_config(500, 10_000, 2))?;
    let report = integrator.run()?;

    assert_eq!(report.blocks_processed(), 1);
    assert_eq!(report.claimed_blocks()[0], Block { start: 0, len: 500 });
    Ok(())
}

#[test]
fn single_worker_processes_every_block() -> Result<()> {
    let integrator = Integrator::new(test_config(10_000, 512, 1))?;
    let report = integrator.run()?;

    assert_eq!(report.workers.len(), 1);
    assert_eq!(report.workers[0].worker_id, 0);
    // ceil(10_000 / 512)
    assert_eq!(report.workers[0].blocks.len(), 20);
    assert_tiles(&report.claimed_blocks(), 10_000);
    Ok(())
}

// ============================================================================
// 3. Lifecycle
// ============================================================================

#[test]
fn terminates_with_more_workers_than_blocks() -> Result<()> {
    // Two blocks, eight workers: most workers never find work but must
    // still observe shutdown and terminate.
    let integrator = Integrator::new(test_config(100, 60, 8))?;
    let report = integrator.run()?;

    assert_eq!(report.workers.len(), 8);
    assert_eq!(report.blocks_processed(), 2);
    assert_tiles(&report.claimed_blocks(), 100);
    Ok(())
}

#[test]
fn integrator_is_reusable_across_runs() -> Result<()> {
    let integrator = Integrator::new(test_config(50_000, 999, 3))?;

    let first = integrator.run()?;
    let second = integrator.run()?;

    assert_tiles(&first.claimed_blocks(), 50_000);
    assert_tiles(&second.claimed_blocks(), 50_000);
    assert!((first.estimate - second.estimate).abs() < 1e-9);
    Ok(())
}

#[test]
fn partial_sums_add_up_to_the_estimate() -> Result<()> {
    let total = 20_000;
    let integrator = Integrator::new(test_config(total, 777, 4))?;
    let report = integrator.run()?;

    let grand_sum: f64 = report.workers.iter().map(|w| w.partial_sum).sum();
    let recombined = grand_sum * (1.0 / total as f64);
    assert!((recombined - report.estimate).abs() < 1e-9);
    Ok(())
}

// ============================================================================
// 4. Configuration validation
// ============================================================================

#[test]
fn rejects_zero_workers() {
    let config = IntegratorConfig::builder().num_workers(0).build();
    assert!(Integrator::new(config).is_err());
}

#[test]
fn rejects_zero_block_size() {
    let config = IntegratorConfig::builder().block_size(0).build();
    assert!(Integrator::new(config).is_err());
}

#[test]
fn rejects_zero_total_intervals() {
    let config = IntegratorConfig::builder().total_intervals(0).build();
    assert!(Integrator::new(config).is_err());
}
