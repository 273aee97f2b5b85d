use parallel_quadrature::IntegratorConfig;
use std::time::Duration;

/// Quiet, fast-polling configuration for engine tests.
pub fn test_config(total: u64, block_size: u64, workers: usize) -> IntegratorConfig {
    IntegratorConfig::builder()
        .total_intervals(total)
        .block_size(block_size)
        .num_workers(workers)
        .poll_interval(Duration::from_millis(1))
        .join_timeout(Duration::from_secs(10))
        .log_blocks(false)
        .build()
}
