//! src/distributor.rs
//!
//! The shared work ledger: a cursor into the iteration space, the running
//! accumulator, and the shutdown flag, all guarded by a single mutex.
//!
//! Every worker and the controller share one `WorkDistributor` through an
//! `Arc`. The three ledger fields are only ever touched as a unit under the
//! lock, and nothing blocks while holding it, so block assignment is
//! linearized: no two workers ever receive overlapping ranges and the
//! cursor only advances.

use std::sync::{Mutex, MutexGuard, PoisonError};

/// A contiguous sub-range of the iteration space, claimed atomically by one
/// worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Block {
    /// First sub-interval index in the block
    pub start: u64,
    /// Number of sub-intervals in the block (already clamped to the space)
    pub len: u64,
}

impl Block {
    /// One past the last sub-interval index in the block.
    pub fn end(&self) -> u64 {
        self.start + self.len
    }
}

/// The lock-protected state. Fields are never read or written outside the
/// distributor's mutex.
struct Ledger {
    accumulator: f64,
    next_index: u64,
    shutdown_requested: bool,
}

/// Hands out fixed-size work blocks and collects partial sums.
///
/// Lifetime is one computation run; the controller creates a fresh
/// distributor per run and reads the accumulator only after all workers
/// have terminated.
pub struct WorkDistributor {
    total: u64,
    block_size: u64,
    ledger: Mutex<Ledger>,
}

impl WorkDistributor {
    pub fn new(total: u64, block_size: u64) -> Self {
        Self {
            total,
            block_size,
            ledger: Mutex::new(Ledger {
                accumulator: 0.0,
                next_index: 0,
                shutdown_requested: false,
            }),
        }
    }

    /// Total number of sub-intervals in the iteration space.
    pub fn total(&self) -> u64 {
        self.total
    }

    // Nothing under the lock can panic, but a poisoned guard would otherwise
    // wedge every remaining worker behind an unwrap.
    fn ledger(&self) -> MutexGuard<'_, Ledger> {
        self.ledger.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Claims the next block of work, or `None` once the space is exhausted.
    ///
    /// The returned block is clamped so it never extends past the iteration
    /// space; the cursor still advances by a full block size, so it may
    /// overshoot the upper bound by less than one block. Assignment is
    /// first-come-first-served among whichever worker takes the lock next.
    pub fn try_claim_block(&self) -> Option<Block> {
        let mut ledger = self.ledger();
        if ledger.next_index >= self.total {
            return None;
        }
        let start = ledger.next_index;
        let len = self.block_size.min(self.total - start);
        ledger.next_index += self.block_size;
        Some(Block { start, len })
    }

    /// Adds one worker's partial sum into the shared accumulator.
    ///
    /// The order of additions across workers is unspecified, so the
    /// accumulator is not bit-exact reproducible run to run.
    pub fn contribute(&self, partial_sum: f64) {
        self.ledger().accumulator += partial_sum;
    }

    /// True once every block has been handed out. Controller-side only;
    /// workers learn the same fact from `try_claim_block` returning `None`.
    pub fn is_exhausted(&self) -> bool {
        self.ledger().next_index >= self.total
    }

    /// Requests cooperative shutdown. Idempotent; the flag never resets.
    pub fn request_shutdown(&self) {
        self.ledger().shutdown_requested = true;
    }

    pub fn is_shutdown_requested(&self) -> bool {
        self.ledger().shutdown_requested
    }

    /// The accumulated grand sum. Meaningful once all workers have
    /// terminated.
    pub fn accumulator(&self) -> f64 {
        self.ledger().accumulator
    }
}
