//! src/workers.rs
//!
//! Worker threads and their lifecycle.
//!
//! Each worker runs a small state machine: park until the controller wakes
//! it, then either terminate (shutdown requested), or claim one block from
//! the shared distributor, integrate it, contribute the partial sum, and
//! park again. Workers are created parked and only ever woken from the
//! outside; they never resume themselves.
//!
//! # Wake protocol
//!
//! Suspension uses `std::thread::park` with `Thread::unpark`. Unpark
//! banks a token when the target is not parked, so a wake issued while a
//! worker is still on its way to the park takes effect the moment the park
//! is reached - the classic missed-resume race of suspend/resume designs
//! cannot occur. The per-worker `parked` flag is best-effort bookkeeping
//! that only steers which workers the controller bothers to wake; a stale
//! read costs one spurious pass, never a lost wake.

use anyhow::{anyhow, Context, Result};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::distributor::{Block, WorkDistributor};
use crate::integrand::midpoint_block_sum;

/// What one worker did during a run, reported to the controller when the
/// worker terminates.
#[derive(Debug)]
pub struct WorkerSummary {
    /// Stable worker identity, assigned at spawn
    pub worker_id: usize,
    /// Every block this worker claimed and integrated, in claim order
    pub blocks: Vec<Block>,
    /// Sum of this worker's block contributions
    pub partial_sum: f64,
}

/// Controller-side record of one worker thread.
struct WorkerHandle {
    id: usize,
    /// Best-effort view of whether the worker is currently parked. Written
    /// by the worker when it parks and by the controller when it wakes it.
    parked: Arc<AtomicBool>,
    join: thread::JoinHandle<()>,
}

impl WorkerHandle {
    fn wake(&self) {
        self.parked.store(false, Ordering::Release);
        self.join.thread().unpark();
    }
}

/// The pool of worker threads for one run.
///
/// Workers communicate back through a bounded summary channel; the
/// controller uses it both to harvest per-worker records and to bound the
/// wait at shutdown.
pub(crate) struct WorkerPool {
    workers: Vec<WorkerHandle>,
    done_rx: Receiver<WorkerSummary>,
}

impl WorkerPool {
    /// Spawns `num_workers` threads, each starting parked.
    ///
    /// Thread-creation failure is fatal to the run: already-spawned workers
    /// are shut down and joined before the error propagates.
    pub(crate) fn spawn(
        num_workers: usize,
        distributor: Arc<WorkDistributor>,
        log_blocks: bool,
    ) -> Result<Self> {
        let (done_tx, done_rx) = bounded(num_workers);
        let mut workers = Vec::with_capacity(num_workers);

        for worker_id in 0..num_workers {
            let parked = Arc::new(AtomicBool::new(true));
            let spawned = thread::Builder::new()
                .name(format!("quadrature-worker-{}", worker_id))
                .spawn({
                    let distributor = distributor.clone();
                    let parked = parked.clone();
                    let done_tx = done_tx.clone();
                    move || worker_loop(worker_id, distributor, parked, done_tx, log_blocks)
                });

            match spawned {
                Ok(join) => workers.push(WorkerHandle {
                    id: worker_id,
                    parked,
                    join,
                }),
                Err(e) => {
                    // No partial result: unwind the workers that did start.
                    distributor.request_shutdown();
                    for worker in &workers {
                        worker.wake();
                    }
                    for worker in workers {
                        let _ = worker.join.join();
                    }
                    return Err(e)
                        .with_context(|| format!("Failed to spawn worker thread {}", worker_id));
                }
            }
        }

        Ok(Self { workers, done_rx })
    }

    /// Wakes every worker whose announced state is parked, clearing the
    /// flag. One controller poll pass.
    pub(crate) fn wake_parked(&self) {
        for worker in &self.workers {
            if worker.parked.load(Ordering::Acquire) {
                worker.wake();
            }
        }
    }

    /// Wakes every worker unconditionally. Used at launch and after the
    /// shutdown request, where a stale parked flag must not leave a worker
    /// suspended forever.
    pub(crate) fn wake_all(&self) {
        for worker in &self.workers {
            worker.wake();
        }
    }

    /// Collects one summary per worker, then joins the threads.
    ///
    /// The wait is bounded per worker: a timeout or a dropped channel is
    /// surfaced as an error instead of hanging the controller.
    pub(crate) fn join_all(mut self, timeout: Duration) -> Result<Vec<WorkerSummary>> {
        let mut summaries = Vec::with_capacity(self.workers.len());
        for _ in 0..self.workers.len() {
            let summary = self.done_rx.recv_timeout(timeout).map_err(|e| match e {
                RecvTimeoutError::Timeout => anyhow!(
                    "Worker failed to terminate within {:?} - possible missed wake or deadlock",
                    timeout
                ),
                RecvTimeoutError::Disconnected => {
                    anyhow!("Worker channel disconnected - a worker thread may have crashed")
                }
            })?;
            summaries.push(summary);
        }

        // Every summary has arrived, so each thread is returning; these
        // joins do not block meaningfully.
        for worker in self.workers.drain(..) {
            worker
                .join
                .join()
                .map_err(|_| anyhow!("Worker {} panicked", worker.id))?;
        }

        summaries.sort_by_key(|s| s.worker_id);
        Ok(summaries)
    }
}

/// The worker state machine: Parked -> Running -> (Parked | Terminated).
fn worker_loop(
    worker_id: usize,
    distributor: Arc<WorkDistributor>,
    parked: Arc<AtomicBool>,
    done_tx: Sender<WorkerSummary>,
    log_blocks: bool,
) {
    let total = distributor.total();
    let mut blocks = Vec::new();
    let mut partial_sum = 0.0;

    loop {
        // Parked: wait for the controller. A banked unpark token makes this
        // return immediately; a spurious return just costs one idle pass
        // through the claim check.
        thread::park();

        // Running: shutdown wins over further work.
        if distributor.is_shutdown_requested() {
            break;
        }

        if let Some(block) = distributor.try_claim_block() {
            let partial = midpoint_block_sum(block.start, block.end(), total);
            distributor.contribute(partial);
            if log_blocks {
                println!(
                    "Worker {} processed iterations {}-{} (partial sum = {:.6})",
                    worker_id,
                    block.start,
                    block.end() - 1,
                    partial
                );
            }
            blocks.push(block);
            partial_sum += partial;
        }

        // Back to Parked, with or without work done this pass. The
        // announcement precedes the park above on the next iteration;
        // token semantics cover the gap between the two.
        parked.store(true, Ordering::Release);
    }

    // Terminated. The controller may already be gone on an aborted run.
    let _ = done_tx.send(WorkerSummary {
        worker_id,
        blocks,
        partial_sum,
    });
}
