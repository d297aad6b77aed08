//! Parallel processing of independent batches.
//!
//! ```text
//!   caller thread                 worker threads (N)
//!   ─────────────                 ──────────────────
//!   batches ──send──▶ [bounded(N*2)] ──recv──▶ StrangenessQa (own registry)
//!                                                   │
//!   merge ◀──────────── join ◀──────────────────────┘
//! ```
//!
//! Every worker owns a complete [`StrangenessQa`] (registry and event
//! selector included); nothing is shared while batches are processed.
//! The partial registries are summed bin by bin at the end, so the result
//! does not depend on the worker count or on which worker got which batch.

use std::thread;
use std::time::Instant;

use strareco_core::StrangenessTables;
use strareco_hist::HistogramRegistry;
use tracing::{debug, info};

use crate::analysis::StrangenessQa;
use crate::config::QaConfig;
use crate::error::QaError;
use crate::layout::strangeness_registry;
use crate::report::RunSummary;

/// Merged result of a sharded run.
#[derive(Clone, Debug, PartialEq)]
pub struct ShardedOutput {
    /// Histograms summed over every worker.
    pub registry: HistogramRegistry,
    /// Totals summed over every worker.
    pub summary: RunSummary,
}

/// Distributes batches over a fixed pool of worker threads.
#[derive(Clone, Debug)]
pub struct ShardedRunner {
    config: QaConfig,
    worker_count: Option<usize>,
}

impl ShardedRunner {
    /// Create a runner. `worker_count` of `None` auto-detects.
    pub fn new(config: QaConfig, worker_count: Option<usize>) -> Result<Self, QaError> {
        config.validate()?;
        Ok(Self {
            config,
            worker_count,
        })
    }

    /// Number of worker threads a run will use.
    ///
    /// Explicit counts are clamped to `[1, 64]`. Auto-detection uses
    /// half the available cores, clamped to `[2, 16]`.
    pub fn resolved_worker_count(&self) -> usize {
        match self.worker_count {
            Some(n) => n.clamp(1, 64),
            None => {
                let cpus = thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(4);
                (cpus / 2).clamp(2, 16)
            }
        }
    }

    /// Process every batch and merge the per-worker results.
    ///
    /// On the first failing batch the remaining batches are not
    /// dispatched to that worker; the error of the lowest-numbered failing
    /// worker is returned once all workers have stopped.
    pub fn run<I>(&self, batches: I) -> Result<ShardedOutput, QaError>
    where
        I: IntoIterator<Item = StrangenessTables>,
    {
        let workers = self.resolved_worker_count();
        let started = Instant::now();

        let results = thread::scope(|scope| {
            let (tx, rx) = crossbeam_channel::bounded::<StrangenessTables>(workers * 2);

            let mut handles = Vec::with_capacity(workers);
            for i in 0..workers {
                let mut qa = StrangenessQa::new(self.config.clone())?;
                let rx = rx.clone();
                let handle = thread::Builder::new()
                    .name(format!("strareco-worker-{i}"))
                    .spawn_scoped(scope, move || {
                        while let Ok(batch) = rx.recv() {
                            qa.process_batch(&batch)?;
                        }
                        let summary = qa.summary();
                        Ok::<_, QaError>((qa.into_sink(), summary))
                    })
                    .map_err(|e| QaError::WorkerSpawn {
                        reason: e.to_string(),
                    })?;
                handles.push(handle);
            }
            drop(rx);

            let mut sent = 0u64;
            for batch in batches {
                if tx.send(batch).is_err() {
                    // Every worker has stopped on an error.
                    break;
                }
                sent += 1;
            }
            drop(tx);
            debug!("dispatched {} batches to {} workers", sent, workers);

            let results: Vec<_> = handles
                .into_iter()
                .enumerate()
                .map(|(worker, handle)| {
                    handle
                        .join()
                        .map_err(|_| QaError::WorkerPanicked { worker })
                        .and_then(|r| r)
                })
                .collect();
            Ok::<_, QaError>(results)
        })?;

        let mut registry = strangeness_registry()?;
        let mut summary = RunSummary::default();
        for result in results {
            let (partial, partial_summary) = result?;
            registry.merge(&partial)?;
            summary.absorb(&partial_summary);
        }

        info!(
            "processed {} batches on {} workers in {:?}: {} events, {} V0s and {} cascades selected",
            summary.batches,
            workers,
            started.elapsed(),
            summary.events.all,
            summary.v0s.selected,
            summary.cascades.selected,
        );
        Ok(ShardedOutput { registry, summary })
    }
}
