//! Bounded worker pool
//!
//! This module handles:
//! - Clamping the requested worker count to the pool maximum
//! - Queueing every job up front on a shared FIFO queue
//! - Running workers that pull jobs exclusively until the queue is empty
//! - Funnelling results back through a single channel

use crate::crawler::aggregator::{AggregateError, ResultAggregator};
use crate::crawler::fetcher::TitleFetcher;
use crate::crawler::job::{Job, JobResult, JobSource};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

/// Hard upper bound on concurrent workers
pub const MAX_WORKERS: usize = 100;

/// Clamps a requested worker count into `1..=max_workers`
///
/// Out-of-range requests are adjusted with a warning, never rejected.
pub fn clamp_workers(requested: usize, max_workers: usize) -> usize {
    let max_workers = max_workers.max(1);

    if requested > max_workers {
        tracing::warn!(
            "Worker count {} exceeds maximum allowed ({}). Setting to max.",
            requested,
            max_workers
        );
        max_workers
    } else if requested == 0 {
        tracing::warn!("Worker count must be at least 1. Using a single worker.");
        1
    } else {
        requested
    }
}

/// Fixed-size pool of workers sharing one fetcher
///
/// The fetcher (and with it the HTTP client, headers and proxy) is shared
/// read-only; the job queue and the result channel are the only state the
/// workers contend on.
pub struct WorkerPool<F> {
    fetcher: Arc<F>,
    workers: usize,
}

impl<F> WorkerPool<F>
where
    F: TitleFetcher + 'static,
{
    /// Creates a pool of `min(requested, max_workers)` workers
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Processes each job
    /// * `requested` - Requested worker count
    /// * `max_workers` - Upper bound, normally [`MAX_WORKERS`]
    pub fn new(fetcher: F, requested: usize, max_workers: usize) -> Self {
        Self::with_shared(Arc::new(fetcher), requested, max_workers)
    }

    /// Like [`WorkerPool::new`], for a fetcher the caller keeps a handle to
    pub fn with_shared(fetcher: Arc<F>, requested: usize, max_workers: usize) -> Self {
        Self {
            fetcher,
            workers: clamp_workers(requested, max_workers),
        }
    }

    /// Number of workers the pool runs (before capping at the job count)
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Starts processing `source` and returns the unordered result stream
    ///
    /// All jobs are queued before any worker starts and the queue is closed
    /// immediately, so workers exit as soon as it runs dry. No more workers
    /// than jobs are spawned. Must be called inside a Tokio runtime.
    pub fn dispatch(&self, source: JobSource) -> mpsc::Receiver<JobResult> {
        let total = source.len();
        let worker_count = self.workers.min(total);

        let (job_tx, job_rx) = async_channel::bounded(total.max(1));
        for job in source.into_jobs() {
            if let Err(e) = job_tx.try_send(job) {
                tracing::error!("Failed to queue job {}", e.into_inner().position);
            }
        }
        job_tx.close();

        // Sized to the batch so a worker never waits on the collector.
        let (result_tx, result_rx) = mpsc::channel(total.max(1));

        tracing::debug!("Starting {} workers for {} jobs", worker_count, total);

        let mut workers = JoinSet::new();
        for id in 0..worker_count {
            workers.spawn(worker(
                id,
                Arc::clone(&self.fetcher),
                job_rx.clone(),
                result_tx.clone(),
            ));
        }

        tokio::spawn(async move {
            while let Some(joined) = workers.join_next().await {
                if let Err(e) = joined {
                    tracing::error!("Worker task failed: {}", e);
                }
            }
        });

        result_rx
    }

    /// Processes every job and returns the results in input order
    ///
    /// Blocks until each job has produced its result. A failing URL never
    /// stops the batch; only a lost result (a panicked worker) is an error.
    pub async fn run(&self, source: JobSource) -> Result<Vec<JobResult>, AggregateError> {
        let total = source.len();
        let receiver = self.dispatch(source);
        ResultAggregator::collect(receiver, total).await
    }
}

/// One worker: pull a job, fetch, push the result, until the queue is empty
async fn worker<F>(
    id: usize,
    fetcher: Arc<F>,
    jobs: async_channel::Receiver<Job>,
    results: mpsc::Sender<JobResult>,
) -> usize
where
    F: TitleFetcher,
{
    let mut processed = 0;

    while let Ok(job) = jobs.recv().await {
        let result = fetcher.fetch_title(&job).await;
        if results.send(result).await.is_err() {
            tracing::debug!("Worker {} stopping: result collector is gone", id);
            break;
        }
        processed += 1;
    }

    tracing::trace!("Worker {} finished after {} jobs", id, processed);
    processed
}
