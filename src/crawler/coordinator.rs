//! Batch coordinator - wires the job source, worker pool and aggregator
//!
//! This module contains the entry point for processing one batch:
//! - Resolving the proxy before any network activity
//! - Building the shared fetcher and the worker pool
//! - Enumerating jobs and collecting their results in input order

use crate::config::{resolve_proxy, Config};
use crate::crawler::fetcher::{HttpTitleFetcher, TitleFetcher};
use crate::crawler::job::{JobResult, JobSource};
use crate::crawler::pool::{WorkerPool, MAX_WORKERS};
use crate::FinderError;
use std::time::Instant;

/// Main batch coordinator structure
pub struct Coordinator<F> {
    pool: WorkerPool<F>,
}

impl Coordinator<HttpTitleFetcher> {
    /// Creates a coordinator that fetches over HTTP
    ///
    /// # Arguments
    ///
    /// * `config` - The validated configuration; `config.proxy` is parsed here
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run batches
    /// * `Err(FinderError)` - Malformed proxy or HTTP client failure
    pub fn new(config: &Config) -> Result<Self, FinderError> {
        let proxy = resolve_proxy(config)?;
        let fetcher = HttpTitleFetcher::new(&config.fetcher, proxy.as_ref())?;
        Ok(Self::with_fetcher(fetcher, config.pool.workers))
    }
}

impl<F> Coordinator<F>
where
    F: TitleFetcher + 'static,
{
    /// Creates a coordinator around any fetcher
    pub fn with_fetcher(fetcher: F, workers: usize) -> Self {
        Self {
            pool: WorkerPool::new(fetcher, workers, MAX_WORKERS),
        }
    }

    /// Number of workers the pool will run
    pub fn workers(&self) -> usize {
        self.pool.workers()
    }

    /// Processes every URL and returns one result per URL, in input order
    pub async fn run(&self, urls: Vec<String>) -> Result<Vec<JobResult>, FinderError> {
        let source = JobSource::from_urls(urls);
        let total = source.len();
        let start_time = Instant::now();

        tracing::info!(
            "Processing {} URLs with up to {} workers",
            total,
            self.pool.workers()
        );

        let results = self.pool.run(source).await?;

        tracing::info!(
            "Batch completed: {} URLs processed in {:?}",
            results.len(),
            start_time.elapsed()
        );

        Ok(results)
    }
}

/// Runs a complete batch over HTTP
///
/// # Example
///
/// ```no_run
/// use title_finder::config::Config;
/// use title_finder::crawler::run_batch;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let urls = vec!["example.com".to_string()];
/// for result in run_batch(urls, &Config::default()).await? {
///     println!("{:?}", result.outcome);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn run_batch(urls: Vec<String>, config: &Config) -> Result<Vec<JobResult>, FinderError> {
    Coordinator::new(config)?.run(urls).await
}
