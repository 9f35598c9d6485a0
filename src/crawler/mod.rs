//! Crawler module for batch title fetching
//!
//! This module contains the core pipeline, including:
//! - HTTP fetching with proxy, timeout and TLS policy
//! - Encoding detection and transcoding to UTF-8
//! - HTML title extraction
//! - The bounded worker pool and order-restoring aggregation

mod aggregator;
mod coordinator;
mod encoding;
mod fetcher;
mod job;
mod parser;
mod pool;

pub use aggregator::{AggregateError, ResultAggregator};
pub use coordinator::{run_batch, Coordinator};
pub use encoding::{charset_param, decode_body, EncodingStrategy, HtmlEncodingSniffer};
pub use fetcher::{build_http_client, FetchError, HttpTitleFetcher, TitleFetcher};
pub use job::{Job, JobResult, JobSource};
pub use parser::extract_title;
pub use pool::{clamp_workers, WorkerPool, MAX_WORKERS};
