//! Integration tests for Title Finder
//!
//! These tests use wiremock to stand up local HTTP servers and drive the
//! fetcher and the whole batch pipeline against them.

mod fetch_tests;

use title_finder::config::{Config, FetcherConfig};
use title_finder::crawler::HttpTitleFetcher;

/// Configuration with short timeouts suitable for local servers
pub fn create_test_config(workers: usize) -> Config {
    let mut config = Config::default();
    config.fetcher.request_timeout = 2;
    config.fetcher.connect_timeout = 1;
    config.pool.workers = workers;
    config
}

/// Fetcher built from the test configuration, without a proxy
pub fn create_test_fetcher() -> HttpTitleFetcher {
    let config = create_test_config(1);
    create_fetcher(&config.fetcher)
}

pub fn create_fetcher(config: &FetcherConfig) -> HttpTitleFetcher {
    HttpTitleFetcher::new(config, None).expect("Failed to build fetcher")
}

/// Minimal HTML page with the given title
pub fn page(title: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><title>{}</title></head><body><p>content</p></body></html>",
        title
    )
}
