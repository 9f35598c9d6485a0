//! Title Finder: concurrent HTML title extraction
//!
//! This crate fetches a batch of URLs with a bounded worker pool, extracts the
//! `<title>` of every page and reports one result per URL in input order.

pub mod config;
pub mod crawler;
pub mod input;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for fatal Title Finder failures
///
/// Per-URL failures never surface here; they are carried inside each
/// [`crawler::JobResult`] as a [`crawler::FetchError`].
#[derive(Debug, Error)]
pub enum FinderError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Result collection error: {0}")]
    Aggregate(#[from] crawler::AggregateError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid proxy URL: {0}")]
    InvalidProxy(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(#[from] ::url::ParseError),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for Title Finder operations
pub type Result<T> = std::result::Result<T, FinderError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::{Config, ProxyConfig};
pub use crawler::{run_batch, FetchError, Job, JobResult, JobSource, MAX_WORKERS};
pub use url::{normalize_target, parse_proxy};
