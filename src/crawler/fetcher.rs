//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests, including:
//! - Building the shared HTTP client (headers, timeouts, proxy, TLS policy)
//! - Fetching one page per job and classifying every failure
//! - Handing the body to encoding detection and title extraction

use crate::config::{FetcherConfig, ProxyConfig};
use crate::crawler::encoding::{decode_body, EncodingStrategy, HtmlEncodingSniffer};
use crate::crawler::job::{Job, JobResult};
use crate::crawler::parser::extract_title;
use crate::url::normalize_target;
use crate::{ConfigError, FinderError};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::{redirect::Policy, Client, Proxy, StatusCode};
use std::sync::Arc;
use thiserror::Error;

/// Per-URL failure, recorded in the job's result
///
/// The `Display` form of each variant is what ends up in the report line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The input line could not be turned into a request
    #[error("failed to create request: {0}")]
    InvalidRequest(String),

    /// Connection, TLS, timeout or transport failure
    #[error("request failed: {0}")]
    Network(String),

    /// The server answered with a non-2xx status
    #[error("HTTP error: {0}")]
    HttpStatus(StatusCode),

    /// The body declares a known encoding that cannot be transcoded
    #[error("failed to decode body: {0}")]
    Encoding(String),

    /// The document could not be queried
    ///
    /// scraper recovers from any malformed markup, so this is reached only if
    /// the title selector itself fails to compile. It stays a distinct kind
    /// so such a failure is never reported as a missing title.
    #[error("failed to parse HTML: {0}")]
    Parse(String),

    /// The page has no `<title>`, or an empty one
    #[error("no title found")]
    NoTitle,
}

impl FetchError {
    /// Short stable label used for statistics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "invalid-request",
            Self::Network(_) => "network",
            Self::HttpStatus(_) => "http-status",
            Self::Encoding(_) => "encoding",
            Self::Parse(_) => "parse",
            Self::NoTitle => "no-title",
        }
    }

    fn network(error: &reqwest::Error) -> Self {
        Self::Network(error_chain(error))
    }
}

/// Renders an error together with its sources, skipping sources whose text
/// the message already contains
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();

    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }

    message
}

/// Something that can turn a job into a result
///
/// The worker pool is generic over this trait; [`HttpTitleFetcher`] is the
/// real implementation.
#[async_trait]
pub trait TitleFetcher: Send + Sync {
    /// Processes one job. Never fails: every failure is folded into the
    /// returned result.
    async fn fetch_title(&self, job: &Job) -> JobResult;
}

/// Builds an HTTP client with proper configuration
///
/// The client is built once and shared by every worker; headers, proxy and
/// TLS policy are fixed at construction.
///
/// # Arguments
///
/// * `config` - The fetcher configuration
/// * `proxy` - Proxy to route every request through; `None` connects
///   directly, ignoring proxy environment variables
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(FinderError)` - Invalid header values or client construction failure
///
/// # Example
///
/// ```no_run
/// use title_finder::config::FetcherConfig;
/// use title_finder::crawler::build_http_client;
///
/// let client = build_http_client(&FetcherConfig::default(), None).unwrap();
/// ```
pub fn build_http_client(
    config: &FetcherConfig,
    proxy: Option<&ProxyConfig>,
) -> Result<Client, FinderError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT_LANGUAGE,
        header_value("accept-language", &config.accept_language)?,
    );

    let mut builder = Client::builder()
        .user_agent(header_value("user-agent", &config.user_agent)?)
        .default_headers(headers)
        .timeout(config.request_timeout())
        .connect_timeout(config.connect_timeout())
        .redirect(Policy::limited(config.max_redirects))
        .danger_accept_invalid_certs(config.accept_invalid_certs)
        .gzip(true)
        .brotli(true);

    builder = match proxy {
        Some(proxy) => {
            let mut route = Proxy::all(proxy.endpoint())?;
            if let Some(credentials) = &proxy.credentials {
                route = route.basic_auth(&credentials.username, &credentials.password);
            }
            tracing::info!("Routing all requests through proxy {}", proxy);
            builder.proxy(route)
        }
        None => builder.no_proxy(),
    };

    if config.accept_invalid_certs {
        tracing::warn!(
            "TLS certificate validation is disabled; results are not suitable for trust-sensitive use"
        );
    }

    Ok(builder.build()?)
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, FinderError> {
    HeaderValue::from_str(value).map_err(|_| {
        ConfigError::Validation(format!("{} is not a valid header value: '{}'", name, value))
            .into()
    })
}

/// Fetches pages over HTTP and extracts their titles
#[derive(Clone)]
pub struct HttpTitleFetcher {
    client: Client,
    strategy: Arc<dyn EncodingStrategy>,
}

impl HttpTitleFetcher {
    /// Creates a fetcher with its own client and the default encoding strategy
    pub fn new(config: &FetcherConfig, proxy: Option<&ProxyConfig>) -> Result<Self, FinderError> {
        Ok(Self::with_client(build_http_client(config, proxy)?))
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            strategy: Arc::new(HtmlEncodingSniffer),
        }
    }

    /// Replaces the encoding detection strategy
    pub fn with_strategy(mut self, strategy: impl EncodingStrategy + 'static) -> Self {
        self.strategy = Arc::new(strategy);
        self
    }

    /// Fetches one URL and extracts its title
    ///
    /// # Request Flow
    ///
    /// 1. Normalize the input line (add `http://` if needed)
    /// 2. Send exactly one GET; no retries
    /// 3. Non-2xx: drain the body and report the status
    /// 4. Read the body, detect its encoding and transcode to UTF-8
    /// 5. Extract the first `<title>`
    ///
    /// | Condition | Error |
    /// |-----------|-------|
    /// | Unparsable URL | InvalidRequest |
    /// | Connect/TLS/timeout/body read failure | Network |
    /// | Non-2xx status | HttpStatus |
    /// | Declared charset that cannot be transcoded | Encoding |
    /// | Missing or empty title | NoTitle |
    pub async fn fetch(&self, raw_url: &str) -> Result<String, FetchError> {
        let target =
            normalize_target(raw_url).map_err(|e| FetchError::InvalidRequest(e.to_string()))?;

        let response = self
            .client
            .get(target)
            .send()
            .await
            .map_err(|e| FetchError::network(&e))?;

        let status = response.status();
        if !status.is_success() {
            // Drain so the connection can return to the pool.
            let _ = response.bytes().await;
            return Err(FetchError::HttpStatus(status));
        }

        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::network(&e))?;

        let encoding = self.strategy.detect_encoding(&headers, &body)?;
        let text = decode_body(&body, encoding);

        extract_title(&text)
    }
}

#[async_trait]
impl TitleFetcher for HttpTitleFetcher {
    async fn fetch_title(&self, job: &Job) -> JobResult {
        match self.fetch(&job.url).await {
            Ok(title) => {
                tracing::debug!("[{}] {} -> {}", job.position, job.url, title);
                JobResult::success(job, title)
            }
            Err(error) => {
                tracing::debug!("[{}] {} failed: {}", job.position, job.url, error);
                JobResult::failure(job, error)
            }
        }
    }
}
