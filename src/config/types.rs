use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// Browser-like User-Agent sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/111.0.0.0 YaBrowser/23.3.1.895 Yowser/2.5 Safari/537.36";

/// Accept-Language sent with every request
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "ru,en;q=0.9,en-US;q=0.8";

/// Main configuration structure for Title Finder
///
/// Every field has a default, so an empty TOML file (or no file at all)
/// yields a usable configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub pool: PoolConfig,
    /// Proxy address, `[scheme://][user:pass@]host:port`
    #[serde(default)]
    pub proxy: Option<String>,
}

/// HTTP fetch behavior
#[derive(Debug, Clone, Deserialize)]
pub struct FetcherConfig {
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    #[serde(rename = "accept-language", default = "default_accept_language")]
    pub accept_language: String,

    /// Whole-request deadline in seconds (connect, headers and body)
    #[serde(rename = "request-timeout", default = "default_request_timeout")]
    pub request_timeout: u64,

    /// TCP/TLS connect deadline in seconds
    #[serde(rename = "connect-timeout", default = "default_connect_timeout")]
    pub connect_timeout: u64,

    /// Accept self-signed, expired and otherwise invalid certificates
    #[serde(rename = "accept-invalid-certs", default = "default_accept_invalid_certs")]
    pub accept_invalid_certs: bool,

    /// Maximum redirects followed per request
    #[serde(rename = "max-redirects", default = "default_max_redirects")]
    pub max_redirects: usize,
}

impl FetcherConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout)
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            accept_language: default_accept_language(),
            request_timeout: default_request_timeout(),
            connect_timeout: default_connect_timeout(),
            accept_invalid_certs: default_accept_invalid_certs(),
            max_redirects: default_max_redirects(),
        }
    }
}

/// Worker pool sizing
#[derive(Debug, Clone, Deserialize)]
pub struct PoolConfig {
    /// Requested number of concurrent workers (clamped to the pool maximum)
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
        }
    }
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_accept_language() -> String {
    DEFAULT_ACCEPT_LANGUAGE.to_string()
}

fn default_request_timeout() -> u64 {
    10
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_accept_invalid_certs() -> bool {
    true
}

fn default_max_redirects() -> usize {
    10
}

fn default_workers() -> usize {
    10
}

/// Resolved proxy endpoint shared read-only by every worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    /// `http` or `https`
    pub scheme: String,
    pub host: String,
    pub port: u16,
    pub credentials: Option<ProxyCredentials>,
}

impl ProxyConfig {
    /// Returns `scheme://host:port`, without credentials
    pub fn endpoint(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, self.port)
    }
}

impl fmt::Display for ProxyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.credentials {
            Some(c) => write!(f, "{}://{}@{}:{}", self.scheme, c.username, self.host, self.port),
            None => f.write_str(&self.endpoint()),
        }
    }
}

/// Basic-auth credentials for the proxy
#[derive(Clone, PartialEq, Eq)]
pub struct ProxyCredentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for ProxyCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}
