use crate::config::types::{Config, FetcherConfig, ProxyConfig};
use crate::url::parse_proxy;
use crate::ConfigError;
use reqwest::header::HeaderValue;

/// Upper bound for `max-redirects`
const MAX_REDIRECT_LIMIT: usize = 50;

/// Validates the entire configuration
///
/// The worker count is deliberately absent: oversized values are clamped by
/// the pool, never rejected.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_fetcher_config(&config.fetcher)?;
    resolve_proxy(config)?;
    Ok(())
}

/// Parses the configured proxy, if any
pub fn resolve_proxy(config: &Config) -> Result<Option<ProxyConfig>, ConfigError> {
    config.proxy.as_deref().map(parse_proxy).transpose()
}

/// Validates fetcher configuration
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.request_timeout < 1 {
        return Err(ConfigError::Validation(format!(
            "request-timeout must be >= 1 second, got {}",
            config.request_timeout
        )));
    }

    if config.connect_timeout < 1 {
        return Err(ConfigError::Validation(format!(
            "connect-timeout must be >= 1 second, got {}",
            config.connect_timeout
        )));
    }

    if config.connect_timeout > config.request_timeout {
        return Err(ConfigError::Validation(format!(
            "connect-timeout ({}s) cannot exceed request-timeout ({}s)",
            config.connect_timeout, config.request_timeout
        )));
    }

    if config.max_redirects > MAX_REDIRECT_LIMIT {
        return Err(ConfigError::Validation(format!(
            "max-redirects must be <= {}, got {}",
            MAX_REDIRECT_LIMIT, config.max_redirects
        )));
    }

    validate_header_value("user-agent", &config.user_agent)?;
    validate_header_value("accept-language", &config.accept_language)?;

    Ok(())
}

/// Checks that a configured string can be sent as an HTTP header value
fn validate_header_value(name: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{} cannot be empty", name)));
    }

    HeaderValue::from_str(value).map_err(|_| {
        ConfigError::Validation(format!(
            "{} contains characters not allowed in an HTTP header: '{}'",
            name, value
        ))
    })?;

    Ok(())
}
