use crate::config::{ProxyConfig, ProxyCredentials};
use crate::url::with_default_scheme;
use crate::ConfigError;
use url::Url;

/// Parses a proxy address given as `[scheme://][user:pass@]host[:port]`
///
/// The scheme defaults to `http://`. Only HTTP and HTTPS proxies are
/// supported; any other explicit scheme is rejected rather than being
/// mistaken for a host name. A missing port falls back to the scheme's
/// default.
///
/// # Examples
///
/// ```
/// use title_finder::url::parse_proxy;
///
/// let proxy = parse_proxy("127.0.0.1:8080").unwrap();
/// assert_eq!(proxy.endpoint(), "http://127.0.0.1:8080");
/// ```
pub fn parse_proxy(raw: &str) -> Result<ProxyConfig, ConfigError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ConfigError::InvalidProxy("proxy address is empty".to_string()));
    }

    let candidate = with_default_scheme(raw);
    if let Some((scheme, _)) = raw.split_once("://") {
        if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
            return Err(ConfigError::InvalidProxy(format!(
                "unsupported proxy scheme '{}' in '{}'",
                scheme, raw
            )));
        }
    }

    let url = Url::parse(&candidate)
        .map_err(|e| ConfigError::InvalidProxy(format!("'{}': {}", raw, e)))?;

    let host = url
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| ConfigError::InvalidProxy(format!("'{}' has no host", raw)))?
        .to_string();

    if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
        return Err(ConfigError::InvalidProxy(format!(
            "'{}' must not contain a path, query or fragment",
            raw
        )));
    }

    let port = url
        .port_or_known_default()
        .ok_or_else(|| ConfigError::InvalidProxy(format!("'{}' has no port", raw)))?;

    let credentials = if url.username().is_empty() {
        None
    } else {
        Some(ProxyCredentials {
            username: url.username().to_string(),
            password: url.password().unwrap_or_default().to_string(),
        })
    };

    Ok(ProxyConfig {
        scheme: url.scheme().to_string(),
        host,
        port,
        credentials,
    })
}
