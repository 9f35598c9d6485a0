use crate::UrlError;
use std::borrow::Cow;
use url::Url;

/// Scheme prepended to targets that do not carry one
pub const DEFAULT_SCHEME: &str = "http://";

/// Returns true if `raw` starts with `http://` or `https://`, ignoring ASCII case
pub fn has_http_scheme(raw: &str) -> bool {
    starts_with_ignore_case(raw, "http://") || starts_with_ignore_case(raw, "https://")
}

fn starts_with_ignore_case(raw: &str, prefix: &str) -> bool {
    raw.len() >= prefix.len()
        && raw.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

/// Returns the scheme of a `scheme://...` string, if it has a syntactically
/// valid one
fn explicit_scheme(raw: &str) -> Option<&str> {
    let (scheme, _) = raw.split_once("://")?;
    let mut chars = scheme.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid.then_some(scheme)
}

/// Prepends `http://` unless the string already has an HTTP(S) scheme
///
/// # Examples
///
/// ```
/// use title_finder::url::with_default_scheme;
///
/// assert_eq!(with_default_scheme("example.com/page"), "http://example.com/page");
/// assert_eq!(with_default_scheme("https://example.com"), "https://example.com");
/// ```
pub fn with_default_scheme(raw: &str) -> Cow<'_, str> {
    if has_http_scheme(raw) {
        Cow::Borrowed(raw)
    } else {
        Cow::Owned(format!("{}{}", DEFAULT_SCHEME, raw))
    }
}

/// Turns one line of the input list into a fetchable URL
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace
/// 2. Reject an explicit scheme other than `http`/`https`
/// 3. Prepend `http://` if the line has no scheme
/// 4. Parse; reject if malformed or if the result has no host
///
/// Nothing else about the URL is rewritten: the request goes to exactly the
/// address the user listed.
///
/// # Arguments
///
/// * `raw` - The URL as it appears in the input list
///
/// # Returns
///
/// * `Ok(Url)` - A parsed http(s) URL
/// * `Err(UrlError)` - The line cannot be turned into a request target
///
/// # Examples
///
/// ```
/// use title_finder::url::normalize_target;
///
/// let url = normalize_target("example.com/page").unwrap();
/// assert_eq!(url.as_str(), "http://example.com/page");
/// ```
pub fn normalize_target(raw: &str) -> Result<Url, UrlError> {
    let trimmed = raw.trim();

    // `bad://url` must not become `http://bad://url`.
    if let Some(scheme) = explicit_scheme(trimmed) {
        if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
            return Err(UrlError::InvalidScheme(scheme.to_string()));
        }
    }

    let url = Url::parse(&with_default_scheme(trimmed))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost);
    }

    Ok(url)
}
