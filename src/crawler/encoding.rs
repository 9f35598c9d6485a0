//! Character encoding detection and transcoding
//!
//! Response bodies arrive in whatever encoding the server chose. Before the
//! HTML is parsed the body is transcoded to UTF-8, using the first source of
//! truth that is available:
//!
//! 1. A byte order mark
//! 2. The `charset` parameter of the `Content-Type` header, unless the label
//!    is unknown
//! 3. A `<meta charset>` or `<meta http-equiv="Content-Type">` declaration in
//!    the first 1024 bytes
//! 4. Statistical sniffing of the body

use crate::crawler::FetchError;
use encoding_rs::{Encoding, REPLACEMENT, WINDOWS_1252};
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use scraper::{Html, Selector};

/// Number of leading bytes searched for a `<meta>` charset declaration
const PRESCAN_LIMIT: usize = 1024;

/// Strategy for deciding which encoding a response body uses
///
/// The fetcher holds one strategy for its whole lifetime and calls it from
/// many workers at once, hence the `Send + Sync` bound.
pub trait EncodingStrategy: Send + Sync {
    /// Picks the encoding of `body` given the response headers
    ///
    /// # Returns
    ///
    /// * `Ok(&Encoding)` - The encoding to transcode from
    /// * `Err(FetchError::Encoding)` - The response declares an encoding that
    ///   is known but cannot be transcoded (ISO-2022-KR, HZ and the other
    ///   labels the Encoding Standard maps to `replacement`)
    fn detect_encoding(
        &self,
        headers: &HeaderMap,
        body: &[u8],
    ) -> Result<&'static Encoding, FetchError>;
}

/// Default strategy following the HTML encoding sniffing order
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlEncodingSniffer;

impl EncodingStrategy for HtmlEncodingSniffer {
    fn detect_encoding(
        &self,
        headers: &HeaderMap,
        body: &[u8],
    ) -> Result<&'static Encoding, FetchError> {
        if let Some((encoding, _)) = Encoding::for_bom(body) {
            return Ok(encoding);
        }

        let declared = headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(charset_param);

        if let Some(label) = declared {
            match Encoding::for_label(label.as_bytes()) {
                Some(encoding) if encoding == REPLACEMENT => {
                    return Err(FetchError::Encoding(format!(
                        "charset '{}' cannot be transcoded",
                        label
                    )));
                }
                Some(encoding) => return Ok(encoding),
                None => tracing::debug!("Ignoring unknown charset '{}' in Content-Type", label),
            }
        }

        if let Some(encoding) = prescan_meta(body) {
            return Ok(encoding);
        }

        Ok(sniff(body))
    }
}

/// Extracts the `charset` parameter from a `Content-Type` style value
///
/// Works on both header values (`text/html; charset=utf-8`) and the
/// `content` attribute of `<meta http-equiv>`.
pub fn charset_param(content_type: &str) -> Option<&str> {
    content_type.split(';').find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if !name.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        let value = value.trim().trim_matches(|c| c == '"' || c == '\'').trim();
        (!value.is_empty()).then_some(value)
    })
}

/// Looks for a charset declaration in the first bytes of the document
fn prescan_meta(body: &[u8]) -> Option<&'static Encoding> {
    let head = &body[..body.len().min(PRESCAN_LIMIT)];

    // Declarations are ASCII, and windows-1252 maps every byte, so this
    // decode never fails.
    let (text, _) = WINDOWS_1252.decode_without_bom_handling(head);
    let document = Html::parse_document(&text);
    let selector = Selector::parse("meta").ok()?;

    document.select(&selector).find_map(|meta| {
        let element = meta.value();
        let label = match element.attr("charset") {
            Some(charset) => charset.trim(),
            None => element
                .attr("http-equiv")
                .filter(|v| v.trim().eq_ignore_ascii_case("content-type"))
                .and(element.attr("content"))
                .and_then(charset_param)?,
        };

        // A document that managed to declare UTF-16 in ASCII is not UTF-16.
        Encoding::for_label(label.as_bytes()).map(Encoding::output_encoding)
    })
}

/// Guesses the encoding from byte statistics alone
fn sniff(body: &[u8]) -> &'static Encoding {
    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(body, true);
    detector.guess(None, true)
}

/// Transcodes `body` to UTF-8
///
/// A BOM in the body overrides `encoding`. Malformed sequences are replaced
/// with U+FFFD rather than failing the whole page.
pub fn decode_body(body: &[u8], encoding: &'static Encoding) -> String {
    let (text, actual, had_errors) = encoding.decode(body);
    if had_errors {
        tracing::debug!(
            "Body contained malformed {} sequences; replaced with U+FFFD",
            actual.name()
        );
    }
    text.into_owned()
}
