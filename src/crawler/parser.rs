//! HTML parser for extracting the page title

use crate::crawler::FetchError;
use scraper::{Html, Selector};

/// Extracts the title of an HTML document
///
/// The text of the first `<title>` element in document order is taken, its
/// whitespace runs are collapsed to single spaces and the result is trimmed,
/// so every title fits on one output line.
///
/// # Arguments
///
/// * `html` - The decoded HTML document
///
/// # Returns
///
/// * `Ok(String)` - The non-empty title
/// * `Err(FetchError::NoTitle)` - No `<title>`, or only whitespace inside it
/// * `Err(FetchError::Parse)` - The title selector failed to compile; the
///   HTML parser itself never fails
///
/// # Example
///
/// ```
/// use title_finder::crawler::extract_title;
///
/// let html = r#"<html><head><title>Test</title></head><body></body></html>"#;
/// assert_eq!(extract_title(html).unwrap(), "Test");
/// ```
pub fn extract_title(html: &str) -> Result<String, FetchError> {
    let document = Html::parse_document(html);
    let selector =
        Selector::parse("title").map_err(|e| FetchError::Parse(format!("{:?}", e)))?;

    let title = document
        .select(&selector)
        .next()
        .map(|element| collapse_whitespace(&element.text().collect::<String>()))
        .unwrap_or_default();

    if title.is_empty() {
        return Err(FetchError::NoTitle);
    }

    Ok(title)
}

/// Joins the words of `text` with single spaces
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
