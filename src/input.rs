//! Reading the URL list

use std::path::Path;

/// Reads a newline-delimited URL list
///
/// Every line becomes one entry, blank lines and duplicates included, so the
/// report always has one line per input line. `\r\n` endings and a leading
/// UTF-8 BOM are stripped; invalid UTF-8 is replaced rather than rejected.
///
/// # Arguments
///
/// * `path` - Path to the list file
///
/// # Returns
///
/// * `Ok(Vec<String>)` - The lines in file order
/// * `Err(std::io::Error)` - The file could not be read
pub fn read_url_list(path: &Path) -> std::io::Result<Vec<String>> {
    let bytes = std::fs::read(path)?;
    Ok(parse_url_list(&bytes))
}

/// Splits raw list content into lines
pub fn parse_url_list(bytes: &[u8]) -> Vec<String> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    String::from_utf8_lossy(bytes)
        .lines()
        .map(str::to_string)
        .collect()
}
