//! Report formatting
//!
//! One line per input URL, in input order:
//!
//! ```text
//! [+] <url>: <title>
//! [-] <url>: <error message>
//! ```

use crate::crawler::JobResult;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Formats a single result as a report line (without the newline)
pub fn format_result(result: &JobResult) -> String {
    match &result.outcome {
        Ok(title) => format!("[+] {}: {}", result.url, title),
        Err(error) => format!("[-] {}: {}", result.url, error),
    }
}

/// Opens the report destination
///
/// A path creates (or truncates) that file; `None` writes to stdout.
/// Opening happens before the batch starts so an unwritable destination is
/// reported before any request is made.
pub fn open_output(path: Option<&Path>) -> io::Result<Box<dyn Write>> {
    match path {
        Some(path) => Ok(Box::new(BufWriter::new(File::create(path)?))),
        None => Ok(Box::new(io::stdout().lock())),
    }
}

/// Writes every result as one line and flushes the writer
pub fn write_report<W: Write + ?Sized>(writer: &mut W, results: &[JobResult]) -> io::Result<()> {
    for result in results {
        writeln!(writer, "{}", format_result(result))?;
    }
    writer.flush()
}
