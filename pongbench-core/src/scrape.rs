//! Throughput Scraping
//!
//! Benchmarks report their result as a line such as `1843.221 MB/s`. The
//! first line of captured output that starts with a number followed by the
//! `MB/s` unit wins; the number is kept exactly as printed.

use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

/// Pattern matched at the start of each captured line.
pub const THROUGHPUT_PATTERN: &str = r"^([-+]?[0-9]*\.?[0-9]+(?:[eE][-+]?[0-9]+)?)\s?MB/s";

static THROUGHPUT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(THROUGHPUT_PATTERN).expect("throughput pattern is valid"));

/// Errors raised while scraping captured output
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The capture file could not be read
    #[error("I/O error reading captured output: {0}")]
    Io(#[from] std::io::Error),

    /// No line carried a throughput figure
    #[error("No throughput line (`<number> MB/s`) in {lines} line(s) of output")]
    PatternNotFound {
        /// Lines scanned
        lines: usize,
    },
}

/// Extract the throughput figure from a single line, if it carries one.
pub fn scrape_line(line: &str) -> Option<&str> {
    THROUGHPUT_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Scan `reader` line by line and return the first throughput figure.
///
/// Lines that are not valid UTF-8 are decoded lossily rather than aborting
/// the scan.
pub fn scrape_reader<R: BufRead>(mut reader: R) -> Result<String, ScrapeError> {
    let mut buf = Vec::new();
    let mut lines = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Err(ScrapeError::PatternNotFound { lines });
        }
        lines += 1;

        let line = String::from_utf8_lossy(&buf);
        if let Some(value) = scrape_line(&line) {
            return Ok(value.to_string());
        }
    }
}

/// Scrape the throughput figure from a captured output file.
pub fn scrape_file(path: impl AsRef<Path>) -> Result<String, ScrapeError> {
    let file = File::open(path)?;
    scrape_reader(BufReader::new(file))
}
