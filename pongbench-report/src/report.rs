//! Report Data Structures

use chrono::{DateTime, Local};
use pongbench_core::BenchParam;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while assembling or writing a report
#[derive(Debug, Error)]
pub enum ReportError {
    /// A result row does not line up with the report header
    #[error("Row {row} has {got} columns, header has {expected}")]
    ColumnMismatch {
        /// 1-based row number
        row: usize,
        /// Header width
        expected: usize,
        /// Width of the rejected row
        got: usize,
    },

    /// The results directory could not be created
    #[error("Failed to create results directory {}: {source}", path.display())]
    CreateDir {
        /// Directory path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The report file could not be created
    #[error("Failed to create report file {}: {source}", path.display())]
    CreateFile {
        /// File path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// CSV serialization failed
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    /// Writing or flushing the report failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// One parameter row merged with the throughput captured for each benchmark
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchResult {
    param: BenchParam,
    throughputs: Vec<String>,
}

impl BenchResult {
    /// Combine a parameter row with its captured throughputs (benchmark order)
    pub fn new(param: BenchParam, throughputs: Vec<String>) -> Self {
        Self { param, throughputs }
    }

    /// The parameter row this result was produced from
    pub fn param(&self) -> &BenchParam {
        &self.param
    }

    /// Captured `MB/s` figures, one per benchmark
    pub fn throughputs(&self) -> &[String] {
        &self.throughputs
    }

    /// Number of report columns this result fills
    pub fn width(&self) -> usize {
        self.param.values().len() + self.throughputs.len()
    }

    /// Report row: parameter values followed by throughputs
    pub fn record(&self) -> impl Iterator<Item = &str> {
        self.param
            .values()
            .iter()
            .chain(self.throughputs.iter())
            .map(String::as_str)
    }
}

/// Report metadata
#[derive(Debug, Clone)]
pub struct ReportMeta {
    /// Local time the run started; also names the report file
    pub timestamp: DateTime<Local>,
    /// Harness version
    pub version: String,
}

/// Run totals shown in the terminal summary
#[derive(Debug, Clone, Default)]
pub struct ReportSummary {
    /// Benchmark invocations that produced a figure
    pub runs: usize,
    /// Extra attempts spent on non-zero exits
    pub retries: usize,
    /// Wall-clock duration of the run
    pub total_duration_ms: f64,
}

/// Complete run report: header plus one row per parameter set
#[derive(Debug, Clone)]
pub struct Report {
    /// Run metadata
    pub meta: ReportMeta,
    /// Run totals
    pub summary: ReportSummary,
    param_fields: Vec<String>,
    benchmark_ids: Vec<String>,
    results: Vec<BenchResult>,
}

impl Report {
    /// Create an empty report for the given parameter columns and benchmarks
    pub fn new(param_fields: &[String], benchmark_ids: &[String], meta: ReportMeta) -> Self {
        Self {
            meta,
            summary: ReportSummary::default(),
            param_fields: param_fields.to_vec(),
            benchmark_ids: benchmark_ids.to_vec(),
            results: Vec::new(),
        }
    }

    /// Append a result row, rejecting rows that do not line up with the header
    pub fn push(&mut self, result: BenchResult) -> Result<(), ReportError> {
        let expected = self.width();
        let got = result.width();
        if got != expected
            || result.param.fields() != self.param_fields.as_slice()
            || result.throughputs.len() != self.benchmark_ids.len()
        {
            return Err(ReportError::ColumnMismatch {
                row: self.results.len() + 1,
                expected,
                got,
            });
        }
        self.results.push(result);
        Ok(())
    }

    /// Header row: parameter field names followed by benchmark ids
    pub fn header(&self) -> impl Iterator<Item = &str> {
        self.param_fields
            .iter()
            .chain(self.benchmark_ids.iter())
            .map(String::as_str)
    }

    /// Number of columns in every row
    pub fn width(&self) -> usize {
        self.param_fields.len() + self.benchmark_ids.len()
    }

    /// Benchmark column names
    pub fn benchmark_ids(&self) -> &[String] {
        &self.benchmark_ids
    }

    /// Result rows in parameter order
    pub fn results(&self) -> &[BenchResult] {
        &self.results
    }
}
