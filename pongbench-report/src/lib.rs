#![warn(missing_docs)]
//! PongBench Report - CSV Output
//!
//! Assembles per-parameter results into a [`Report`] whose header is the
//! parameter columns followed by one column per benchmark, and writes it to
//! a timestamped CSV file that never overwrites an earlier run.

mod report;
mod writer;

pub use report::{BenchResult, Report, ReportError, ReportMeta, ReportSummary};
pub use writer::{
    REPORT_TIMESTAMP_FORMAT, create_report_file, ensure_results_dir, generate_csv_report,
    report_file_name, save_report, write_csv_report,
};
