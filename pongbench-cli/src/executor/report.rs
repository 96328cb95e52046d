//! Report Building
//!
//! Merges every parameter row with the throughputs collected for it:
//!
//! ```text
//! ParamTable rows ──┐
//!                   ├──► BenchResult (param values ++ throughputs) ──► Report
//! ExecutionOutcome ─┘
//! ```

use super::execution::ExecutionOutcome;
use chrono::{DateTime, Local};
use pongbench_core::{BenchmarkDef, ParamTable};
use pongbench_report::{BenchResult, Report, ReportError, ReportMeta, ReportSummary};

/// Report metadata for a run started at `timestamp`
pub fn build_report_meta(timestamp: DateTime<Local>) -> ReportMeta {
    ReportMeta {
        timestamp,
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

/// Build the Report for a completed run
///
/// # Arguments
/// * `table` - Parameter rows, in file order
/// * `benchmarks` - Benchmarks, in report column order
/// * `outcome` - Throughputs collected by the executor
/// * `meta` - Run metadata
/// * `total_duration_ms` - Wall-clock duration of the run
pub fn build_report(
    table: &ParamTable,
    benchmarks: &[BenchmarkDef],
    outcome: ExecutionOutcome,
    meta: ReportMeta,
    total_duration_ms: f64,
) -> Result<Report, ReportError> {
    let ids: Vec<String> = benchmarks.iter().map(|b| b.id.clone()).collect();
    let mut report = Report::new(table.fields(), &ids, meta);

    let mut throughputs = outcome.throughputs.into_iter();
    for param in table.rows() {
        let figures = throughputs.next().unwrap_or_default();
        report.push(BenchResult::new(param.clone(), figures))?;
    }

    report.summary = ReportSummary {
        runs: outcome.runs,
        retries: outcome.retries,
        total_duration_ms,
    };
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pongbench_core::{default_benchmarks, read_params};

    #[test]
    fn test_build_report() {
        let table = read_params("iterations,vector_sz\n10,1\n20,2\n".as_bytes()).unwrap();
        let outcome = ExecutionOutcome {
            throughputs: vec![
                vec!["1".into(), "2".into(), "3".into()],
                vec!["4".into(), "5".into(), "6".into()],
            ],
            runs: 6,
            retries: 1,
        };

        let report = build_report(
            &table,
            &default_benchmarks(),
            outcome,
            build_report_meta(Local::now()),
            12.0,
        )
        .unwrap();

        assert_eq!(report.results().len(), table.len());
        assert_eq!(report.width(), 5);
        let last: Vec<_> = report.results()[1].record().collect();
        assert_eq!(last, ["20", "2", "4", "5", "6"]);
        assert_eq!(report.summary.retries, 1);
        assert_eq!(report.meta.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_missing_row_rejected() {
        let table = read_params("iterations,vector_sz\n10,1\n20,2\n".as_bytes()).unwrap();
        let outcome = ExecutionOutcome {
            throughputs: vec![vec!["1".into(), "2".into(), "3".into()]],
            runs: 3,
            retries: 0,
        };

        let err = build_report(
            &table,
            &default_benchmarks(),
            outcome,
            build_report_meta(Local::now()),
            0.0,
        )
        .unwrap_err();
        assert!(matches!(err, ReportError::ColumnMismatch { row: 2, .. }));
    }

    #[test]
    fn test_incomplete_row_rejected() {
        let table = read_params("iterations,vector_sz\n10,1\n".as_bytes()).unwrap();
        let outcome = ExecutionOutcome {
            throughputs: vec![vec!["1".into()]],
            runs: 1,
            retries: 0,
        };

        let err = build_report(
            &table,
            &default_benchmarks(),
            outcome,
            build_report_meta(Local::now()),
            0.0,
        )
        .unwrap_err();
        assert!(matches!(err, ReportError::ColumnMismatch { .. }));
    }
}
