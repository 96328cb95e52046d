//! Output Formatting
//!
//! Human-readable summary of a finished run: one block per parameter row,
//! with the `MB/s` figure of each benchmark, followed by run totals.

use pongbench_report::Report;

/// Format a report for human-readable terminal display
///
/// # Arguments
/// * `report` - Complete run report
///
/// # Returns
/// Formatted string suitable for terminal output
pub fn format_human_output(report: &Report) -> String {
    let mut output = String::new();

    output.push('\n');
    output.push_str(&format!("PongBench Results (v{})\n", report.meta.version));
    output.push_str(&"=".repeat(60));
    output.push_str("\n\n");

    let id_width = report
        .benchmark_ids()
        .iter()
        .map(String::len)
        .max()
        .unwrap_or(0);

    for (index, result) in report.results().iter().enumerate() {
        let params: Vec<String> = result
            .param()
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect();
        output.push_str(&format!("#{} {}\n", index + 1, params.join(" ")));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for (id, throughput) in report.benchmark_ids().iter().zip(result.throughputs()) {
            output.push_str(&format!(
                "  {:<width$}  {:>16} MB/s\n",
                id,
                throughput,
                width = id_width
            ));
        }
        output.push('\n');
    }

    output.push_str(&format!(
        "Summary: {} parameter sets, {} runs, {} retries in {:.1}s\n",
        report.results().len(),
        report.summary.runs,
        report.summary.retries,
        report.summary.total_duration_ms / 1000.0
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use pongbench_core::read_params;
    use pongbench_report::{BenchResult, ReportMeta, ReportSummary};

    #[test]
    fn test_format_human_output() {
        let table = read_params("iterations,vector_sz\n10,1\n".as_bytes()).unwrap();
        let ids = ["mpi_pp", "jl_pp"].map(String::from).to_vec();
        let mut report = Report::new(
            table.fields(),
            &ids,
            ReportMeta {
                timestamp: Local::now(),
                version: "0.1.0".to_string(),
            },
        );
        report
            .push(BenchResult::new(
                table.rows()[0].clone(),
                vec!["12.5".into(), "3.2e+01".into()],
            ))
            .unwrap();
        report.summary = ReportSummary {
            runs: 2,
            retries: 1,
            total_duration_ms: 1500.0,
        };

        let text = format_human_output(&report);
        assert!(text.contains("PongBench Results (v0.1.0)"));
        assert!(text.contains("#1 iterations=10 vector_sz=1"));
        assert!(text.contains("mpi_pp"));
        assert!(text.contains("12.5 MB/s"));
        assert!(text.contains("3.2e+01 MB/s"));
        assert!(text.contains("Summary: 1 parameter sets, 2 runs, 1 retries in 1.5s"));
    }
}
