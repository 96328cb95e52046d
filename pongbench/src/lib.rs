#![warn(missing_docs)]
//! # PongBench
//!
//! Throughput harness for ping-pong benchmarks.
//!
//! PongBench builds a native benchmark, then runs a fixed list of external
//! ping-pong programs for every row of a CSV parameter matrix:
//! - **Schema-free parameters**: any CSV columns, with `iterations` and `vector_sz` passed to each command
//! - **Retry on failure**: a non-zero exit reruns the identical command line
//! - **Scraping**: the first `<number> MB/s` line of captured stdout is the result
//! - **CSV reports**: one timestamped file per run under `results/`
//!
//! ## Quick Start
//!
//! ```ignore
//! use pongbench::{Harness, PongConfig};
//!
//! let output = Harness::new(PongConfig::default()).run()?;
//! println!("{}", output.path.display());
//! ```
//!
//! ## Configuration
//!
//! ```toml
//! [runner]
//! params = "example/benchmarks.csv"
//! max_attempts = 10
//!
//! [[benchmarks]]
//! id = "mpi_pp"
//! command = "mpirun -np 2 example/ping_pong"
//! ```

// Re-export core types
pub use pongbench_core::{
    BenchParam, BenchmarkDef, ParamError, ParamTable, ScrapeError, default_benchmarks,
    load_params, read_params, scrape_file, scrape_line, scrape_reader,
};

// Re-export report types
pub use pongbench_report::{
    BenchResult, Report, ReportError, ReportMeta, ReportSummary, generate_csv_report,
    save_report, write_csv_report,
};

// Re-export harness types
pub use pongbench_cli::{
    Cli, Commands, ExecutionPlan, Harness, PongConfig, RetryPolicy, RunOutput, Supervisor,
    SupervisorError, build_plan, format_human_output,
};

/// Run the PongBench CLI harness.
///
/// Call this from a binary's `main()`:
/// ```ignore
/// fn main() -> anyhow::Result<()> {
///     pongbench::run()
/// }
/// ```
pub use pongbench_cli::run;
