#![warn(missing_docs)]
//! PongBench CLI Library
//!
//! Command line harness for the ping-pong throughput matrix. The pipeline is
//! strictly sequential:
//!
//! ```text
//! build ─► load params ─► plan ─► run + scrape each (row, benchmark) ─► CSV report
//! ```
//!
//! # Example
//!
//! ```ignore
//! fn main() -> anyhow::Result<()> {
//!     pongbench_cli::run()
//! }
//! ```

mod config;
mod executor;
mod planner;
mod supervisor;

pub use config::*;
pub use executor::{
    ExecutionOutcome, Executor, build_report, build_report_meta, format_human_output,
};
pub use planner::{ExecutionPlan, PlanStep, build_plan};
pub use supervisor::*;

use chrono::Local;
use clap::{Parser, Subcommand};
use pongbench_core::{ParamTable, load_params};
use pongbench_report::{Report, save_report};
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::time::Instant;

/// PongBench CLI arguments
#[derive(Parser, Debug)]
#[command(name = "pongbench")]
#[command(author, version, about = "PongBench - ping-pong throughput harness")]
pub struct Cli {
    /// Optional subcommand (Run, Plan, Init); defaults to Run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file (default: discover pongbench.toml upwards from the current directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Parameter matrix CSV
    #[arg(long, global = true)]
    pub params: Option<PathBuf>,

    /// Directory receiving the CSV report
    #[arg(long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Give up on a benchmark after N failed attempts (default: retry forever)
    #[arg(long, global = true)]
    pub max_attempts: Option<NonZeroU32>,

    /// Skip the build step
    #[arg(long, global = true)]
    pub skip_build: bool,

    /// Dry run - print the planned command lines without executing
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the build, every benchmark and write the report (default)
    Run,
    /// Print the planned command lines
    Plan,
    /// Print a default pongbench.toml
    Init,
}

/// Run the PongBench CLI with the process arguments.
///
/// # Returns
/// Returns `Ok(())` on success, or the first fatal error.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the PongBench CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("pongbench=debug")
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("pongbench=info")
            .init();
    }

    let config = resolve_config(&cli)?;
    let harness = Harness::new(config).skip_build(cli.skip_build);

    match cli.command {
        Some(Commands::Init) => {
            print!("{}", PongConfig::default_toml());
        }
        Some(Commands::Plan) => {
            print_plan(&harness)?;
        }
        Some(Commands::Run) | None => {
            if cli.dry_run {
                print_plan(&harness)?;
            } else {
                let output = harness.run()?;
                print!("{}", format_human_output(&output.report));
                println!("Report written to: {}", output.path.display());
            }
        }
    }

    Ok(())
}

/// Layer configuration: defaults → pongbench.toml → CLI flags.
fn resolve_config(cli: &Cli) -> anyhow::Result<PongConfig> {
    let mut config = match &cli.config {
        Some(path) => PongConfig::load(path).map_err(|e| {
            anyhow::anyhow!("Failed to load config {}: {}", path.display(), e)
        })?,
        None => PongConfig::discover().unwrap_or_default(),
    };

    if let Some(params) = &cli.params {
        config.runner.params = params.clone();
    }
    if let Some(dir) = &cli.output_dir {
        config.output.directory = dir.clone();
    }
    if cli.max_attempts.is_some() {
        config.runner.max_attempts = cli.max_attempts;
    }

    Ok(config)
}

fn print_plan(harness: &Harness) -> anyhow::Result<()> {
    let (table, plan) = harness.plan()?;

    println!("PongBench Plan:");
    for (row, param) in table.rows().iter().enumerate() {
        let fields: Vec<String> = param
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect();
        println!("├── row {}: {}", row + 1, fields.join(" "));
        for step in plan.steps().iter().filter(|s| s.row == row) {
            println!("│   ├── {}: {} > <tmp>", step.bench_id, step.invocation);
        }
    }
    println!(
        "{} invocations planned ({} parameter sets × {} benchmarks).",
        plan.len(),
        table.len(),
        plan.bench_ids().len()
    );

    Ok(())
}

/// Result of a completed harness run
#[derive(Debug)]
pub struct RunOutput {
    /// The report that was written
    pub report: Report,
    /// Path of the CSV report file
    pub path: PathBuf,
}

/// The build → load → execute → report pipeline for one configuration
pub struct Harness {
    config: PongConfig,
    skip_build: bool,
    show_progress: bool,
}

impl Harness {
    /// Create a harness for `config`
    pub fn new(config: PongConfig) -> Self {
        Self {
            config,
            skip_build: false,
            show_progress: true,
        }
    }

    /// Skip the build step
    pub fn skip_build(mut self, skip: bool) -> Self {
        self.skip_build = skip;
        self
    }

    /// Enable or disable the progress bar
    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Configuration in effect
    pub fn config(&self) -> &PongConfig {
        &self.config
    }

    fn retry_policy(&self) -> anyhow::Result<RetryPolicy> {
        Ok(RetryPolicy {
            max_attempts: self.config.runner.max_attempts,
            backoff: self.config.retry_backoff()?,
        })
    }

    /// Load the parameter table and expand it into the execution plan.
    pub fn plan(&self) -> anyhow::Result<(ParamTable, ExecutionPlan)> {
        if self.config.benchmarks.is_empty() {
            anyhow::bail!("No benchmarks configured");
        }

        let table = load_params(&self.config.runner.params)?;
        tracing::info!(
            "Loaded {} parameter sets from {}",
            table.len(),
            self.config.runner.params.display()
        );
        let plan = build_plan(&table, &self.config.benchmarks)?;
        Ok((table, plan))
    }

    /// Build, run every benchmark for every parameter row and write the report.
    ///
    /// The report is only written once every invocation has produced a
    /// figure; any fatal error returns before touching the results directory.
    pub fn run(&self) -> anyhow::Result<RunOutput> {
        let started = Local::now();
        let start_time = Instant::now();
        let supervisor = Supervisor::new(self.retry_policy()?);

        if !self.skip_build {
            supervisor.build(&self.config.runner.build_command);
        }

        let (table, plan) = self.plan()?;
        let executor = Executor::new(supervisor).with_progress(self.show_progress);
        let outcome = executor.execute(&plan)?;

        let total_duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;
        let report = build_report(
            &table,
            &self.config.benchmarks,
            outcome,
            build_report_meta(started),
            total_duration_ms,
        )?;

        let path = save_report(&report, &self.config.output.directory)?;
        tracing::info!("Report written to {}", path.display());

        Ok(RunOutput { report, path })
    }
}
