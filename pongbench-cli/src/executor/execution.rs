//! Benchmark Execution
//!
//! Walks the execution plan one invocation at a time. Each step prints its
//! full command line, runs under the supervisor's retry policy and records
//! the scraped throughput in the slot for its parameter row and benchmark.
//!
//! ## Data Flow
//!
//! ```text
//! ExecutionPlan (row-major PlanSteps)
//!        │
//!        ▼
//! ┌──────────────────┐
//! │    Supervisor    │  capture file → sh -c → retry → scrape
//! └────────┬─────────┘
//!          │
//!          ▼
//!  ExecutionOutcome (throughputs[row][bench], run/retry counts)
//! ```
//!
//! The first fatal error aborts the whole run; nothing collected so far is kept.

use crate::planner::ExecutionPlan;
use crate::supervisor::{Supervisor, SupervisorError};
use indicatif::{ProgressBar, ProgressStyle};

/// Throughputs collected for a whole plan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionOutcome {
    /// `throughputs[row][bench]`, in plan order
    pub throughputs: Vec<Vec<String>>,
    /// Benchmark invocations that produced a figure
    pub runs: usize,
    /// Extra attempts spent on non-zero exits
    pub retries: usize,
}

/// Sequential executor for an execution plan
pub struct Executor {
    supervisor: Supervisor,
    show_progress: bool,
}

impl Executor {
    /// Create an executor driving processes through `supervisor`
    pub fn new(supervisor: Supervisor) -> Self {
        Self {
            supervisor,
            show_progress: true,
        }
    }

    /// Enable or disable the progress bar
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Execute every step of `plan`.
    pub fn execute(&self, plan: &ExecutionPlan) -> Result<ExecutionOutcome, SupervisorError> {
        let pb = if self.show_progress {
            ProgressBar::new(plan.len() as u64)
        } else {
            ProgressBar::hidden()
        };
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let mut outcome = ExecutionOutcome {
            throughputs: vec![Vec::with_capacity(plan.bench_ids().len()); plan.rows()],
            ..Default::default()
        };

        for step in plan.steps() {
            pb.set_message(format!("row {} / {}", step.row + 1, step.bench_id));

            let process = self.supervisor.prepare(&step.bench_id, &step.invocation)?;
            let command_line = process.command_line();
            pb.suspend(|| println!("{}", command_line));

            let capture = match self.supervisor.run(&process) {
                Ok(capture) => capture,
                Err(e) => {
                    pb.abandon_with_message(format!("Failed: {}", step.bench_id));
                    return Err(e);
                }
            };
            tracing::debug!(
                bench = %step.bench_id,
                row = step.row,
                attempts = capture.attempts,
                "{} MB/s",
                capture.throughput
            );

            outcome.runs += 1;
            outcome.retries += capture.attempts.saturating_sub(1) as usize;
            outcome.throughputs[step.row].push(capture.throughput);
            pb.inc(1);
        }

        pb.finish_and_clear();
        Ok(outcome)
    }
}
