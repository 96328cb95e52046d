//! Benchmark Executor
//!
//! Runs the execution plan and turns its results into a report.
//!
//! ## Pipeline Overview
//!
//! ```text
//! ExecutionPlan (from planner)
//!       │
//!       ▼
//! ┌─────────────┐
//! │  execution  │  Run each invocation, retry, scrape MB/s
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │   report    │  Merge params + throughputs into a Report
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │ formatting  │  Human-readable summary
//! └─────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`execution`] - Sequential execution of the plan
//! - [`report`] - Report building and metadata
//! - [`formatting`] - Human-readable output formatting

mod execution;
mod formatting;
mod report;

// Re-export public API
pub use execution::{ExecutionOutcome, Executor};
pub use formatting::format_human_output;
pub use report::{build_report, build_report_meta};
