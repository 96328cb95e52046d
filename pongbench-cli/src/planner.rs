//! Benchmark Planner
//!
//! Expands the parameter table and benchmark list into the ordered list of
//! invocations to run: rows in file order, and for each row every benchmark
//! in configured order.
//!
//! Every row's `iterations` and `vector_sz` are resolved here, so a bad row
//! stops the run before any benchmark has been started.

use pongbench_core::{BenchmarkDef, ParamError, ParamTable};

/// One benchmark invocation in the plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanStep {
    /// Index of the parameter row
    pub row: usize,
    /// Index of the benchmark
    pub bench: usize,
    /// Benchmark identifier (report column)
    pub bench_id: String,
    /// Shell line without output redirection
    pub invocation: String,
}

/// Execution plan for the parameter matrix
///
/// Only [`build_plan`] constructs a plan, so every step's `row` and `bench`
/// index into `rows()` and `bench_ids()`.
#[derive(Debug, Clone)]
pub struct ExecutionPlan {
    rows: usize,
    bench_ids: Vec<String>,
    steps: Vec<PlanStep>,
}

impl ExecutionPlan {
    /// Ordered invocations
    pub fn steps(&self) -> &[PlanStep] {
        &self.steps
    }

    /// Number of parameter rows covered
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Benchmark identifiers, in column order
    pub fn bench_ids(&self) -> &[String] {
        &self.bench_ids
    }

    /// Number of invocations
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether there is nothing to run
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Build the execution plan for `table` × `benchmarks`.
pub fn build_plan(
    table: &ParamTable,
    benchmarks: &[BenchmarkDef],
) -> Result<ExecutionPlan, ParamError> {
    let mut steps = Vec::with_capacity(table.len() * benchmarks.len());

    for (row, param) in table.rows().iter().enumerate() {
        for (bench, def) in benchmarks.iter().enumerate() {
            steps.push(PlanStep {
                row,
                bench,
                bench_id: def.id.clone(),
                invocation: def.invocation(param)?,
            });
        }
    }

    Ok(ExecutionPlan {
        rows: table.len(),
        bench_ids: benchmarks.iter().map(|b| b.id.clone()).collect(),
        steps,
    })
}
