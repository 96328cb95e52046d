#![warn(missing_docs)]
//! PongBench Core - Parameters and Scraping
//!
//! This crate provides the data model shared by the harness:
//! - `ParamTable` / `BenchParam` for the schema-free CSV parameter matrix
//! - `BenchmarkDef` for the external ping-pong commands
//! - Throughput scraping of `<float> MB/s` lines from captured output

mod params;
mod scrape;

pub use params::{BenchParam, ParamError, ParamTable, load_params, read_params};
pub use scrape::{ScrapeError, THROUGHPUT_PATTERN, scrape_file, scrape_line, scrape_reader};

use serde::{Deserialize, Serialize};

/// Name of the parameter column holding the iteration count.
pub const ITERATIONS_FIELD: &str = "iterations";

/// Name of the parameter column holding the vector length.
pub const VECTOR_SZ_FIELD: &str = "vector_sz";

/// One external benchmark command.
///
/// The harness appends `<iterations> <vector_sz>` to `command` and captures
/// the standard output of the resulting shell line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkDef {
    /// Identifier used as the report column name
    pub id: String,
    /// Command prefix, run through `sh -c`
    pub command: String,
}

impl BenchmarkDef {
    /// Create a benchmark definition
    pub fn new(id: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            command: command.into(),
        }
    }

    /// Shell line for this benchmark with the parameter row's
    /// `iterations` and `vector_sz` appended as positional arguments.
    pub fn invocation(&self, param: &BenchParam) -> Result<String, ParamError> {
        let iterations = param.iterations()?;
        let vector_sz = param.vector_sz()?;
        Ok(format!("{} {} {}", self.command, iterations, vector_sz))
    }
}

/// The three ping-pong commands: MPI, array-channel Julia and plain Julia.
pub fn default_benchmarks() -> Vec<BenchmarkDef> {
    vec![
        BenchmarkDef::new("mpi_pp", "mpirun -np 2 example/ping_pong"),
        BenchmarkDef::new("ac_pp", "julia example/ping_pong_array_channels.jl"),
        BenchmarkDef::new("jl_pp", "julia example/ping_pong.jl"),
    ]
}
