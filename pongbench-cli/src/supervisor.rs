//! Process Supervisor
//!
//! Runs the build step and the external benchmark processes.
//!
//! Each benchmark invocation gets a private capture file for its standard
//! output. A non-zero exit reruns the identical command line until it
//! succeeds (or until the configured attempt cap), then the capture is
//! scraped for the `MB/s` figure. The capture file is removed when the
//! [`BenchProcess`] is dropped, whichever way the run ended.

use pongbench_core::{ScrapeError, scrape_file};
use std::num::NonZeroU32;
use std::path::Path;
use std::process::{Command, ExitStatus};
use std::time::Duration;
use tempfile::NamedTempFile;
use thiserror::Error;

/// Prefix of capture file names in the temp directory
const CAPTURE_PREFIX: &str = "pongbench-";

/// Errors raised while running the build or a benchmark
#[derive(Debug, Error)]
pub enum SupervisorError {
    /// The capture file could not be created or truncated
    #[error("Failed to create capture file: {0}")]
    CaptureFile(#[source] std::io::Error),

    /// `sh` could not be started
    #[error("Failed to spawn `{command}`: {source}")]
    Spawn {
        /// Command line, including the redirection
        command: String,
        /// Underlying spawn error
        #[source]
        source: std::io::Error,
    },

    /// The attempt cap was reached without a successful exit
    #[error("`{command}` still failing after {attempts} attempt(s)")]
    RetriesExhausted {
        /// Command line, including the redirection
        command: String,
        /// Attempts made
        attempts: u32,
    },

    /// The successful attempt printed no throughput line
    #[error("`{command}`: {source}")]
    Scrape {
        /// Command line, including the redirection
        command: String,
        /// Scrape failure
        #[source]
        source: ScrapeError,
    },
}

/// How failing benchmark processes are retried
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts; `None` retries forever
    pub max_attempts: Option<NonZeroU32>,
    /// Sleep between attempts
    pub backoff: Duration,
}

impl RetryPolicy {
    /// Retry forever without pausing
    pub fn unbounded() -> Self {
        Self::default()
    }

    fn allows(&self, attempts: u32) -> bool {
        self.max_attempts.is_none_or(|max| attempts < max.get())
    }
}

/// A prepared benchmark invocation bound to its capture file
pub struct BenchProcess {
    bench_id: String,
    invocation: String,
    capture: NamedTempFile,
}

impl BenchProcess {
    /// Benchmark identifier (report column)
    pub fn bench_id(&self) -> &str {
        &self.bench_id
    }

    /// Shell line without the output redirection
    pub fn invocation(&self) -> &str {
        &self.invocation
    }

    /// Path of the file receiving standard output
    pub fn capture_path(&self) -> &Path {
        self.capture.path()
    }

    /// Full command line as run, including the redirection
    pub fn command_line(&self) -> String {
        format!("{} > {}", self.invocation, self.capture_path().display())
    }

    /// Run once, truncating the capture before the child starts writing.
    fn spawn_once(&self) -> Result<ExitStatus, SupervisorError> {
        let stdout = self
            .capture
            .reopen()
            .and_then(|file| file.set_len(0).map(|()| file))
            .map_err(SupervisorError::CaptureFile)?;

        Command::new("sh")
            .arg("-c")
            .arg(&self.invocation)
            .stdout(stdout)
            .status()
            .map_err(|source| SupervisorError::Spawn {
                command: self.command_line(),
                source,
            })
    }
}

/// Outcome of a successful benchmark run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    /// Throughput figure as printed by the benchmark
    pub throughput: String,
    /// Attempts needed, including the successful one
    pub attempts: u32,
}

/// Supervisor for the build step and benchmark processes
pub struct Supervisor {
    policy: RetryPolicy,
}

impl Supervisor {
    /// Create a new supervisor
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    /// Run the build command and carry on whatever its outcome.
    pub fn build(&self, command: &str) {
        tracing::info!("Building: {}", command);
        match Command::new("sh").arg("-c").arg(command).status() {
            Ok(status) if status.success() => tracing::debug!("Build finished"),
            Ok(status) => tracing::debug!("Build exited with {}, continuing", status),
            Err(e) => tracing::debug!("Build could not be started ({}), continuing", e),
        }
    }

    /// Bind a benchmark's shell line to a fresh capture file.
    pub fn prepare(&self, bench_id: &str, invocation: &str) -> Result<BenchProcess, SupervisorError> {
        let capture = tempfile::Builder::new()
            .prefix(CAPTURE_PREFIX)
            .tempfile()
            .map_err(SupervisorError::CaptureFile)?;

        Ok(BenchProcess {
            bench_id: bench_id.to_string(),
            invocation: invocation.to_string(),
            capture,
        })
    }

    /// Run `process` until it exits successfully, then scrape its output.
    pub fn run(&self, process: &BenchProcess) -> Result<Capture, SupervisorError> {
        let mut attempts = 0;
        loop {
            attempts += 1;
            let status = process.spawn_once()?;
            if status.success() {
                break;
            }

            tracing::debug!(
                bench = process.bench_id(),
                attempt = attempts,
                "{} exited with {}",
                process.invocation(),
                status
            );
            if !self.policy.allows(attempts) {
                return Err(SupervisorError::RetriesExhausted {
                    command: process.command_line(),
                    attempts,
                });
            }
            if !self.policy.backoff.is_zero() {
                std::thread::sleep(self.policy.backoff);
            }
        }

        let throughput =
            scrape_file(process.capture_path()).map_err(|source| SupervisorError::Scrape {
                command: process.command_line(),
                source,
            })?;

        Ok(Capture {
            throughput,
            attempts,
        })
    }
}
