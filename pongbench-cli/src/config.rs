//! Configuration loading from pongbench.toml
//!
//! PongBench configuration can be specified in a `pongbench.toml` file in the project root.
//! The configuration is automatically discovered by walking up from the current directory.
//! Every section is optional; the defaults reproduce the stock ping-pong matrix.

use pongbench_core::{BenchmarkDef, default_benchmarks};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Name of the configuration file looked up by [`PongConfig::discover`]
pub const CONFIG_FILE_NAME: &str = "pongbench.toml";

/// PongBench configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PongConfig {
    /// Runner configuration
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
    /// Benchmark commands, in report column order
    #[serde(default = "default_benchmarks")]
    pub benchmarks: Vec<BenchmarkDef>,
}

impl Default for PongConfig {
    fn default() -> Self {
        Self {
            runner: RunnerConfig::default(),
            output: OutputConfig::default(),
            benchmarks: default_benchmarks(),
        }
    }
}

/// Runner configuration for benchmark execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Parameter matrix CSV
    #[serde(default = "default_params")]
    pub params: PathBuf,
    /// Shell command that builds the native benchmark; its exit status is not checked
    #[serde(default = "default_build_command")]
    pub build_command: String,
    /// Give up on a benchmark after this many failed attempts (unbounded if unset)
    #[serde(default)]
    pub max_attempts: Option<NonZeroU32>,
    /// Pause between attempts (e.g., "500ms", "2s")
    #[serde(default = "default_retry_backoff")]
    pub retry_backoff: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            params: default_params(),
            build_command: default_build_command(),
            max_attempts: None,
            retry_backoff: default_retry_backoff(),
        }
    }
}

fn default_params() -> PathBuf {
    PathBuf::from("example/benchmarks.csv")
}
fn default_build_command() -> String {
    "make ping_pong".to_string()
}
fn default_retry_backoff() -> String {
    "0s".to_string()
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving the timestamped CSV reports
    #[serde(default = "default_output_dir")]
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("results")
}

impl PongConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return match Self::load(&config_path) {
                    Ok(config) => Some(config),
                    Err(e) => {
                        tracing::warn!(path = %config_path.display(), "ignoring config: {}", e);
                        None
                    }
                };
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Resolved pause between benchmark attempts
    pub fn retry_backoff(&self) -> anyhow::Result<Duration> {
        Self::parse_duration(&self.runner.retry_backoff)
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# PongBench Configuration

[runner]
# Parameter matrix; must have integer `iterations` and `vector_sz` columns
params = "example/benchmarks.csv"
# Build step run before benchmarking (exit status is not checked)
build_command = "make ping_pong"
# Stop retrying a failing benchmark after N attempts (uncomment to enable)
# max_attempts = 10
# Pause between attempts
retry_backoff = "0s"

[output]
# Directory for timestamped CSV reports
directory = "results"

# Benchmarks run for every parameter row, in report column order.
# Each command gets `<iterations> <vector_sz>` appended.
[[benchmarks]]
id = "mpi_pp"
command = "mpirun -np 2 example/ping_pong"

[[benchmarks]]
id = "ac_pp"
command = "julia example/ping_pong_array_channels.jl"

[[benchmarks]]
id = "jl_pp"
command = "julia example/ping_pong.jl"
"#
        .to_string()
    }

    /// Parse duration string (e.g., "3s", "500ms", "2m")
    pub fn parse_duration(s: &str) -> anyhow::Result<Duration> {
        let s = s.trim();
        if s.is_empty() {
            return Err(anyhow::anyhow!("Empty duration string"));
        }

        // Find where the number ends and unit begins
        let (num_part, unit_part) = s
            .char_indices()
            .find(|(_, c)| c.is_alphabetic())
            .map(|(i, _)| s.split_at(i))
            .unwrap_or((s, "s"));

        let value: f64 = num_part
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid duration number: {}", num_part))?;
        if !value.is_finite() || value < 0.0 {
            return Err(anyhow::anyhow!("Invalid duration number: {}", num_part));
        }

        let multiplier: u64 = match unit_part.to_lowercase().as_str() {
            "ns" => 1,
            "us" | "µs" => 1_000,
            "ms" => 1_000_000,
            "s" | "" => 1_000_000_000,
            "m" | "min" => 60_000_000_000,
            _ => return Err(anyhow::anyhow!("Unknown duration unit: {}", unit_part)),
        };

        Ok(Duration::from_nanos((value * multiplier as f64) as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PongConfig::default();
        assert_eq!(config.runner.params, Path::new("example/benchmarks.csv"));
        assert_eq!(config.runner.build_command, "make ping_pong");
        assert_eq!(config.runner.max_attempts, None);
        assert_eq!(config.output.directory, Path::new("results"));
        assert_eq!(config.benchmarks, default_benchmarks());
        assert_eq!(config.retry_backoff().unwrap(), Duration::ZERO);
    }

    #[test]
    fn test_parse_duration() {
        let ms = Duration::from_millis;
        assert_eq!(PongConfig::parse_duration("3s").unwrap(), ms(3_000));
        assert_eq!(PongConfig::parse_duration("500ms").unwrap(), ms(500));
        assert_eq!(PongConfig::parse_duration("100us").unwrap(), Duration::from_micros(100));
        assert_eq!(PongConfig::parse_duration("1000ns").unwrap(), Duration::from_nanos(1000));
        assert_eq!(PongConfig::parse_duration("2m").unwrap(), ms(120_000));
        assert_eq!(PongConfig::parse_duration("1.5s").unwrap(), ms(1_500));
        assert_eq!(PongConfig::parse_duration("2").unwrap(), ms(2_000));
        assert!(PongConfig::parse_duration("").is_err());
        assert!(PongConfig::parse_duration("-1s").is_err());
        assert!(PongConfig::parse_duration("5h").is_err());
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
            [runner]
            params = "matrix.csv"
            max_attempts = 3

            [[benchmarks]]
            id = "echo"
            command = "echo"
        "#;

        let config: PongConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.runner.params, Path::new("matrix.csv"));
        assert_eq!(config.runner.max_attempts, NonZeroU32::new(3));
        assert_eq!(config.benchmarks, vec![BenchmarkDef::new("echo", "echo")]);
        // Defaults should still apply
        assert_eq!(config.runner.build_command, "make ping_pong");
        assert_eq!(config.output.directory, Path::new("results"));
    }

    #[test]
    fn test_zero_max_attempts_rejected() {
        let result: Result<PongConfig, _> = toml::from_str("[runner]\nmax_attempts = 0\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: PongConfig = toml::from_str("").unwrap();
        assert_eq!(config.benchmarks.len(), 3);
        assert_eq!(config.runner.retry_backoff, "0s");
    }

    #[test]
    fn test_default_toml_parses() {
        let config: PongConfig = toml::from_str(&PongConfig::default_toml()).unwrap();
        assert_eq!(config.benchmarks, default_benchmarks());
        assert_eq!(config.runner.params, Path::new("example/benchmarks.csv"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[output]\ndirectory = \"out\"\n").unwrap();

        let config = PongConfig::load(&path).unwrap();
        assert_eq!(config.output.directory, Path::new("out"));
    }
}
