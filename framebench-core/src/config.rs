//! Suite configuration loading from TOML
//!
//! A benchmark suite is described in a TOML file: global options plus an
//! ordered `[[case]]` array. Case order in the file is the execution order.

use crate::case::{validate_suite, BenchOptions, BenchmarkCase};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A full benchmark suite: global options plus the ordered case list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SuiteConfig {
    /// Global options
    #[serde(default)]
    pub options: BenchOptions,
    /// Cases in execution order
    #[serde(default, rename = "case")]
    pub cases: Vec<BenchmarkCase>,
}

impl SuiteConfig {
    /// Load and validate a suite from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse and validate a suite from a TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the case list and options for problems
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_suite(&self.cases, &self.options).map_err(ConfigError::Invalid)
    }

    /// Generate a commented template suite as a TOML string
    pub fn default_toml() -> String {
        r#"# framebench suite configuration

[options]
# Persist each case's results to the PerformanceResults directory
save_results = true
# Collect per-frame statistics (turning this off disables recording entirely)
stats_enabled = true
# Ask the host to disable vertical sync before running
disable_vsync = true
# Action when the last case finishes: "exit", "show-stats", or "nothing"
finish_action = "nothing"
# Loop a single case for live inspection instead of running the full suite
simple_run = false
# Which case simple_run is restricted to
simple_run_case = 0

[[case]]
name = "IslandFlythrough"
workload = "scenes/island"
# Workload kind: "scene" or "shader"
kind = "scene"
# Measured runs per case
runs = 4
# Frames per run
run_length = 1000
# Run one unpersisted warmup pass first
warmup = true
"#
        .to_string()
    }
}
