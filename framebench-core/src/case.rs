//! Benchmark Cases and Global Options
//!
//! A case binds a named workload (scene or shader) to its run parameters.
//! Cases are immutable once loaded; the orchestrator only reads them.

use serde::{Deserialize, Serialize};

/// What kind of workload a case drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CaseKind {
    /// A full scene flythrough
    #[default]
    Scene,
    /// An isolated shader stress workload
    Shader,
}

/// One configured benchmark workload with its run parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkCase {
    /// Case name; also the persisted result file stem
    pub name: String,
    /// Scene/shader identifier the host resolves and loads
    pub workload: String,
    /// Workload kind
    #[serde(default)]
    pub kind: CaseKind,
    /// Number of measured runs
    #[serde(default = "default_runs")]
    pub runs: u32,
    /// Frames per run
    #[serde(default = "default_run_length")]
    pub run_length: u32,
    /// Whether an unpersisted warmup run precedes the measured runs
    #[serde(default = "default_warmup")]
    pub warmup: bool,
}

fn default_runs() -> u32 {
    4
}
fn default_run_length() -> u32 {
    1000
}
fn default_warmup() -> bool {
    true
}

/// What to do once the last case finishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FinishAction {
    /// Ask the host to terminate the process
    Exit,
    /// Ask the host to present the collected results
    ShowStats,
    /// Do nothing; the host decides
    #[default]
    Nothing,
}

/// Global options applied across the whole case list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchOptions {
    /// Persist each case's result through the configured sink
    #[serde(default = "default_true")]
    pub save_results: bool,
    /// Collect per-frame statistics at all; when off the aggregator is
    /// bypassed and nothing is recorded or saved
    #[serde(default = "default_true")]
    pub stats_enabled: bool,
    /// Hint for the host to disable vertical sync before running
    #[serde(default = "default_true")]
    pub disable_vsync: bool,
    /// Action requested when the sequence finishes
    #[serde(default)]
    pub finish_action: FinishAction,
    /// Loop a single designated case for live inspection; records are never
    /// persisted and the loop only ends via `end_benchmark()`
    #[serde(default)]
    pub simple_run: bool,
    /// Index of the case `simple_run` is restricted to
    #[serde(default)]
    pub simple_run_case: usize,
}

fn default_true() -> bool {
    true
}

impl Default for BenchOptions {
    fn default() -> Self {
        Self {
            save_results: true,
            stats_enabled: true,
            disable_vsync: true,
            finish_action: FinishAction::default(),
            simple_run: false,
            simple_run_case: 0,
        }
    }
}

/// Validate a case list and its options; returns a description of the first
/// problem found. Shared by configuration loading and orchestrator start.
pub(crate) fn validate_suite(cases: &[BenchmarkCase], options: &BenchOptions) -> Result<(), String> {
    if cases.is_empty() {
        return Err("case list is empty".to_string());
    }
    for (index, case) in cases.iter().enumerate() {
        if case.name.trim().is_empty() {
            return Err(format!("case {index} has an empty name"));
        }
        if case.workload.trim().is_empty() {
            return Err(format!(
                "case `{}` has an empty workload reference",
                case.name
            ));
        }
        if case.runs == 0 {
            return Err(format!("case `{}` has a run count of 0", case.name));
        }
        if case.run_length == 0 {
            return Err(format!("case `{}` has a run length of 0", case.name));
        }
    }
    if options.simple_run && options.simple_run_case >= cases.len() {
        return Err(format!(
            "simple run case index {} is out of range ({} cases configured)",
            options.simple_run_case,
            cases.len()
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(name: &str) -> BenchmarkCase {
        BenchmarkCase {
            name: name.to_string(),
            workload: format!("scenes/{name}"),
            kind: CaseKind::Scene,
            runs: 3,
            run_length: 10,
            warmup: true,
        }
    }

    #[test]
    fn test_empty_case_list_rejected() {
        let err = validate_suite(&[], &BenchOptions::default()).unwrap_err();
        assert!(err.contains("empty"));
    }

    #[test]
    fn test_zero_run_length_rejected() {
        let mut c = case("island");
        c.run_length = 0;
        assert!(validate_suite(&[c], &BenchOptions::default()).is_err());
    }

    #[test]
    fn test_empty_workload_rejected() {
        let mut c = case("island");
        c.workload = "  ".to_string();
        assert!(validate_suite(&[c], &BenchOptions::default()).is_err());
    }

    #[test]
    fn test_simple_run_target_must_be_in_range() {
        let options = BenchOptions {
            simple_run: true,
            simple_run_case: 2,
            ..Default::default()
        };
        assert!(validate_suite(&[case("island"), case("harbor")], &options).is_err());

        let options = BenchOptions {
            simple_run: true,
            simple_run_case: 1,
            ..Default::default()
        };
        assert!(validate_suite(&[case("island"), case("harbor")], &options).is_ok());
    }
}
