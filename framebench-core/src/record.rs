//! Result Records
//!
//! The data model for finalized measurements: one [`RunRecord`] per timed
//! pass, one [`CaseResult`] per benchmark case. Records are mutated only
//! while their run is active and frozen once the run ends.

use serde::{Deserialize, Serialize};

/// One frame's measured duration tagged with its 0-based frame offset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameMark {
    /// 0-based frame offset within the run (-1 for the unset sentinel)
    pub frame_index: i32,
    /// Frame duration in milliseconds
    pub ms: f64,
}

impl FrameMark {
    /// Create a mark for a concrete frame
    pub fn new(frame_index: i32, ms: f64) -> Self {
        Self { frame_index, ms }
    }

    /// Sentinel for the minimum tracker: any real sample replaces it
    pub fn default_min() -> Self {
        Self::new(-1, f64::INFINITY)
    }

    /// Sentinel for the maximum tracker: any real sample replaces it
    pub fn default_max() -> Self {
        Self::new(-1, f64::NEG_INFINITY)
    }
}

/// Statistics for one timed pass through a case
///
/// Invariants once frozen: `raw_samples.len()` equals the configured run
/// length, `min_frame.ms <= sample <= max_frame.ms` for every sample, and
/// `avg_ms` is the arithmetic mean of `raw_samples`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Total run duration in seconds
    pub run_time_secs: f64,
    /// Arithmetic mean frame time in milliseconds
    pub avg_ms: f64,
    /// Fastest frame of the run
    pub min_frame: FrameMark,
    /// Slowest frame of the run
    pub max_frame: FrameMark,
    /// Ordered per-frame samples in milliseconds, indexed by frame offset
    pub raw_samples: Vec<f64>,
}

/// Environment metadata identifying where a benchmark ran
///
/// The host fills in what it knows; fields default to `"N/A"`. Values are
/// whitespace-compacted so they survive the line-oriented result encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvInfo {
    /// Benchmark case name
    pub benchmark_name: String,
    /// Scene/shader workload identifier
    pub workload: String,
    /// Host runtime/engine version string
    pub runtime_version: String,
    /// Render pipeline version string
    pub renderer_version: String,
    /// Application build version string
    pub app_version: String,
    /// Platform name
    pub platform: String,
    /// Graphics API in use
    pub graphics_api: String,
    /// CPU model string
    pub cpu: String,
    /// GPU model string
    pub gpu: String,
    /// Operating system string
    pub os: String,
    /// Quality tier name
    pub quality: String,
    /// Display resolution, e.g. `1920x1080`
    pub resolution: String,
}

impl EnvInfo {
    /// Create metadata for a named benchmark, probing what the standard
    /// library can tell us and leaving the rest for the host to fill in.
    pub fn new(benchmark_name: impl Into<String>, workload: impl Into<String>) -> Self {
        Self {
            benchmark_name: compact(&benchmark_name.into()),
            workload: compact(&workload.into()),
            runtime_version: "N/A".to_string(),
            renderer_version: "N/A".to_string(),
            app_version: "N/A".to_string(),
            platform: std::env::consts::OS.to_string(),
            graphics_api: "N/A".to_string(),
            cpu: std::env::consts::ARCH.to_string(),
            gpu: "N/A".to_string(),
            os: std::env::consts::OS.to_string(),
            quality: "N/A".to_string(),
            resolution: "N/A".to_string(),
        }
    }

    /// Clone this environment template for a specific case
    pub fn for_case(&self, benchmark_name: &str, workload: &str) -> Self {
        let mut env = self.clone();
        env.benchmark_name = compact(benchmark_name);
        env.workload = compact(workload);
        env
    }

    /// Ordered `(label, value)` pairs for display layers.
    ///
    /// An explicit list instead of runtime field introspection; the order is
    /// stable and part of the presentation contract.
    pub fn display_fields(&self) -> [(&'static str, &str); 12] {
        [
            ("Benchmark", &self.benchmark_name),
            ("Workload", &self.workload),
            ("Runtime", &self.runtime_version),
            ("Renderer", &self.renderer_version),
            ("Build", &self.app_version),
            ("Platform", &self.platform),
            ("API", &self.graphics_api),
            ("CPU", &self.cpu),
            ("GPU", &self.gpu),
            ("OS", &self.os),
            ("Quality", &self.quality),
            ("Resolution", &self.resolution),
        ]
    }
}

/// Remove all whitespace from a metadata value
fn compact(s: &str) -> String {
    s.split_whitespace().collect()
}

/// A benchmark case's identifying metadata plus its finalized runs
///
/// Created once per case, appended to while the case is active, closed when
/// the case ends. Run order equals execution order; warmup runs are never
/// appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseResult {
    /// Environment the case ran in
    pub env: EnvInfo,
    /// Configured frames per run
    pub frames_per_run: u32,
    /// Finalized runs in execution order
    pub runs: Vec<RunRecord>,
}

impl CaseResult {
    /// Open a result for a case about to execute
    pub fn new(env: EnvInfo, frames_per_run: u32) -> Self {
        Self {
            env,
            frames_per_run,
            runs: Vec::new(),
        }
    }

    /// Append a finalized run
    pub fn push_run(&mut self, record: RunRecord) {
        self.runs.push(record);
    }
}
