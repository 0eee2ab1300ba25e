#![warn(missing_docs)]
//! framebench Core - Orchestration and Aggregation
//!
//! The measurement core of framebench:
//! - [`RunOrchestrator`] - the state machine sequencing warmup and measured
//!   runs across a case list, clocked solely by the host's frame signal
//! - [`RunAggregator`] - per-run min/max/average statistics over raw frame
//!   samples, plus a rolling live-view buffer
//! - [`ResultSink`] - the seam a completed case is flushed through
//! - [`SuiteConfig`] - TOML suite configuration
//!
//! The host integrates by satisfying [`LoadRequest`]s and delivering two
//! signals per the rendering loop's lifecycle: `on_workload_ready` once per
//! case load and `on_frame_completed` once per rendered frame. There is no
//! internal threading; one case and one run are ever active.

mod aggregator;
mod case;
mod config;
mod error;
mod orchestrator;
mod record;
mod sink;

pub use aggregator::{FrameSampleBuffer, RunAggregator, LIVE_WINDOW};
pub use case::{BenchOptions, BenchmarkCase, CaseKind, FinishAction};
pub use config::SuiteConfig;
pub use error::{ConfigError, OrchestratorError, OverflowError, SinkError};
pub use orchestrator::{
    FrameOutcome, LoadRequest, OrchestratorState, RunOrchestrator, SaveStatus, WARMUP_RUN_INDEX,
};
pub use record::{CaseResult, EnvInfo, FrameMark, RunRecord};
pub use sink::{MemorySink, ResultSink, SavedResult};
