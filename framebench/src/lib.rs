#![warn(missing_docs)]
//! # framebench
//!
//! Repeatable frame-time benchmarking for interactive applications:
//! - **Orchestration**: [`RunOrchestrator`] sequences warmup and measured
//!   runs across a configured case list, clocked only by the host's
//!   frame-completion signal
//! - **Aggregation**: [`RunAggregator`] turns per-frame durations into
//!   min/max/average statistics with full raw samples
//! - **Persistence**: [`ResultStore`] writes one line-JSON file per case
//!   into a `PerformanceResults` directory and enumerates history
//!
//! ## Quick Start
//!
//! ```no_run
//! use framebench::prelude::*;
//!
//! let config = SuiteConfig::parse(&SuiteConfig::default_toml())?;
//! let store = ResultStore::for_context(StoreContext::Development, "my-app")?;
//! let env = EnvInfo::new("suite", "none");
//!
//! let mut bench = RunOrchestrator::new(config.cases, config.options, env, store);
//! let mut pending = Some(bench.start()?);
//!
//! while let Some(request) = pending.take() {
//!     // host: load `request.workload`, then...
//!     bench.on_workload_ready()?;
//!     loop {
//!         let frame_ms = 16.7; // host: render a frame, measure it
//!         match bench.on_frame_completed(frame_ms)? {
//!             FrameOutcome::CaseCompleted { next, .. } => {
//!                 pending = Some(next);
//!                 break;
//!             }
//!             FrameOutcome::Finished { .. } => break,
//!             _ => {}
//!         }
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use framebench_core::{
    BenchOptions, BenchmarkCase, CaseKind, CaseResult, ConfigError, EnvInfo, FinishAction,
    FrameMark, FrameOutcome, FrameSampleBuffer, LoadRequest, MemorySink, OrchestratorError,
    OrchestratorState, OverflowError, ResultSink, RunAggregator, RunOrchestrator, RunRecord,
    SaveStatus, SavedResult, SinkError, SuiteConfig, LIVE_WINDOW, WARMUP_RUN_INDEX,
};

pub use framebench_store::{
    read_result_file, resolve_results_dir, ResultStore, StoreContext, StoreError, StoredResultSet,
    RESULTS_DIR_ENV, RESULTS_DIR_NAME, RESULT_FILE_EXT,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        BenchOptions, BenchmarkCase, CaseKind, EnvInfo, FinishAction, FrameOutcome, LoadRequest,
        OrchestratorState, ResultSink, ResultStore, RunOrchestrator, SaveStatus, StoreContext,
        SuiteConfig,
    };
}
