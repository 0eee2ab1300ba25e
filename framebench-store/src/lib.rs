//! framebench Store - Result Persistence
//!
//! Durable write/read of [`CaseResult`](framebench_core::CaseResult) data:
//! one line-delimited JSON file per case inside a `PerformanceResults`
//! directory, plus cached enumeration of historical results for the
//! presentation layer. [`ResultStore`] implements the core's
//! [`ResultSink`](framebench_core::ResultSink) seam, so the orchestrator
//! flushes through it at case boundaries.

mod paths;
mod store;

pub use paths::{resolve_results_dir, StoreContext, RESULTS_DIR_ENV, RESULTS_DIR_NAME};
pub use store::{read_result_file, ResultStore, StoreError, StoredResultSet, RESULT_FILE_EXT};
