//! Result Sink Seam
//!
//! The orchestrator flushes a finalized [`CaseResult`] through a
//! [`ResultSink`] at each case boundary. The file-backed implementation
//! lives in `framebench-store`; [`MemorySink`] covers tests and embedding
//! hosts that keep results in memory.

use crate::error::SinkError;
use crate::record::CaseResult;
use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Where and when a case result was persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedResult {
    /// Resolved location of the stored record
    pub path: PathBuf,
    /// Creation timestamp of the stored record
    pub timestamp: DateTime<Utc>,
}

/// Destination for finalized case results
pub trait ResultSink {
    /// Persist one case's aggregated runs.
    ///
    /// Called at case boundaries only, never mid-run, so implementations may
    /// block on filesystem latency. A failure must leave previously saved
    /// results intact.
    fn save(&mut self, result: &CaseResult) -> Result<SavedResult, SinkError>;
}

/// In-memory sink that keeps every saved result
#[derive(Debug, Default)]
pub struct MemorySink {
    saved: Vec<CaseResult>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Results saved so far, in save order
    pub fn saved(&self) -> &[CaseResult] {
        &self.saved
    }

    /// Consume the sink, yielding the saved results
    pub fn into_saved(self) -> Vec<CaseResult> {
        self.saved
    }
}

impl ResultSink for MemorySink {
    fn save(&mut self, result: &CaseResult) -> Result<SavedResult, SinkError> {
        let path = PathBuf::from(format!("memory:{}", result.env.benchmark_name));
        self.saved.push(result.clone());
        Ok(SavedResult {
            path,
            timestamp: Utc::now(),
        })
    }
}
