//! Error Taxonomy
//!
//! Orchestration-level errors (configuration, workload load) are fatal and
//! abort the benchmark sequence. Aggregation and storage errors are local
//! and recoverable: an overflowed frame is dropped, a failed save leaves the
//! in-memory sequence intact.

use thiserror::Error;

/// Errors surfaced by the orchestration state machine
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// The case list or options are invalid; the benchmark never starts.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A case's workload failed to become ready. The whole sequence is
    /// aborted: the finish action and file layout assume exactly one result
    /// slot per configured case, so there is no partial-case skip.
    #[error("workload `{workload}` failed to load for case `{case}`: {reason}")]
    WorkloadLoad {
        /// Name of the case whose workload failed
        case: String,
        /// The unresolvable workload reference
        workload: String,
        /// Host-supplied failure description
        reason: String,
    },

    /// A lifecycle signal arrived in a state that cannot accept it.
    #[error("unexpected `{signal}` signal in state {state}")]
    UnexpectedSignal {
        /// The signal that was delivered
        signal: &'static str,
        /// The state the orchestrator was in
        state: String,
    },

    /// More frame signals arrived than the configured run length.
    #[error(transparent)]
    Overflow(#[from] OverflowError),
}

/// More frames were recorded than the run was configured for.
///
/// Indicates a clock/orchestrator desync. The excess sample is dropped and
/// the run still finalizes; the error exists so the desync is reported
/// rather than silently truncated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("frame overflow: received frame {frame_index} but the run is configured for {run_length} frames")]
pub struct OverflowError {
    /// 0-based index of the frame that did not fit
    pub frame_index: u32,
    /// Configured frames per run
    pub run_length: u32,
}

/// Errors from a [`ResultSink`](crate::ResultSink) flush
#[derive(Debug, Error)]
pub enum SinkError {
    /// Underlying filesystem failure (permissions, disk full)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A record could not be encoded
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Errors from suite configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid TOML
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// The configuration parsed but fails validation
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
