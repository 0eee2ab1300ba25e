//! Benchmark Orchestration State Machine
//!
//! [`RunOrchestrator`] drives a case list to completion, one case and one
//! run at a time. Its only clock is the host's frame-completion signal:
//! the host loads workloads and renders frames, the orchestrator decides
//! what happens next.
//!
//! ## Lifecycle
//!
//! ```text
//! start()
//!    │
//!    ▼
//! CaseLoading ──on_workload_ready()──▶ Warmup (optional)
//!    ▲                                    │
//!    │                                    ▼
//!    │                                RunActive ◀──┐
//!    │                                    │        │ next run
//!    │         on_frame_completed() × run_length   │
//!    │                                    │────────┘
//!    │ next case                          │
//!    └────────────────────────────────────┤ case complete: flush to sink
//!                                         ▼
//!                                      Finished
//! ```
//!
//! Every host-facing signal is an explicit method (`on_workload_ready`,
//! `on_frame_completed`, `on_workload_failed`, `end_benchmark`), so the
//! machine is portable to any rendering loop. All run/frame bookkeeping is
//! instance state; read-only accessors replace shared globals.

use crate::aggregator::RunAggregator;
use crate::case::{validate_suite, BenchOptions, BenchmarkCase, CaseKind, FinishAction};
use crate::error::{OrchestratorError, SinkError};
use crate::record::{CaseResult, EnvInfo};
use crate::sink::{ResultSink, SavedResult};
use log::{info, warn};

/// Conceptual run index of the unpersisted warmup pass
pub const WARMUP_RUN_INDEX: i32 = -1;

/// Where the state machine currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrchestratorState {
    /// Not started
    Idle,
    /// Waiting for the host to finish loading the current case's workload
    CaseLoading,
    /// The unpersisted warmup run is in flight
    Warmup,
    /// A measured run is in flight
    RunActive,
    /// The sequence completed or was aborted
    Finished,
}

/// Instruction to the host: load this case's workload, then signal
/// [`RunOrchestrator::on_workload_ready`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    /// Index of the case in configuration order
    pub case_index: usize,
    /// Workload reference to resolve and load
    pub workload: String,
    /// Workload kind
    pub kind: CaseKind,
}

/// Outcome of flushing a completed case to the result sink
#[derive(Debug)]
pub enum SaveStatus {
    /// Nothing to save: saving disabled, stats disabled, or simple run
    Disabled,
    /// The case was persisted
    Saved(SavedResult),
    /// The save failed; the in-memory sequence is unaffected
    Failed(SinkError),
}

/// What a frame-completion signal caused
#[derive(Debug)]
pub enum FrameOutcome {
    /// Mid-run; keep the frames coming
    Continue,
    /// A run finished and the next one (or another loop in simple-run mode)
    /// has begun
    RunCompleted {
        /// Case the run belongs to
        case_index: usize,
        /// Index of the finished run; [`WARMUP_RUN_INDEX`] for warmup
        run_index: i32,
        /// Average frame time of the finished run in milliseconds
        avg_ms: f64,
    },
    /// A case finished; the host must load the next workload
    CaseCompleted {
        /// Index of the finished case
        case_index: usize,
        /// Persistence outcome for the finished case
        save: SaveStatus,
        /// The next case to load
        next: LoadRequest,
    },
    /// The whole sequence finished
    Finished {
        /// Action the configuration requests from the host
        action: FinishAction,
        /// Persistence outcome for the final case
        save: SaveStatus,
    },
}

/// Sequences warmup and measured runs across the configured case list
pub struct RunOrchestrator<S: ResultSink> {
    cases: Vec<BenchmarkCase>,
    options: BenchOptions,
    env: EnvInfo,
    sink: S,
    aggregator: RunAggregator,
    state: OrchestratorState,
    case_index: usize,
    run_index: i32,
    run_frame: u32,
    current: Option<CaseResult>,
    completed: Vec<CaseResult>,
    aborted: bool,
}

impl<S: ResultSink> RunOrchestrator<S> {
    /// Create an orchestrator over a case list.
    ///
    /// `env` is the machine/environment template; per-case metadata is
    /// derived from it. Validation happens in [`start`](Self::start).
    pub fn new(cases: Vec<BenchmarkCase>, options: BenchOptions, env: EnvInfo, sink: S) -> Self {
        Self {
            cases,
            options,
            env,
            sink,
            aggregator: RunAggregator::new(),
            state: OrchestratorState::Idle,
            case_index: 0,
            run_index: 0,
            run_frame: 0,
            current: None,
            completed: Vec::new(),
            aborted: false,
        }
    }

    /// Validate the configuration and request the first workload load.
    ///
    /// Fails with [`OrchestratorError::Configuration`] on an empty case
    /// list, a zero run count or run length, an empty workload reference,
    /// or an out-of-range simple-run target.
    pub fn start(&mut self) -> Result<LoadRequest, OrchestratorError> {
        if self.state != OrchestratorState::Idle {
            return Err(self.unexpected("start"));
        }
        validate_suite(&self.cases, &self.options).map_err(OrchestratorError::Configuration)?;

        self.case_index = if self.options.simple_run {
            self.options.simple_run_case
        } else {
            0
        };
        self.state = OrchestratorState::CaseLoading;
        info!(
            "benchmark started: {} case(s), simple_run={}",
            self.cases.len(),
            self.options.simple_run
        );
        Ok(self.load_request(self.case_index))
    }

    /// Signal that the current case's workload is fully active.
    ///
    /// Must fire exactly once per case load. Decides warmup vs measured
    /// first run, resets the frame counter, and begins accepting frame
    /// signals.
    pub fn on_workload_ready(&mut self) -> Result<(), OrchestratorError> {
        if self.state != OrchestratorState::CaseLoading {
            return Err(self.unexpected("workload-ready"));
        }

        let case = &self.cases[self.case_index];
        let name = case.name.clone();
        let workload = case.workload.clone();
        let run_length = case.run_length;
        let warmup = case.warmup;

        self.run_index = if warmup { WARMUP_RUN_INDEX } else { 0 };
        self.run_frame = 0;

        if self.options.stats_enabled {
            self.aggregator.begin_run(run_length);
            if !self.options.simple_run {
                self.current = Some(CaseResult::new(
                    self.env.for_case(&name, &workload),
                    run_length,
                ));
            }
        }

        self.state = if self.run_index == WARMUP_RUN_INDEX {
            OrchestratorState::Warmup
        } else {
            OrchestratorState::RunActive
        };
        info!(
            "case `{name}` ready: {} run(s) of {run_length} frame(s), warmup={warmup}",
            case_runs(&self.cases, self.case_index)
        );
        Ok(())
    }

    /// Signal that the current case's workload failed to become ready.
    ///
    /// Aborts the entire sequence: downstream indexing assumes one result
    /// slot per configured case, so there is no partial-case skip.
    pub fn on_workload_failed(&mut self, reason: impl Into<String>) -> OrchestratorError {
        let (case, workload) = self
            .cases
            .get(self.case_index)
            .map(|c| (c.name.clone(), c.workload.clone()))
            .unwrap_or_else(|| ("unknown".to_string(), "unknown".to_string()));
        let reason = reason.into();
        warn!("workload `{workload}` failed for case `{case}`, aborting sequence: {reason}");

        self.current = None;
        self.aborted = true;
        self.state = OrchestratorState::Finished;
        OrchestratorError::WorkloadLoad {
            case,
            workload,
            reason,
        }
    }

    /// The sole per-frame transition, fed once per completed frame.
    ///
    /// Forwards the duration to the aggregator and, when the frame counter
    /// reaches the configured run length, finalizes the run and advances:
    /// next run, next case, or [`FrameOutcome::Finished`].
    pub fn on_frame_completed(&mut self, frame_ms: f64) -> Result<FrameOutcome, OrchestratorError> {
        if !matches!(
            self.state,
            OrchestratorState::Warmup | OrchestratorState::RunActive
        ) {
            return Err(self.unexpected("frame-completed"));
        }

        if self.options.stats_enabled {
            if let Err(overflow) = self.aggregator.record_frame(frame_ms) {
                // Host clock desync; the sample is dropped but reported.
                warn!("dropped overflow frame for case {}: {overflow}", self.case_index);
                return Err(overflow.into());
            }
        }

        self.run_frame += 1;
        let case = &self.cases[self.case_index];
        if self.run_frame < case.run_length {
            return Ok(FrameOutcome::Continue);
        }

        let name = case.name.clone();
        let runs = case.runs;
        let run_length = case.run_length;
        let finished_run = self.run_index;

        let mut avg_ms = 0.0;
        if self.options.stats_enabled {
            let record = self.aggregator.end_run();
            avg_ms = record.avg_ms;
            let label = if finished_run == WARMUP_RUN_INDEX {
                "warmup".to_string()
            } else {
                format!("run {}", finished_run + 1)
            };
            info!(
                "{name} {label}: {:.2}s total, avg {:.2}ms, min {:.2}ms @{}, max {:.2}ms @{}",
                record.run_time_secs,
                record.avg_ms,
                record.min_frame.ms,
                record.min_frame.frame_index,
                record.max_frame.ms,
                record.max_frame.frame_index
            );
            if finished_run >= 0 && !self.options.simple_run {
                if let Some(current) = self.current.as_mut() {
                    current.push_run(record);
                }
            }
        }

        self.run_index += 1;
        if self.run_index < runs as i32 || self.options.simple_run {
            self.run_frame = 0;
            if self.options.stats_enabled {
                self.aggregator.begin_run(run_length);
            }
            self.state = OrchestratorState::RunActive;
            Ok(FrameOutcome::RunCompleted {
                case_index: self.case_index,
                run_index: finished_run,
                avg_ms,
            })
        } else {
            Ok(self.finalize_case())
        }
    }

    /// Force-advance past the current case.
    ///
    /// A partially measured run is discarded; fully completed runs are kept
    /// and flushed. This is also the only way out of a simple-run loop.
    pub fn end_benchmark(&mut self) -> Result<FrameOutcome, OrchestratorError> {
        match self.state {
            OrchestratorState::CaseLoading => Ok(self.finalize_case()),
            OrchestratorState::Warmup | OrchestratorState::RunActive => {
                if self.options.stats_enabled {
                    self.aggregator.abandon_run();
                }
                Ok(self.finalize_case())
            }
            OrchestratorState::Idle | OrchestratorState::Finished => {
                Err(self.unexpected("end-benchmark"))
            }
        }
    }

    /// Flush the current case and advance to the next one or finish.
    fn finalize_case(&mut self) -> FrameOutcome {
        let finished_index = self.case_index;
        let result = self.current.take();

        let save = match &result {
            Some(result) if self.options.save_results => match self.sink.save(result) {
                Ok(saved) => {
                    info!(
                        "saved `{}` to {}",
                        result.env.benchmark_name,
                        saved.path.display()
                    );
                    SaveStatus::Saved(saved)
                }
                Err(err) => {
                    warn!("failed to save `{}`: {err}", result.env.benchmark_name);
                    SaveStatus::Failed(err)
                }
            },
            _ => SaveStatus::Disabled,
        };

        if let Some(result) = result {
            self.completed.push(result);
        }

        if self.options.simple_run {
            self.state = OrchestratorState::Finished;
            return FrameOutcome::Finished {
                action: self.options.finish_action,
                save,
            };
        }

        self.case_index += 1;
        if self.case_index < self.cases.len() {
            self.state = OrchestratorState::CaseLoading;
            FrameOutcome::CaseCompleted {
                case_index: finished_index,
                save,
                next: self.load_request(self.case_index),
            }
        } else {
            self.state = OrchestratorState::Finished;
            info!(
                "benchmark finished: {} case(s) completed",
                self.completed.len()
            );
            FrameOutcome::Finished {
                action: self.options.finish_action,
                save,
            }
        }
    }

    fn load_request(&self, case_index: usize) -> LoadRequest {
        let case = &self.cases[case_index];
        LoadRequest {
            case_index,
            workload: case.workload.clone(),
            kind: case.kind,
        }
    }

    fn unexpected(&self, signal: &'static str) -> OrchestratorError {
        OrchestratorError::UnexpectedSignal {
            signal,
            state: format!("{:?}", self.state),
        }
    }

    /// Current state
    pub fn state(&self) -> OrchestratorState {
        self.state
    }

    /// Whether the sequence was aborted by a workload failure
    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    /// The case currently loading or running
    pub fn current_case(&self) -> Option<&BenchmarkCase> {
        match self.state {
            OrchestratorState::Idle | OrchestratorState::Finished => None,
            _ => self.cases.get(self.case_index),
        }
    }

    /// Index of the current case in configuration order
    pub fn case_index(&self) -> usize {
        self.case_index
    }

    /// Index of the current run; [`WARMUP_RUN_INDEX`] during warmup
    pub fn run_index(&self) -> i32 {
        self.run_index
    }

    /// 0-based frame offset within the current run
    pub fn run_frame(&self) -> u32 {
        self.run_frame
    }

    /// Rolling average frame time for live display, in milliseconds
    pub fn live_average(&self) -> f64 {
        self.aggregator.live_average()
    }

    /// Finalized case results collected so far, in configuration order
    pub fn results(&self) -> &[CaseResult] {
        &self.completed
    }

    /// Consume the orchestrator, yielding results and the sink
    pub fn into_parts(self) -> (Vec<CaseResult>, S) {
        (self.completed, self.sink)
    }

    /// Read access to the result sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the result sink
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

fn case_runs(cases: &[BenchmarkCase], index: usize) -> u32 {
    cases.get(index).map(|c| c.runs).unwrap_or(0)
}
