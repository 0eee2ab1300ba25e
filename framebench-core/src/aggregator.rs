//! Per-Frame Statistics Aggregation
//!
//! [`RunAggregator`] turns the stream of frame durations for one run into a
//! frozen [`RunRecord`]. A separate [`FrameSampleBuffer`] keeps a rolling
//! window of recent samples for live on-screen smoothing; it never affects
//! the finalized statistics and is not persisted.

use crate::error::OverflowError;
use crate::record::{FrameMark, RunRecord};
use std::collections::VecDeque;

/// Window size for the live smoothing view
pub const LIVE_WINDOW: usize = 60;

/// Rolling buffer of the most recent frame durations
#[derive(Debug, Clone)]
pub struct FrameSampleBuffer {
    samples: VecDeque<f64>,
    capacity: usize,
}

impl FrameSampleBuffer {
    /// Create a buffer holding at most `capacity` samples
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    /// Push a sample, evicting the oldest once the window is full
    pub fn push(&mut self, ms: f64) {
        if self.samples.len() == self.capacity {
            self.samples.pop_back();
        }
        self.samples.push_front(ms);
    }

    /// Average over the current window, or 0.0 when empty
    pub fn average(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f64>() / self.samples.len() as f64
    }

    /// Number of samples currently held
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the window is empty
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Drop all samples
    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

impl Default for FrameSampleBuffer {
    fn default() -> Self {
        Self::new(LIVE_WINDOW)
    }
}

/// Accumulates one run's frame samples into min/max/average statistics
///
/// Lifecycle: [`begin_run`](Self::begin_run), then exactly `frame_count`
/// calls to [`record_frame`](Self::record_frame), then
/// [`end_run`](Self::end_run). Trackers reset between runs; the live buffer
/// persists across runs so the on-screen average stays smooth.
#[derive(Debug)]
pub struct RunAggregator {
    raw_samples: Vec<f64>,
    cursor: usize,
    min_frame: FrameMark,
    max_frame: FrameMark,
    elapsed_ms: f64,
    live: FrameSampleBuffer,
}

impl RunAggregator {
    /// Create an aggregator with no active run
    pub fn new() -> Self {
        Self {
            raw_samples: Vec::new(),
            cursor: 0,
            min_frame: FrameMark::default_min(),
            max_frame: FrameMark::default_max(),
            elapsed_ms: 0.0,
            live: FrameSampleBuffer::default(),
        }
    }

    /// Start a run of exactly `frame_count` frames
    pub fn begin_run(&mut self, frame_count: u32) {
        self.raw_samples.clear();
        self.raw_samples.resize(frame_count as usize, 0.0);
        self.cursor = 0;
        self.min_frame = FrameMark::default_min();
        self.max_frame = FrameMark::default_max();
        self.elapsed_ms = 0.0;
    }

    /// Record one frame's duration in milliseconds.
    ///
    /// Min/max use strict comparison, so a tie keeps the earliest frame.
    /// A call beyond the configured frame count drops the sample and
    /// returns [`OverflowError`]; the run can still be finalized.
    pub fn record_frame(&mut self, ms: f64) -> Result<(), OverflowError> {
        self.live.push(ms);

        if self.cursor >= self.raw_samples.len() {
            return Err(OverflowError {
                frame_index: self.cursor as u32,
                run_length: self.raw_samples.len() as u32,
            });
        }

        let frame_index = self.cursor as i32;
        self.raw_samples[self.cursor] = ms;
        self.cursor += 1;
        self.elapsed_ms += ms;

        if ms < self.min_frame.ms {
            self.min_frame = FrameMark::new(frame_index, ms);
        }
        if ms > self.max_frame.ms {
            self.max_frame = FrameMark::new(frame_index, ms);
        }
        Ok(())
    }

    /// Freeze the current run into a [`RunRecord`] and reset the trackers.
    ///
    /// The record keeps only the frames actually recorded, so a run ended
    /// at its configured length carries exactly `frame_count` samples.
    pub fn end_run(&mut self) -> RunRecord {
        self.raw_samples.truncate(self.cursor);
        let raw_samples = std::mem::take(&mut self.raw_samples);

        let avg_ms = if raw_samples.is_empty() {
            0.0
        } else {
            raw_samples.iter().sum::<f64>() / raw_samples.len() as f64
        };

        let record = RunRecord {
            run_time_secs: self.elapsed_ms / 1000.0,
            avg_ms,
            min_frame: self.min_frame,
            max_frame: self.max_frame,
            raw_samples,
        };

        self.reset_trackers();
        record
    }

    /// Discard the current run without producing a record
    pub fn abandon_run(&mut self) {
        self.raw_samples = Vec::new();
        self.reset_trackers();
    }

    fn reset_trackers(&mut self) {
        self.cursor = 0;
        self.min_frame = FrameMark::default_min();
        self.max_frame = FrameMark::default_max();
        self.elapsed_ms = 0.0;
    }

    /// Frames recorded in the current run
    pub fn frames_recorded(&self) -> u32 {
        self.cursor as u32
    }

    /// Rolling average over the live window, in milliseconds
    pub fn live_average(&self) -> f64 {
        self.live.average()
    }

    /// Fastest frame seen so far in the current run
    pub fn current_min(&self) -> FrameMark {
        self.min_frame
    }

    /// Slowest frame seen so far in the current run
    pub fn current_max(&self) -> FrameMark {
        self.max_frame
    }
}

impl Default for RunAggregator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_of(samples: &[f64]) -> RunRecord {
        let mut agg = RunAggregator::new();
        agg.begin_run(samples.len() as u32);
        for &ms in samples {
            agg.record_frame(ms).unwrap();
        }
        agg.end_run()
    }

    #[test]
    fn test_basic_statistics() {
        let record = run_of(&[10.0, 20.0, 30.0, 40.0]);
        assert!((record.avg_ms - 25.0).abs() < 1e-9);
        assert_eq!(record.min_frame.ms, 10.0);
        assert_eq!(record.min_frame.frame_index, 0);
        assert_eq!(record.max_frame.ms, 40.0);
        assert_eq!(record.max_frame.frame_index, 3);
        assert!((record.run_time_secs - 0.1).abs() < 1e-9);
        assert_eq!(record.raw_samples.len(), 4);
    }

    #[test]
    fn test_min_max_bound_every_sample() {
        let record = run_of(&[16.7, 14.2, 33.1, 15.0, 16.9, 12.8, 19.4]);
        for &sample in &record.raw_samples {
            assert!(record.min_frame.ms <= sample);
            assert!(record.max_frame.ms >= sample);
        }
    }

    #[test]
    fn test_ties_keep_earliest_frame() {
        let record = run_of(&[20.0, 10.0, 10.0, 30.0, 30.0]);
        assert_eq!(record.min_frame.frame_index, 1);
        assert_eq!(record.max_frame.frame_index, 3);
    }

    #[test]
    fn test_exact_count_never_overflows() {
        let mut agg = RunAggregator::new();
        agg.begin_run(100);
        for i in 0..100 {
            agg.record_frame(10.0 + i as f64).unwrap();
        }
        let record = agg.end_run();
        assert_eq!(record.raw_samples.len(), 100);
    }

    #[test]
    fn test_extra_frame_overflows_but_run_finalizes() {
        let mut agg = RunAggregator::new();
        agg.begin_run(3);
        for _ in 0..3 {
            agg.record_frame(10.0).unwrap();
        }
        let err = agg.record_frame(99.0).unwrap_err();
        assert_eq!(err.frame_index, 3);
        assert_eq!(err.run_length, 3);

        // The overflowed sample was dropped, not appended.
        let record = agg.end_run();
        assert_eq!(record.raw_samples.len(), 3);
        assert_eq!(record.max_frame.ms, 10.0);
    }

    #[test]
    fn test_boundary_durations_recorded_verbatim() {
        let record = run_of(&[0.0, 16.7, 5000.0]);
        assert_eq!(record.raw_samples[0], 0.0);
        assert_eq!(record.raw_samples[2], 5000.0);
        assert_eq!(record.min_frame.ms, 0.0);
        assert_eq!(record.min_frame.frame_index, 0);
        assert_eq!(record.max_frame.ms, 5000.0);
        assert_eq!(record.max_frame.frame_index, 2);
    }

    #[test]
    fn test_trackers_reset_between_runs() {
        let mut agg = RunAggregator::new();
        agg.begin_run(2);
        agg.record_frame(5.0).unwrap();
        agg.record_frame(50.0).unwrap();
        let first = agg.end_run();
        assert_eq!(first.max_frame.ms, 50.0);

        agg.begin_run(2);
        agg.record_frame(10.0).unwrap();
        agg.record_frame(20.0).unwrap();
        let second = agg.end_run();
        assert_eq!(second.min_frame.ms, 10.0);
        assert_eq!(second.max_frame.ms, 20.0);
        assert_eq!(second.min_frame.frame_index, 0);
    }

    #[test]
    fn test_live_window_caps_at_capacity() {
        let mut buffer = FrameSampleBuffer::new(60);
        for i in 0..200 {
            buffer.push(i as f64);
        }
        assert_eq!(buffer.len(), 60);
        // Window holds samples 140..200, average 169.5
        assert!((buffer.average() - 169.5).abs() < 1e-9);
    }

    #[test]
    fn test_live_view_survives_run_boundaries() {
        let mut agg = RunAggregator::new();
        agg.begin_run(2);
        agg.record_frame(10.0).unwrap();
        agg.record_frame(10.0).unwrap();
        agg.end_run();
        agg.begin_run(2);
        agg.record_frame(40.0).unwrap();
        assert!((agg.live_average() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_live_view_does_not_affect_record() {
        let mut agg = RunAggregator::new();
        // Prime the live window with large values from a previous run.
        agg.begin_run(2);
        agg.record_frame(1000.0).unwrap();
        agg.record_frame(1000.0).unwrap();
        agg.end_run();

        agg.begin_run(2);
        agg.record_frame(1.0).unwrap();
        agg.record_frame(3.0).unwrap();
        let record = agg.end_run();
        assert!((record.avg_ms - 2.0).abs() < 1e-9);
        assert_eq!(record.max_frame.ms, 3.0);
    }
}
