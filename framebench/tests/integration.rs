//! Integration tests for framebench
//!
//! These tests drive the full pipeline: orchestrator state machine,
//! per-frame aggregation, and file-backed persistence.

use framebench::prelude::*;
use framebench::{CaseResult, EnvInfo, FrameMark, ResultSink, RunRecord};
use tempfile::TempDir;

fn case(name: &str, runs: u32, run_length: u32, warmup: bool) -> BenchmarkCase {
    BenchmarkCase {
        name: name.to_string(),
        workload: format!("scenes/{name}"),
        kind: CaseKind::Scene,
        runs,
        run_length,
        warmup,
    }
}

/// Feed `frames` frame signals, with frame `f` taking `base + f` ms.
fn drive_run(bench: &mut RunOrchestrator<ResultStore>, frames: u32, base: f64) -> FrameOutcome {
    let mut last = FrameOutcome::Continue;
    for f in 0..frames {
        last = bench.on_frame_completed(base + f as f64).unwrap();
    }
    last
}

/// The spec's end-to-end scenario: 2 cases, 3 runs of 10 frames each,
/// warmup enabled. Both cases persist exactly 3 records of 10 samples.
#[test]
fn test_two_case_suite_end_to_end() {
    let dir = TempDir::new().unwrap();
    let store = ResultStore::new(dir.path()).unwrap();
    let cases = vec![case("island", 3, 10, true), case("harbor", 3, 10, true)];

    let mut bench = RunOrchestrator::new(
        cases,
        BenchOptions::default(),
        EnvInfo::new("suite", "none"),
        store,
    );

    let first = bench.start().unwrap();
    assert_eq!(first.workload, "scenes/island");

    bench.on_workload_ready().unwrap();
    assert_eq!(bench.state(), OrchestratorState::Warmup);

    // Warmup (discarded) + runs 0,1 of case 0.
    for _ in 0..3 {
        assert!(matches!(
            drive_run(&mut bench, 10, 10.0),
            FrameOutcome::RunCompleted { .. }
        ));
    }
    // Final run hands over to case 1.
    match drive_run(&mut bench, 10, 10.0) {
        FrameOutcome::CaseCompleted { save, next, .. } => {
            assert!(matches!(save, SaveStatus::Saved(_)));
            assert_eq!(next.workload, "scenes/harbor");
        }
        other => panic!("expected CaseCompleted, got {other:?}"),
    }

    bench.on_workload_ready().unwrap();
    for _ in 0..3 {
        drive_run(&mut bench, 10, 20.0);
    }
    match drive_run(&mut bench, 10, 20.0) {
        FrameOutcome::Finished { action, save } => {
            assert_eq!(action, FinishAction::Nothing);
            assert!(matches!(save, SaveStatus::Saved(_)));
        }
        other => panic!("expected Finished, got {other:?}"),
    }
    assert_eq!(bench.state(), OrchestratorState::Finished);

    // Fresh store sees both files with warmup excluded.
    let mut fresh = ResultStore::new(dir.path()).unwrap();
    let sets = fresh.load_all().unwrap();
    assert_eq!(sets.len(), 2);
    for set in sets {
        assert_eq!(set.records.len(), 3);
        for record in &set.records {
            assert_eq!(record.raw_samples.len(), 10);
            // min/max bracket every sample; average is the mean.
            let mean: f64 =
                record.raw_samples.iter().sum::<f64>() / record.raw_samples.len() as f64;
            assert!((record.avg_ms - mean).abs() < 1e-9);
            for &sample in &record.raw_samples {
                assert!(record.min_frame.ms <= sample && sample <= record.max_frame.ms);
            }
        }
    }

    let island = sets.iter().find(|s| s.file_name == "island.txt").unwrap();
    let env = island.env.as_ref().unwrap();
    assert_eq!(env.benchmark_name, "island");
    assert_eq!(env.workload, "scenes/island");
    // Frame f took 10 + f ms, so min is frame 0 and max frame 9.
    assert_eq!(island.records[0].min_frame, FrameMark::new(0, 10.0));
    assert_eq!(island.records[0].max_frame, FrameMark::new(9, 19.0));
    assert!((island.records[0].avg_ms - 14.5).abs() < 1e-9);
}

/// Round-trip equality across a spread of run/frame shapes.
#[test]
fn test_round_trip_various_shapes() {
    let dir = TempDir::new().unwrap();

    for (runs, frames) in [(1u32, 1u32), (5, 100), (50, 10), (2, 10_000)] {
        let name = format!("shape-{runs}x{frames}");
        let mut result = CaseResult::new(EnvInfo::new(&name, "scenes/shape"), frames);
        for run in 0..runs {
            let samples: Vec<f64> = (0..frames)
                .map(|f| 5.0 + (run * frames + f) as f64 * 0.25)
                .collect();
            let mean = samples.iter().sum::<f64>() / samples.len() as f64;
            result.runs.push(RunRecord {
                run_time_secs: samples.iter().sum::<f64>() / 1000.0,
                avg_ms: mean,
                min_frame: FrameMark::new(0, samples[0]),
                max_frame: FrameMark::new(frames as i32 - 1, samples[frames as usize - 1]),
                raw_samples: samples,
            });
        }

        let mut store = ResultStore::new(dir.path()).unwrap();
        store.save(&result).unwrap();

        let mut fresh = ResultStore::new(dir.path()).unwrap();
        let sets = fresh.load_all().unwrap();
        let set = sets
            .iter()
            .find(|s| s.file_name == format!("{name}.txt"))
            .unwrap();
        assert_eq!(set.records, result.runs);
    }
}

/// `load_all` twice without a reload returns the same cached sequence even
/// when files appear on disk in between.
#[test]
fn test_load_all_idempotent_without_reload() {
    let dir = TempDir::new().unwrap();
    let mut writer = ResultStore::new(dir.path()).unwrap();
    let mut result = CaseResult::new(EnvInfo::new("seed", "scenes/seed"), 2);
    result.runs.push(RunRecord {
        run_time_secs: 0.02,
        avg_ms: 10.0,
        min_frame: FrameMark::new(0, 10.0),
        max_frame: FrameMark::new(1, 10.0),
        raw_samples: vec![10.0, 10.0],
    });
    writer.save(&result).unwrap();

    let mut reader = ResultStore::new(dir.path()).unwrap();
    assert_eq!(reader.load_all().unwrap().len(), 1);

    // Another writer adds a second file; the cached view is unchanged.
    let mut late = result.clone();
    late.env.benchmark_name = "late".to_string();
    writer.save(&late).unwrap();
    assert_eq!(reader.load_all().unwrap().len(), 1);

    assert_eq!(reader.reload().unwrap().len(), 2);
}

/// Saving is wired through the `ResultSink` seam the orchestrator uses.
#[test]
fn test_store_acts_as_result_sink() {
    let dir = TempDir::new().unwrap();
    let mut store = ResultStore::new(dir.path()).unwrap();

    let mut result = CaseResult::new(EnvInfo::new("seam", "scenes/seam"), 1);
    result.runs.push(RunRecord {
        run_time_secs: 0.01,
        avg_ms: 10.0,
        min_frame: FrameMark::new(0, 10.0),
        max_frame: FrameMark::new(0, 10.0),
        raw_samples: vec![10.0],
    });

    let saved = ResultSink::save(&mut store, &result).unwrap();
    assert!(saved.path.ends_with("seam.txt"));
    assert!(saved.path.exists());
}

/// A suite loaded from TOML drives the orchestrator unchanged.
#[test]
fn test_toml_suite_drives_orchestrator() {
    let dir = TempDir::new().unwrap();
    let config = SuiteConfig::parse(
        r#"
        [options]
        finish_action = "show-stats"

        [[case]]
        name = "Quick"
        workload = "scenes/quick"
        runs = 2
        run_length = 4
        warmup = false
    "#,
    )
    .unwrap();

    let store = ResultStore::new(dir.path()).unwrap();
    let mut bench = RunOrchestrator::new(
        config.cases,
        config.options,
        EnvInfo::new("suite", "none"),
        store,
    );

    bench.start().unwrap();
    bench.on_workload_ready().unwrap();
    assert_eq!(bench.state(), OrchestratorState::RunActive);

    drive_run(&mut bench, 4, 16.0);
    match drive_run(&mut bench, 4, 16.0) {
        FrameOutcome::Finished { action, .. } => assert_eq!(action, FinishAction::ShowStats),
        other => panic!("expected Finished, got {other:?}"),
    }

    let (results, mut store) = bench.into_parts();
    assert_eq!(results.len(), 1);
    assert_eq!(store.load_all().unwrap()[0].records.len(), 2);
}
