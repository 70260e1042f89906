//! End-to-end suite behavior: failure isolation, hook discipline, ordering,
//! and real-clock stability.

mod common;

use std::cell::Cell;
use std::hint::black_box;
use std::rc::Rc;

use common::{CallCounter, VirtualClock};
use microbench::{
    benchmark, single_shot, Benchmark, Config, EnvironmentTag, FailureKind, Runner,
};

/// CPU-bound deterministic workload with enough substance to clear any
/// realistic clock resolution.
fn spin_workload() -> u64 {
    let mut acc = 1u64;
    for i in 0..20_000u64 {
        acc = acc.wrapping_mul(31).wrapping_add(black_box(i));
    }
    acc
}

#[test]
fn failing_target_does_not_abort_siblings() {
    let clock = VirtualClock::new(20.0);
    let counter = CallCounter::new();

    let first = {
        let (h, c) = (clock.handle(), counter.clone());
        Benchmark::new("first", move || {
            c.bump();
            h.advance(1_000);
        })
    };
    let second = Benchmark::fallible("second", || -> Result<(), _> {
        Err("simulated defect".into())
    });
    let third = {
        let (h, c) = (clock.handle(), counter.clone());
        Benchmark::new("third", move || {
            c.bump();
            h.advance(2_000);
        })
    };

    let mut runner = Runner::with_clock(Config::default(), clock)
        .unwrap()
        .environment(EnvironmentTag::custom("virtual"));
    runner.register(first).unwrap();
    runner.register(second).unwrap();
    runner.register(third).unwrap();

    let report = runner.run();

    // Three slots, registration order, no panic, no omission.
    assert_eq!(report.results.len(), 3);
    assert_eq!(report.results[0].name, "first");
    assert_eq!(report.results[1].name, "second");
    assert_eq!(report.results[2].name, "third");

    assert!(report.results[0].is_success());
    assert!(!report.results[1].is_success());
    assert!(report.results[2].is_success());
    assert!(!report.all_passed());

    let failure = report.results[1].failure.as_ref().unwrap();
    assert_eq!(failure.kind, FailureKind::Calibration);
    assert!(failure.message.contains("simulated defect"));

    assert_eq!(report.results[0].summary.as_ref().unwrap().mean_ns, 1_000.0);
    assert_eq!(report.results[2].summary.as_ref().unwrap().mean_ns, 2_000.0);
}

#[test]
fn hooks_run_once_per_measurement_and_survive_failure() {
    let clock = VirtualClock::new(20.0);
    let setups = Rc::new(Cell::new(0u32));
    let teardowns = Rc::new(Cell::new(0u32));

    let bench = {
        let h = clock.handle();
        let (s, t) = (Rc::clone(&setups), Rc::clone(&teardowns));
        Benchmark::new("hooked", move || h.advance(1_000))
            .with_setup(move || {
                s.set(s.get() + 1);
                Ok(())
            })
            .with_teardown(move || {
                t.set(t.get() + 1);
                Ok(())
            })
    };

    let failing = {
        let (s, t) = (Rc::clone(&setups), Rc::clone(&teardowns));
        Benchmark::fallible("hooked_failing", || -> Result<(), _> { Err("bad".into()) })
            .with_setup(move || {
                s.set(s.get() + 1);
                Ok(())
            })
            .with_teardown(move || {
                t.set(t.get() + 1);
                Ok(())
            })
    };

    let mut runner = Runner::with_clock(Config::default(), clock)
        .unwrap()
        .environment(EnvironmentTag::custom("virtual"));
    runner.register(bench).unwrap();
    runner.register(failing).unwrap();

    let report = runner.run();
    assert!(report.results[0].is_success());
    assert!(!report.results[1].is_success());

    // Once per target, regardless of rounds, and teardown still runs after a
    // measurement failure.
    assert_eq!(setups.get(), 2);
    assert_eq!(teardowns.get(), 2);
}

#[test]
fn setup_failure_is_recorded_and_skips_teardown() {
    let teardowns = Rc::new(Cell::new(0u32));
    let bench = {
        let t = Rc::clone(&teardowns);
        Benchmark::new("broken_setup", || ())
            .with_setup(|| Err("fixture missing".into()))
            .with_teardown(move || {
                t.set(t.get() + 1);
                Ok(())
            })
    };

    let mut runner = Runner::with_clock(Config::default(), VirtualClock::new(20.0))
        .unwrap()
        .environment(EnvironmentTag::custom("virtual"));
    runner.register(bench).unwrap();

    let report = runner.run();
    let failure = report.results[0].failure.as_ref().unwrap();
    assert_eq!(failure.kind, FailureKind::Setup);
    assert!(failure.message.contains("fixture missing"));
    assert_eq!(teardowns.get(), 0);
}

#[test]
fn teardown_failure_marks_target_failed() {
    let clock = VirtualClock::new(20.0);
    let bench = {
        let h = clock.handle();
        Benchmark::new("leaky", move || h.advance(1_000))
            .with_teardown(|| Err("resource leak detected".into()))
    };

    let mut runner = Runner::with_clock(Config::default(), clock)
        .unwrap()
        .environment(EnvironmentTag::custom("virtual"));
    runner.register(bench).unwrap();

    let report = runner.run();
    let result = &report.results[0];
    assert!(!result.is_success());
    assert_eq!(result.failure.as_ref().unwrap().kind, FailureKind::Teardown);
}

#[test]
fn environment_tag_is_shared_across_results() {
    let clock = VirtualClock::new(20.0);
    let tag = EnvironmentTag::custom("shared-tag");
    let handles = [clock.handle(), clock.handle()];

    let mut runner = Runner::with_clock(Config::default(), clock)
        .unwrap()
        .environment(tag.clone());
    for (name, h) in ["a", "b"].into_iter().zip(handles) {
        runner
            .register(Benchmark::new(name, move || h.advance(1_000)))
            .unwrap();
    }

    let report = runner.run();
    assert_eq!(report.results.len(), 2);
    for result in &report.results {
        assert!(result.is_success());
        assert_eq!(result.environment, tag);
    }
}

#[test]
fn real_clock_single_target() {
    let result = benchmark("spin", spin_workload).expect("clock must be available");
    assert!(result.is_success(), "failure: {:?}", result.failure);

    let summary = result.summary.unwrap();
    assert_eq!(summary.samples, 5);
    assert!(summary.mean_ns > 0.0);
    assert!(summary.min_ns <= summary.mean_ns);
    assert!(summary.mean_ns <= summary.max_ns);
    assert!(summary.ops_per_sec > 0.0);
}

#[test]
fn real_clock_idempotence_within_tolerance() {
    // Same deterministic workload, identical configuration: means should
    // agree within 50%, a flakiness bound rather than exact equality.
    let run = || {
        microbench::benchmark_with_config(Config::quick(), "spin", spin_workload)
            .unwrap()
            .summary
            .unwrap()
            .mean_ns
    };
    let first = run();
    let second = run();
    assert!(
        (first - second).abs() <= 0.5 * first.max(second),
        "means diverged: {first} vs {second}"
    );
}

#[test]
fn real_clock_data_dependent_target() {
    use rand::Rng;

    let mut rng = rand::rng();
    let data: Vec<u64> = (0..4_096).map(|_| rng.random_range(0..u64::MAX)).collect();
    let result = microbench::benchmark_with_config(Config::quick(), "sum_random", move || {
        data.iter().copied().fold(0u64, u64::wrapping_add)
    })
    .expect("clock must be available");
    assert!(result.is_success(), "failure: {:?}", result.failure);
    assert!(result.summary.unwrap().mean_ns > 0.0);
}

#[test]
fn single_shot_yields_one_cold_sample() {
    let result = single_shot("cold_spin", spin_workload).unwrap();
    let summary = result.summary.unwrap();
    assert_eq!(summary.samples, 1);
    assert_eq!(summary.stddev_ns, 0.0);
    assert_eq!(summary.mean_ns, summary.median_ns);
    assert_eq!(summary.mean_ns, summary.min_ns);
}

#[test]
fn report_serializes_with_failures() {
    let clock = VirtualClock::new(20.0);
    let ok = {
        let h = clock.handle();
        Benchmark::new("ok", move || h.advance(1_000))
    };
    let bad = Benchmark::fallible("bad", || -> Result<(), _> { Err("nope".into()) });

    let mut runner = Runner::with_clock(Config::default(), clock)
        .unwrap()
        .environment(EnvironmentTag::custom("serialize-test"));
    runner.register(ok).unwrap();
    runner.register(bad).unwrap();

    let report = runner.run();
    let json = microbench::output::json::to_json_pretty(&report).unwrap();
    assert!(json.contains("\"ok\""));
    assert!(json.contains("\"bad\""));
    assert!(json.contains("nope"));

    let text = microbench::output::terminal::render(&report);
    assert!(text.contains("ok"));
    assert!(text.contains("FAILED"));

    let md = microbench::output::markdown::to_markdown(&report);
    assert!(md.contains("| ok |"));
}
