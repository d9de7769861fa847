//! Criterion benchmarks for motion-plan synthesis.
//!
//! A plan is consumed one point per cursor move, interleaved with
//! millisecond-scale sleeps, so this is only a guard against accidental
//! regressions (e.g. materialising large buffers per step).
//!
//! Run with:
//! ```bash
//! cargo bench --package jiggle-core --bench planner_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use jiggle_core::{
    plan_scroll, sample_pause, MotionPlanner, Point, ScreenBounds, Tuning,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_full_plan(c: &mut Criterion) {
    let planner = MotionPlanner::new(Tuning::default().motion);
    let mut group = c.benchmark_group("motion_plan");

    for (w, h) in [(800, 600), (1920, 1080), (5120, 2880)] {
        let bounds = ScreenBounds::new(w, h);
        group.bench_with_input(
            BenchmarkId::from_parameter(bounds),
            &bounds,
            |b, &bounds| {
                let mut rng = StdRng::seed_from_u64(7);
                b.iter(|| {
                    let plan = planner.plan(&mut rng, bounds.center(), bounds);
                    black_box(plan.fold(0i64, |acc, p| acc + i64::from(p.point.x)))
                });
            },
        );
    }
    group.finish();
}

fn bench_target_selection(c: &mut Criterion) {
    let planner = MotionPlanner::new(Tuning::default().motion);
    let bounds = ScreenBounds::new(1920, 1080);
    let mut rng = StdRng::seed_from_u64(11);

    c.bench_function("pick_target", |b| {
        b.iter(|| planner.pick_target(&mut rng, black_box(Point::new(960, 540)), bounds))
    });
}

fn bench_cycle_extras(c: &mut Criterion) {
    let tuning = Tuning::default();
    let mut rng = StdRng::seed_from_u64(13);

    c.bench_function("scroll_and_pause", |b| {
        b.iter(|| {
            let bursts = plan_scroll(&mut rng, &tuning.scroll);
            let pause = sample_pause(&mut rng, &tuning.pause);
            black_box((bursts.len(), pause))
        })
    });
}

criterion_group!(
    benches,
    bench_full_plan,
    bench_target_selection,
    bench_cycle_extras
);
criterion_main!(benches);
