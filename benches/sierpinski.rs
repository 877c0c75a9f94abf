use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use arcent::animation::{AnimationState, PlaybackSettings};
use arcent::config::ArcentConfig;
use arcent::scene::{SceneGraph, SceneMutator};
use arcent::traits::GeometryProvider;
use arcent::{FrameDriver, SierpinskiGenerator};

/// Benchmark: mesh generation across the subdivision levels
fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("sierpinski_generate");
    let generator = SierpinskiGenerator::default();

    for time in [0.0, 1.5, 2.5, 3.5, 4.5, 5.0].iter() {
        group.bench_with_input(BenchmarkId::new("t", time), time, |b, &time| {
            b.iter(|| black_box(generator.generate(black_box(time))))
        });
    }

    group.finish();
}

/// Benchmark: one controller step (no geometry)
fn bench_tick(c: &mut Criterion) {
    let mut state = AnimationState::new(PlaybackSettings::default());

    c.bench_function("animation_tick", |b| b.iter(|| black_box(state.tick())));
}

/// Benchmark: clear + regenerate + install at the deepest level
fn bench_set_time(c: &mut Criterion) {
    let mut mutator = SceneMutator::new(SierpinskiGenerator::default());
    let mut graph = SceneGraph::new();

    c.bench_function("scene_set_time_deepest", |b| {
        b.iter(|| black_box(mutator.set_time(black_box(4.75), &mut graph).is_ok()))
    });
}

/// Benchmark: a full second of frames at the default speed
fn bench_driver_second(c: &mut Criterion) {
    let config = ArcentConfig::default();

    c.bench_function("driver_60_frames", |b| {
        b.iter(|| {
            let mut driver = FrameDriver::new(SierpinskiGenerator::default(), &config);
            for _ in 0..60 {
                black_box(driver.update(1.0 / 60.0).is_ok());
            }
        })
    });
}

criterion_group!(benches, bench_generate, bench_tick, bench_set_time, bench_driver_second);

criterion_main!(benches);
