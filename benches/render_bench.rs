//! Benchmarks for flame simulation and GPU rendering.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use trina_flame::{FlameConfig, FlameEngine, FlameParticles, FlameRng};

fn bench_simulation_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("Simulation");

    for count in [1000usize, 10_000, 100_000] {
        let mut rng = FlameRng::new(1);
        let mut particles = FlameParticles::new(count, &mut rng);
        group.bench_with_input(BenchmarkId::new("step", count), &count, |b, _| {
            let mut frame = 0u64;
            b.iter(|| {
                frame += 1;
                particles.step(black_box(frame as f64 / 60.0));
            });
        });
    }

    group.finish();
}

fn bench_render_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("GPU Rendering");

    let mut engine = match FlameEngine::new(FlameConfig::default()) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Skipping GPU benchmarks: {}", e);
            return;
        }
    };
    if let Err(e) = pollster::block_on(engine.start()) {
        eprintln!("Skipping GPU benchmarks: {}", e);
        return;
    }

    let mut frame = 0u64;
    group.bench_function("render_frame_800x500", |b| {
        b.iter(|| {
            frame += 1;
            black_box(engine.render_frame(frame as f64 / 60.0).unwrap());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_simulation_step, bench_render_frame);
criterion_main!(benches);
