//! Criterion benchmarks for the HashLife engine.
//!
//! Run with:
//!   cargo bench --bench hashlife

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use lifecore::{LifeUniverse, Variant};

/// A 3x3-spaced grid of blinkers, regular enough for HashLife's memoized
/// step to pay off immediately.
fn seed_blinker_field(universe: &mut LifeUniverse, extent: i64) {
    let mut x = -extent;
    while x <= extent {
        let mut y = -extent;
        while y <= extent {
            universe.set(x - 1, y, true);
            universe.set(x, y, true);
            universe.set(x + 1, y, true);
            y += 6;
        }
        x += 6;
    }
}

fn bench_single_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("hashlife_single_step");
    for &extent in &[30i64, 90, 180] {
        group.bench_with_input(BenchmarkId::new("blinker_field", extent), &extent, |b, &extent| {
            b.iter_batched(
                || {
                    let mut universe = LifeUniverse::new(Variant::HashLife);
                    seed_blinker_field(&mut universe, extent);
                    universe
                },
                |mut universe| universe.step(),
                criterion::BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_bulk_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("hashlife_bulk_step");
    for &speed in &[0u8, 4, 8] {
        group.bench_with_input(BenchmarkId::new("blinker_field", speed), &speed, |b, &speed| {
            b.iter_batched(
                || {
                    let mut universe = LifeUniverse::new(Variant::HashLife);
                    seed_blinker_field(&mut universe, 60);
                    universe
                },
                |mut universe| universe.step_speed(speed),
                criterion::BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_single_step, bench_bulk_step);
criterion_main!(benches);
