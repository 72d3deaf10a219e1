//! Benchmarks for irradiance interpolation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use terrasun_algorithms::interpolation::{
    cubic_interpolation, interpolate_irradiance, nearest_neighbor, SamplePoint,
};
use terrasun_core::IrradianceSample;

fn create_samples(n: usize) -> Vec<SamplePoint> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..n)
        .map(|_| {
            let x = rng.gen_range(-71.0..-70.0);
            let y = rng.gen_range(-26.0..-25.0);
            SamplePoint::new(x, y, 800.0 + 200.0 * rng.gen::<f64>())
        })
        .collect()
}

/// Full 100 x 100 lattice over the sample area
fn create_targets() -> Vec<(f64, f64)> {
    (0..100)
        .flat_map(|i| (0..100).map(move |j| (-71.0 + i as f64 / 99.0, -26.0 + j as f64 / 99.0)))
        .collect()
}

fn bench_cubic(c: &mut Criterion) {
    let mut group = c.benchmark_group("cubic");
    let targets = create_targets();

    for n in [50, 200, 1000].iter() {
        let samples = create_samples(*n);
        group.bench_with_input(BenchmarkId::from_parameter(n), n, |b, _| {
            b.iter(|| cubic_interpolation(black_box(&samples), &targets).unwrap())
        });
    }

    group.finish();
}

fn bench_nearest(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearest");
    let targets = create_targets();

    for n in [50, 200, 1000].iter() {
        let samples = create_samples(*n);
        group.bench_with_input(BenchmarkId::from_parameter(n), n, |b, _| {
            b.iter(|| nearest_neighbor(black_box(&samples), &targets).unwrap())
        });
    }

    group.finish();
}

fn bench_irradiance(c: &mut Criterion) {
    let samples: Vec<IrradianceSample> = create_samples(200)
        .into_iter()
        .map(|p| IrradianceSample::new(p.y, p.x, p.value))
        .collect();
    let targets: Vec<(f64, f64)> = create_targets().into_iter().map(|(x, y)| (y, x)).collect();

    c.bench_function("interpolate_irradiance_200", |b| {
        b.iter(|| interpolate_irradiance(black_box(&samples), &targets).unwrap())
    });
}

criterion_group!(benches, bench_cubic, bench_nearest, bench_irradiance);
criterion_main!(benches);
