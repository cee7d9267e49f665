use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tsp_assignment::{euclidean_matrix, solve, solve_batch, Point, SolverConfig};

fn random_points(rng: &mut ChaCha8Rng, n: usize) -> Vec<Point> {
    (0..n)
        .map(|_| Point::new(rng.gen_range(0.0..1000.0), rng.gen_range(0.0..1000.0)))
        .collect()
}

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("reduced_matrix_solve");
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    for size in [10, 50, 100, 200].iter() {
        let matrix = euclidean_matrix(&random_points(&mut rng, *size)).unwrap();
        group.bench_with_input(BenchmarkId::new("euclidean", size), &matrix, |b, m| {
            b.iter(|| solve(black_box(m)).unwrap())
        });
    }

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("reduced_matrix_batch");
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let config = SolverConfig::default();

    let matrices: Vec<_> = (0..32)
        .map(|_| euclidean_matrix(&random_points(&mut rng, 60)).unwrap())
        .collect();
    group.bench_function("32x60_cities", |b| {
        b.iter(|| solve_batch(black_box(&matrices), &config))
    });

    group.finish();
}

criterion_group!(benches, bench_solve, bench_batch);
criterion_main!(benches);
