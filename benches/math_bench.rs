//! # Math Benchmarks
//!
//! Run with: `cargo bench`

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use panda_math::{
    create_rng, random_rotation, Dimension, Matrix, Quaternion, TransformPipeline, Vec3, Vector,
};
use rand::Rng;
use std::hint::black_box;

/// Diagonally dominant `n x n` matrix, always invertible.
fn create_matrix(n: usize) -> Matrix {
    let mut rng = create_rng(7);
    let mut m = Matrix::zeros(n, n);
    for r in 0..n {
        for c in 0..n {
            let noise: f64 = rng.gen_range(-1.0..1.0);
            m[(r, c)] = if r == c { noise + n as f64 } else { noise };
        }
    }
    m
}

fn bench_matrix_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("matrix");

    for size in [4, 16, 64] {
        let m = create_matrix(size);
        group.bench_with_input(BenchmarkId::new("multiply", size), &m, |b, m| {
            b.iter(|| black_box(m.try_mul(m)))
        });
        group.bench_with_input(BenchmarkId::new("determinant", size), &m, |b, m| {
            b.iter(|| black_box(m.determinant()))
        });
        group.bench_with_input(BenchmarkId::new("inverse", size), &m, |b, m| {
            b.iter(|| black_box(m.inverse()))
        });
    }

    group.finish();
}

fn bench_rotations(c: &mut Criterion) {
    let mut rng = create_rng(11);
    let a = random_rotation(&mut rng);
    let b = random_rotation(&mut rng);
    let v = Vec3::new(1.0, 2.0, 3.0);

    c.bench_function("quaternion_rotate", |bench| {
        bench.iter(|| black_box(a).rotate(black_box(v)))
    });
    c.bench_function("quaternion_slerp", |bench| {
        bench.iter(|| black_box(a).slerp(black_box(b), 0.3))
    });
    c.bench_function("quaternion_to_matrix", |bench| {
        bench.iter(|| Quaternion::from_rotation_matrix(&black_box(a).to_matrix3()))
    });
}

fn bench_pipeline(c: &mut Criterion) {
    let pipeline: TransformPipeline = ["scale:2", "rotate-y:30", "rotate-x:15", "translate:1,2,3"]
        .iter()
        .filter_map(|s| s.parse().ok())
        .collect();
    let points: Vec<Vec3> = (0..1000)
        .map(|i| Vec3::splat(i as f64).normalize_or_zero())
        .collect();

    c.bench_function("pipeline_compile_3d", |b| {
        b.iter(|| black_box(&pipeline).to_matrix(Dimension::Three))
    });
    c.bench_function("pipeline_apply_1000_points", |b| {
        b.iter(|| black_box(&pipeline).apply_3d(black_box(&points)))
    });
}

criterion_group!(benches, bench_matrix_ops, bench_rotations, bench_pipeline);
criterion_main!(benches);
