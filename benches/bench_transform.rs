//!
//! Transform throughput benchmark
//!
use proj4crs::adaptors::transform_point_array;
use proj4crs::proj::Proj;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn etmerc_transform(itermax: usize) {
    let d = 1.0 / (itermax as f64);

    let mut data: Vec<(f64, f64, f64)> = (1..=itermax)
        .map(|i| {
            (
                (-2.0f64 + (i as f64) * 4.0 * d).to_radians(),
                (-1.0f64 + (i as f64) * 2.0 * d).to_radians(),
                0.,
            )
        })
        .collect();

    let from = Proj::from_proj_string("+proj=latlong +ellps=GRS80").unwrap();
    let to = Proj::from_proj_string("+proj=etmerc +ellps=GRS80").unwrap();

    transform_point_array(&from, &to, data.as_mut_slice()).unwrap();
}

fn criterion_benchmark_proj(c: &mut Criterion) {
    c.bench_function("etmerc forward", |b| {
        b.iter(|| etmerc_transform(black_box(10_000usize)))
    });
}

criterion_group!(benches, criterion_benchmark_proj);
criterion_main!(benches);
