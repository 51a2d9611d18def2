//! Benchmarks for ray traversal and graded visibility.
//!
//! ## Running the benchmarks
//!
//! ```bash
//! cargo bench -p los-link
//! ```
//!
//! ## Benchmarks included
//!
//! - `traverse/span_N` - One diagonal traversal across N cells
//! - `estimate/samples_N` - Serial estimate with N sampled rays
//! - `estimate_parallel/samples_N` - The same estimate on the rayon pool

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use los_dem::ElevationGrid;
use los_link::{Point3, RayTraversal, SamplePattern, Segment, VisibilityEstimator};

const GRID_SIZE: usize = 2048;

fn terrain() -> ElevationGrid {
    let mut grid = ElevationGrid::filled(GRID_SIZE, GRID_SIZE, 0.0).expect("grid");
    for row in 0..GRID_SIZE {
        for col in 0..GRID_SIZE {
            let h = 5.0 + 4.0 * (col as f32 * 0.01).sin() * (row as f32 * 0.013).cos();
            grid.set(col, row, h).expect("cell in range");
        }
    }
    grid
}

fn diagonal(span: usize) -> Segment {
    let start = 10.5;
    let end = start + span as f64 - 1.0;
    Segment::new(Point3::new(start, start, 20.0), Point3::new(end, end * 0.75, 20.0))
        .expect("finite segment")
}

/// Benchmark a single traversal over increasing spans.
fn bench_traverse(c: &mut Criterion) {
    let grid = terrain();
    let map = grid.as_heightmap();
    let traversal = RayTraversal::new(&map);
    let mut group = c.benchmark_group("traverse");

    for span in [64usize, 256, 1024, 2000].iter() {
        group.throughput(Throughput::Elements(*span as u64));
        let segment = diagonal(*span);
        group.bench_with_input(BenchmarkId::new("span", span), &segment, |b, seg| {
            b.iter(|| black_box(traversal.traverse(black_box(seg))));
        });
    }

    group.finish();
}

/// Benchmark serial and parallel estimates over increasing sample counts.
fn bench_estimate(c: &mut Criterion) {
    let grid = terrain();
    let map = grid.as_heightmap();
    let estimator = VisibilityEstimator::new(&map);
    let segment = diagonal(1024);

    let mut group = c.benchmark_group("estimate");
    for samples in [1u32, 9, 25, 64].iter() {
        let pattern = SamplePattern::new(*samples).expect("positive sample count");
        group.throughput(Throughput::Elements(*samples as u64));
        group.bench_with_input(BenchmarkId::new("samples", samples), &pattern, |b, p| {
            b.iter(|| black_box(estimator.estimate_detailed(&segment, p)));
        });
    }
    group.finish();

    let mut group = c.benchmark_group("estimate_parallel");
    group.sample_size(20);
    for samples in [9u32, 25, 64].iter() {
        let pattern = SamplePattern::new(*samples).expect("positive sample count");
        group.throughput(Throughput::Elements(*samples as u64));
        group.bench_with_input(BenchmarkId::new("samples", samples), &pattern, |b, p| {
            b.iter(|| black_box(estimator.estimate_parallel(&segment, p)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_traverse, bench_estimate);
criterion_main!(benches);
