//! Example: Line of sight over synthetic terrain.
//!
//! Usage: cargo run -p los-link --example static_terrain -- [size]

use los_dem::ElevationGrid;
use los_link::{Point3, RayTraversal, Segment, VisibilityEstimator, DEFAULT_SAMPLE_COUNT};
use std::env;
use std::time::Instant;

fn report(grid: &ElevationGrid, observer: Point3, target: Point3) {
    let map = grid.as_heightmap();
    let segment = match Segment::new(observer, target) {
        Ok(segment) => segment,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let start = Instant::now();
    let visibility = RayTraversal::new(&map).traverse(&segment);
    let probability = match VisibilityEstimator::new(&map).estimate(&segment, DEFAULT_SAMPLE_COUNT)
    {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    println!("LOS?: {} ({})", visibility.score(), visibility);
    println!(
        "LOS probability: {:.4} ({:.3}ms)",
        probability,
        start.elapsed().as_secs_f64() * 1000.0
    );
}

fn main() {
    let size: usize = env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(1000);
    if size < 10 {
        eprintln!("Grid size must be at least 10");
        std::process::exit(1);
    }

    let mut grid = match ElevationGrid::filled(size, size, 0.0) {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let near = size as f64 * 0.1;
    let far = size as f64 * 0.9;

    println!("=== Test 1: Flat terrain (should be visible) ===");
    report(&grid, Point3::new(near, near, 10.0), Point3::new(far, far, 10.0));

    let mid = size / 2;
    if let Err(e) = grid.set(mid, mid, 50.0) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
    println!("\n=== Test 2: Add blocking hill (should be blocked) ===");
    report(&grid, Point3::new(near, near, 10.0), Point3::new(far, far, 10.0));

    println!("\n=== Test 3: Raise observers above hill (should be visible) ===");
    report(&grid, Point3::new(near, near, 100.0), Point3::new(far, far, 100.0));
}
