//! Flat-argument entry points with the numeric result contract.
//!
//! These mirror the scripting-facing signatures: a row-major buffer plus its
//! dimensions, and the two endpoints spelled out as scalars. Malformed
//! arguments are returned as [`LosError`] rather than folded into `0.0`.

use crate::estimate::VisibilityEstimator;
use crate::geometry::{Point3, Segment};
use crate::traversal::RayTraversal;
use crate::LosResult;
use los_dem::Heightmap;

/// Binary line of sight: exactly `1.0` when clear, `0.0` when the terrain
/// blocks the ray or the ray leaves the heightmap.
///
/// # Errors
///
/// Fails when `heightmap.len() != width * height`, when either dimension is
/// zero, or when a coordinate is not finite.
#[allow(clippy::too_many_arguments)]
pub fn los_boolean(
    heightmap: &[f32],
    width: usize,
    height: usize,
    x0: f64,
    y0: f64,
    z0: f64,
    x1: f64,
    y1: f64,
    z1: f64,
) -> LosResult<f64> {
    let map = Heightmap::new(heightmap, width, height)?;
    let segment = Segment::new(Point3::new(x0, y0, z0), Point3::new(x1, y1, z1))?;
    Ok(RayTraversal::new(&map).traverse(&segment).score())
}

/// Graded line of sight in `[0, 1]`: the fraction of `num_samples` parallel
/// rays around the segment that are clear. Use
/// [`crate::DEFAULT_SAMPLE_COUNT`] for the conventional nine rays.
///
/// # Errors
///
/// As [`los_boolean`], and additionally when `num_samples == 0`.
#[allow(clippy::too_many_arguments)]
pub fn los_probability(
    heightmap: &[f32],
    width: usize,
    height: usize,
    x0: f64,
    y0: f64,
    z0: f64,
    x1: f64,
    y1: f64,
    z1: f64,
    num_samples: u32,
) -> LosResult<f64> {
    let map = Heightmap::new(heightmap, width, height)?;
    let segment = Segment::new(Point3::new(x0, y0, z0), Point3::new(x1, y1, z1))?;
    VisibilityEstimator::new(&map).estimate(&segment, num_samples)
}
