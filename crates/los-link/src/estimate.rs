//! Graded visibility from a bundle of parallel sight lines.
//!
//! A single traversal only answers "clear" or "blocked". To express how
//! close a sight line comes to the terrain, the estimator shifts the
//! segment by a fixed square pattern of horizontal offsets, traverses each
//! shifted copy, and reports the fraction that stays clear. The pattern is
//! deterministic, so identical inputs always produce identical results.

use crate::geometry::Segment;
use crate::traversal::RayTraversal;
use crate::{LosError, LosResult};
use los_dem::Heightmap;
use rayon::prelude::*;
use tracing::debug;

/// Number of sampled rays used when the caller does not choose one.
pub const DEFAULT_SAMPLE_COUNT: u32 = 9;

// ============================================================================
// Sample Pattern
// ============================================================================

/// Horizontal offsets applied to both endpoints of a segment.
///
/// For `n` samples the offsets sit on a square of `ceil(sqrt(n))` points per
/// side, filled row by row and truncated to exactly `n` entries. Sample `i`
/// has grid position `(i % size, i / size)` and offset
/// `((gx - size / 2) * 2 / size, (gy - size / 2) * 2 / size)`, with
/// `size / 2` rounded down. A single sample is the unshifted segment.
///
/// Offsets are computed on demand, so the pattern is the same size for any
/// sample count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplePattern {
    sample_count: u32,
    grid_size: u32,
}

impl SamplePattern {
    /// Build the pattern for `sample_count` rays.
    pub fn new(sample_count: u32) -> LosResult<Self> {
        if sample_count == 0 {
            return Err(LosError::InvalidSampleCount(sample_count));
        }
        Ok(Self {
            sample_count,
            grid_size: ceil_sqrt(sample_count),
        })
    }

    /// Offset of sample `index`, or `None` past the end of the pattern.
    pub fn offset(&self, index: u32) -> Option<(f64, f64)> {
        if index >= self.sample_count {
            return None;
        }
        if self.sample_count == 1 {
            return Some((0.0, 0.0));
        }
        let half = (self.grid_size / 2) as f64;
        let spacing = 2.0 / self.grid_size as f64;
        let gx = (index % self.grid_size) as f64;
        let gy = (index / self.grid_size) as f64;
        Some(((gx - half) * spacing, (gy - half) * spacing))
    }

    /// The offsets, in sample order.
    pub fn offsets(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        (0..self.sample_count).filter_map(move |i| self.offset(i))
    }

    /// Number of sampled rays.
    pub fn len(&self) -> u32 {
        self.sample_count
    }

    /// Always false; a pattern holds at least one offset.
    pub fn is_empty(&self) -> bool {
        self.sample_count == 0
    }

    /// Points per side of the square the offsets are drawn from.
    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    /// The shifted copies of `segment`, one per offset.
    pub fn segments<'s>(&'s self, segment: &'s Segment) -> impl Iterator<Item = Segment> + 's {
        self.offsets().map(move |(dx, dy)| segment.translated(dx, dy))
    }
}

/// Smallest `g` with `g * g >= n`.
fn ceil_sqrt(n: u32) -> u32 {
    let n = n as u64;
    let mut g = (n as f64).sqrt() as u64;
    while g * g < n {
        g += 1;
    }
    while g > 1 && (g - 1) * (g - 1) >= n {
        g -= 1;
    }
    g as u32
}

// ============================================================================
// Estimation
// ============================================================================

/// Clear-ray count from one estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Estimate {
    /// Number of sampled rays that were clear.
    pub clear: u32,
    /// Number of sampled rays.
    pub samples: u32,
}

impl Estimate {
    /// Fraction of clear rays, in `[0, 1]`.
    pub fn probability(&self) -> f64 {
        if self.samples == 0 {
            return 0.0;
        }
        self.clear as f64 / self.samples as f64
    }

    /// True when every sampled ray was clear.
    pub fn all_clear(&self) -> bool {
        self.clear == self.samples
    }
}

/// Aggregates [`RayTraversal`] results over a [`SamplePattern`].
///
/// Despite the "probability" naming of [`crate::los_probability`], the
/// result is a deterministic spatial ratio, not a statistical estimate.
///
/// # Example
///
/// ```
/// use los_dem::ElevationGrid;
/// use los_link::{Point3, Segment, VisibilityEstimator};
///
/// let grid = ElevationGrid::filled(10, 10, 0.0)?;
/// let map = grid.as_heightmap();
/// let segment = Segment::new(Point3::new(2.5, 2.5, 1.0), Point3::new(7.5, 7.5, 1.0))?;
///
/// let p = VisibilityEstimator::new(&map).estimate(&segment, 9)?;
/// assert_eq!(p, 1.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct VisibilityEstimator<'a> {
    traversal: RayTraversal<'a>,
}

impl<'a> VisibilityEstimator<'a> {
    /// Create an estimator over `heightmap`.
    pub fn new(heightmap: &Heightmap<'a>) -> Self {
        Self {
            traversal: RayTraversal::new(heightmap),
        }
    }

    /// Fraction of the `sample_count` shifted rays that are clear.
    ///
    /// With `sample_count == 1` this equals `RayTraversal::traverse(..).score()`.
    pub fn estimate(&self, segment: &Segment, sample_count: u32) -> LosResult<f64> {
        let pattern = SamplePattern::new(sample_count)?;
        Ok(self.estimate_detailed(segment, &pattern).probability())
    }

    /// Count clear rays over `pattern`, one traversal after another.
    pub fn estimate_detailed(&self, segment: &Segment, pattern: &SamplePattern) -> Estimate {
        let clear = pattern
            .segments(segment)
            .filter(|shifted| self.traversal.traverse(shifted).is_clear())
            .count() as u32;
        self.finish(clear, pattern)
    }

    /// Count clear rays over `pattern` on the rayon thread pool.
    ///
    /// Samples are independent, so the result matches
    /// [`VisibilityEstimator::estimate_detailed`] exactly.
    pub fn estimate_parallel(&self, segment: &Segment, pattern: &SamplePattern) -> Estimate {
        let clear = (0..pattern.len())
            .into_par_iter()
            .filter_map(|i| pattern.offset(i))
            .filter(|&(dx, dy)| self.traversal.traverse(&segment.translated(dx, dy)).is_clear())
            .count() as u32;
        self.finish(clear, pattern)
    }

    fn finish(&self, clear: u32, pattern: &SamplePattern) -> Estimate {
        let estimate = Estimate {
            clear,
            samples: pattern.len(),
        };
        debug!(
            clear = estimate.clear,
            samples = estimate.samples,
            probability = estimate.probability(),
            "visibility estimate"
        );
        estimate
    }
}
