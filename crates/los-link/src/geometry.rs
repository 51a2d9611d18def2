//! Points and segments in grid space.

use crate::{LosError, LosResult};
use los_dem::{GridCell, Heightmap};

/// A position above the terrain.
///
/// `x` and `y` are fractional grid-space coordinates (columns and rows);
/// `z` is an elevation in the heightmap's vertical units.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point3 {
    /// Column-space coordinate.
    pub x: f64,
    /// Row-space coordinate.
    pub y: f64,
    /// Elevation.
    pub z: f64,
}

impl Point3 {
    /// Create a point.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// A point `height_above_ground` above the terrain sample under `(x, y)`.
    ///
    /// Returns `None` when `(x, y)` is outside the heightmap.
    pub fn above_ground(
        heightmap: &Heightmap<'_>,
        x: f64,
        y: f64,
        height_above_ground: f64,
    ) -> Option<Self> {
        heightmap
            .ground_at(x, y)
            .map(|ground| Self::new(x, y, ground as f64 + height_above_ground))
    }

    /// Shift the horizontal position, leaving the elevation unchanged.
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z)
    }

    /// True when all three coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// The grid cell containing this point's horizontal position.
    pub fn cell(&self) -> GridCell {
        GridCell::containing(self.x, self.y)
    }
}

impl From<(f64, f64, f64)> for Point3 {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::new(x, y, z)
    }
}

/// Horizontal grid axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Columns.
    X,
    /// Rows.
    Y,
}

/// A sight line from an observer to a target.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Segment {
    observer: Point3,
    target: Point3,
}

impl Segment {
    /// Create a segment, rejecting non-finite coordinates.
    ///
    /// Degenerate segments (observer and target in the same cell, or even
    /// at the same position) are valid.
    pub fn new(observer: Point3, target: Point3) -> LosResult<Self> {
        for (endpoint, p) in [("observer", &observer), ("target", &target)] {
            if !p.is_finite() {
                return Err(LosError::NonFiniteCoordinate {
                    endpoint,
                    x: p.x,
                    y: p.y,
                    z: p.z,
                });
            }
        }
        Ok(Self { observer, target })
    }

    /// The start of the sight line.
    pub fn observer(&self) -> Point3 {
        self.observer
    }

    /// The end of the sight line.
    pub fn target(&self) -> Point3 {
        self.target
    }

    /// Displacement `(dx, dy, dz)` from observer to target.
    pub fn delta(&self) -> (f64, f64, f64) {
        (
            self.target.x - self.observer.x,
            self.target.y - self.observer.y,
            self.target.z - self.observer.z,
        )
    }

    /// The axis with the larger absolute horizontal displacement.
    ///
    /// Ties (including the fully degenerate case) resolve to [`Axis::Y`].
    pub fn dominant_axis(&self) -> Axis {
        let (dx, dy, _) = self.delta();
        if dx.abs() > dy.abs() {
            Axis::X
        } else {
            Axis::Y
        }
    }

    /// Cell containing the observer.
    pub fn start_cell(&self) -> GridCell {
        self.observer.cell()
    }

    /// Cell containing the target.
    pub fn end_cell(&self) -> GridCell {
        self.target.cell()
    }

    /// Lower bound on the number of cells a complete walk visits:
    /// `max(|dcol|, |drow|) + 1`, saturating at `u64::MAX`.
    pub fn cell_span(&self) -> u64 {
        self.start_cell()
            .chebyshev_distance(&self.end_cell())
            .saturating_add(1)
    }

    /// Both endpoints shifted horizontally by the same offset.
    ///
    /// The result is parallel to `self` and keeps its elevations.
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            observer: self.observer.translated(dx, dy),
            target: self.target.translated(dx, dy),
        }
    }
}
