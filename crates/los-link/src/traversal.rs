//! Terrain occlusion test along a single sight line.
//!
//! The segment's horizontal projection is walked cell by cell with an
//! incremental grid traversal (Amanatides-Woo style): for each axis we track
//! the parametric distance to the next grid-line crossing (`t_max`) and the
//! parametric distance between crossings (`t_delta`), always stepping along
//! the axis whose crossing comes first. Every cell the exact line passes
//! through is visited once, in order, so shallow rays cannot skip over a
//! narrow terrain spike.

use crate::geometry::{Axis, Point3, Segment};
use los_dem::{GridCell, Heightmap};
use tracing::trace;

// ============================================================================
// Visibility Result
// ============================================================================

/// Outcome of walking one sight line over the terrain.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "outcome", rename_all = "snake_case"))]
pub enum Visibility {
    /// Every traversed cell lies at or below the ray.
    Clear,
    /// Terrain rises above the ray at `cell`.
    Occluded {
        /// First blocking cell.
        cell: GridCell,
        /// Terrain elevation of that cell.
        terrain: f32,
        /// Interpolated ray elevation at that cell.
        ray: f64,
    },
    /// The walk left the heightmap at `cell` before reaching the target.
    OutOfBounds {
        /// First cell outside the grid.
        cell: GridCell,
    },
}

impl Visibility {
    /// True only for [`Visibility::Clear`].
    pub fn is_clear(&self) -> bool {
        matches!(self, Visibility::Clear)
    }

    /// Numeric form: `1.0` when clear, `0.0` when occluded or out of bounds.
    pub fn score(&self) -> f64 {
        if self.is_clear() {
            1.0
        } else {
            0.0
        }
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Visibility::Clear => write!(f, "clear"),
            Visibility::Occluded { cell, terrain, ray } => {
                write!(f, "occluded at {} (terrain {:.2} > ray {:.2})", cell, terrain, ray)
            }
            Visibility::OutOfBounds { cell } => write!(f, "left terrain at {}", cell),
        }
    }
}

// ============================================================================
// Grid Walk
// ============================================================================

/// Incremental state of the cell-by-cell walk.
struct GridWalk {
    cell: GridCell,
    end: GridCell,
    step_x: i64,
    step_y: i64,
    t_max_x: f64,
    t_max_y: f64,
    t_delta_x: f64,
    t_delta_y: f64,
}

impl GridWalk {
    fn new(segment: &Segment) -> Self {
        let start = segment.observer();
        let (dx, dy, _) = segment.delta();
        let cell = segment.start_cell();

        let step_x = if dx > 0.0 { 1 } else { -1 };
        let step_y = if dy > 0.0 { 1 } else { -1 };

        let (t_max_x, t_delta_x) = axis_crossing(start.x, cell.col, dx, step_x);
        let (t_max_y, t_delta_y) = axis_crossing(start.y, cell.row, dy, step_y);

        Self {
            cell,
            end: segment.end_cell(),
            step_x,
            step_y,
            t_max_x,
            t_max_y,
            t_delta_x,
            t_delta_y,
        }
    }

    /// Move to the next cell along the line.
    ///
    /// On a tie (the line crosses a grid corner exactly) the Y axis steps
    /// first.
    fn advance(&mut self) {
        if self.t_max_x < self.t_max_y {
            self.t_max_x += self.t_delta_x;
            self.cell.col += self.step_x;
        } else {
            self.t_max_y += self.t_delta_y;
            self.cell.row += self.step_y;
        }
    }
}

/// `(t_max, t_delta)` for one axis. Both are infinite when the axis has no
/// displacement, so the walk never steps along it.
fn axis_crossing(origin: f64, index: i64, delta: f64, step: i64) -> (f64, f64) {
    if delta == 0.0 {
        return (f64::INFINITY, f64::INFINITY);
    }
    let next_line = if step > 0 {
        index as f64 + 1.0
    } else {
        index as f64
    };
    ((next_line - origin) / delta, 1.0 / delta.abs())
}

/// Fractional progress along the dominant axis at `cell`, clamped to `[0, 1]`.
///
/// Measured from the cell's lower grid line, as the numeric contract of
/// [`crate::los_boolean`] requires. A segment with no horizontal extent
/// evaluates at `t = 0`.
fn progress(axis: Axis, cell: GridCell, observer: &Point3, dx: f64, dy: f64) -> f64 {
    let t = match axis {
        Axis::X => (cell.col as f64 - observer.x) / dx,
        Axis::Y => (cell.row as f64 - observer.y) / dy,
    };
    if t.is_nan() {
        0.0
    } else {
        t.clamp(0.0, 1.0)
    }
}

// ============================================================================
// Ray Traversal
// ============================================================================

/// Binary line-of-sight test against a heightmap.
///
/// Holds no state between calls; the heightmap is only read.
///
/// # Example
///
/// ```
/// use los_dem::ElevationGrid;
/// use los_link::{Point3, RayTraversal, Segment, Visibility};
///
/// let mut grid = ElevationGrid::filled(10, 10, 0.0)?;
/// grid.set(5, 5, 100.0)?;
/// let map = grid.as_heightmap();
///
/// let segment = Segment::new(Point3::new(0.0, 5.0, 1.0), Point3::new(9.0, 5.0, 1.0))?;
/// let result = RayTraversal::new(&map).traverse(&segment);
/// assert!(matches!(result, Visibility::Occluded { .. }));
/// assert_eq!(result.score(), 0.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RayTraversal<'a> {
    heightmap: Heightmap<'a>,
}

impl<'a> RayTraversal<'a> {
    /// Create a traversal over `heightmap`.
    pub fn new(heightmap: &Heightmap<'a>) -> Self {
        Self {
            heightmap: *heightmap,
        }
    }

    /// The heightmap being queried.
    pub fn heightmap(&self) -> &Heightmap<'a> {
        &self.heightmap
    }

    /// Walk `segment` and report whether the terrain blocks it.
    pub fn traverse(&self, segment: &Segment) -> Visibility {
        self.traverse_with(segment, |_| {})
    }

    /// Like [`RayTraversal::traverse`], calling `visit` with every cell the
    /// walk evaluates, in order. The final cell (target, blocking cell, or
    /// first cell off the grid) is included.
    pub fn traverse_with<F>(&self, segment: &Segment, mut visit: F) -> Visibility
    where
        F: FnMut(GridCell),
    {
        let observer = segment.observer();
        let (dx, dy, dz) = segment.delta();
        let axis = segment.dominant_axis();
        let mut walk = GridWalk::new(segment);

        // Terminates: each step moves one cell monotonically along an axis,
        // so the walk reaches the target cell or leaves the grid.
        loop {
            let cell = walk.cell;
            visit(cell);

            let Some(terrain) = self.heightmap.elevation(cell) else {
                trace!(%cell, "ray left the heightmap");
                return Visibility::OutOfBounds { cell };
            };

            let t = progress(axis, cell, &observer, dx, dy);
            let ray = observer.z + t * dz;

            if terrain as f64 > ray {
                trace!(%cell, terrain, ray, "ray occluded");
                return Visibility::Occluded { cell, terrain, ray };
            }

            if cell == walk.end {
                return Visibility::Clear;
            }

            walk.advance();
        }
    }
}
