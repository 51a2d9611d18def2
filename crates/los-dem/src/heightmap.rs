//! Read-only heightmap view over a caller-owned elevation buffer.

use crate::{DemError, Result};

/// Integer index of a heightmap cell.
///
/// Indices are signed so that cells reached by walking off the edge of the
/// grid can still be represented and reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridCell {
    /// Column index (X grid coordinate).
    pub col: i64,
    /// Row index (Y grid coordinate).
    pub row: i64,
}

impl GridCell {
    /// Create a cell index.
    pub const fn new(col: i64, row: i64) -> Self {
        Self { col, row }
    }

    /// The cell containing the fractional grid-space position `(x, y)`.
    pub fn containing(x: f64, y: f64) -> Self {
        Self {
            col: x.floor() as i64,
            row: y.floor() as i64,
        }
    }

    /// Chebyshev distance to another cell.
    pub fn chebyshev_distance(&self, other: &GridCell) -> u64 {
        self.col
            .abs_diff(other.col)
            .max(self.row.abs_diff(other.row))
    }
}

impl std::fmt::Display for GridCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// An immutable 2D grid of terrain elevations.
///
/// Samples are stored row-major: the sample for column `col` and row `row`
/// lives at `data[row * width + col]`. The view borrows the buffer for the
/// duration of a query and never mutates it.
#[derive(Debug, Clone, Copy)]
pub struct Heightmap<'a> {
    data: &'a [f32],
    width: usize,
    height: usize,
}

impl<'a> Heightmap<'a> {
    /// Wrap a row-major elevation buffer.
    ///
    /// Fails if either dimension is zero or the buffer length is not
    /// `width * height`.
    pub fn new(data: &'a [f32], width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(DemError::EmptyGrid { width, height });
        }
        let expected = width
            .checked_mul(height)
            .ok_or(DemError::TooLarge { width, height })?;
        if data.len() != expected {
            return Err(DemError::DimensionMismatch {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Wrap a buffer whose dimensions were already checked by the caller.
    pub(crate) fn from_validated(data: &'a [f32], width: usize, height: usize) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            data,
            width,
            height,
        }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Dimensions as `(width, height)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// The underlying row-major samples.
    pub fn samples(&self) -> &'a [f32] {
        self.data
    }

    /// Check whether a cell lies within `[0, width) x [0, height)`.
    pub fn contains(&self, cell: GridCell) -> bool {
        cell.col >= 0
            && cell.row >= 0
            && (cell.col as u64) < self.width as u64
            && (cell.row as u64) < self.height as u64
    }

    /// Terrain elevation of a cell, or `None` outside the grid.
    #[inline]
    pub fn elevation(&self, cell: GridCell) -> Option<f32> {
        if self.contains(cell) {
            Some(self.data[cell.row as usize * self.width + cell.col as usize])
        } else {
            None
        }
    }

    /// Terrain elevation under a fractional grid-space position.
    ///
    /// The position is floored to the cell containing it; no interpolation
    /// is performed.
    pub fn ground_at(&self, x: f64, y: f64) -> Option<f32> {
        self.elevation(GridCell::containing(x, y))
    }

    /// Minimum and maximum sample values.
    pub fn min_max(&self) -> (f32, f32) {
        self.data
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty_dimensions() {
        let err = Heightmap::new(&[], 0, 4).unwrap_err();
        assert_eq!(err, DemError::EmptyGrid { width: 0, height: 4 });
    }

    #[test]
    fn test_new_rejects_buffer_mismatch() {
        let data = vec![0.0f32; 11];
        let err = Heightmap::new(&data, 3, 4).unwrap_err();
        assert_eq!(
            err,
            DemError::DimensionMismatch {
                width: 3,
                height: 4,
                expected: 12,
                actual: 11,
            }
        );
    }

    #[test]
    fn test_new_rejects_overflowing_dimensions() {
        let err = Heightmap::new(&[], usize::MAX, 3).unwrap_err();
        assert_eq!(
            err,
            DemError::TooLarge {
                width: usize::MAX,
                height: 3,
            }
        );
    }

    #[test]
    fn test_row_major_indexing() {
        // 3 columns, 2 rows
        let data = [0.0, 1.0, 2.0, 10.0, 11.0, 12.0];
        let map = Heightmap::new(&data, 3, 2).expect("valid heightmap");

        assert_eq!(map.elevation(GridCell::new(0, 0)), Some(0.0));
        assert_eq!(map.elevation(GridCell::new(2, 0)), Some(2.0));
        assert_eq!(map.elevation(GridCell::new(1, 1)), Some(11.0));
        assert_eq!(map.elevation(GridCell::new(3, 0)), None);
        assert_eq!(map.elevation(GridCell::new(0, 2)), None);
        assert_eq!(map.elevation(GridCell::new(-1, 0)), None);
    }

    #[test]
    fn test_ground_at_floors_position() {
        let data = [0.0, 1.0, 2.0, 10.0, 11.0, 12.0];
        let map = Heightmap::new(&data, 3, 2).expect("valid heightmap");

        assert_eq!(map.ground_at(1.9, 1.2), Some(11.0));
        assert_eq!(map.ground_at(0.0, 0.999), Some(0.0));
        assert_eq!(map.ground_at(-0.1, 0.5), None);
    }

    #[test]
    fn test_cell_containing_negative_coordinates() {
        assert_eq!(GridCell::containing(-0.5, 2.5), GridCell::new(-1, 2));
        assert_eq!(GridCell::containing(-5.0, -5.0), GridCell::new(-5, -5));
    }

    #[test]
    fn test_min_max() {
        let data = [3.0, -2.0, 7.5, 0.0];
        let map = Heightmap::new(&data, 2, 2).expect("valid heightmap");
        assert_eq!(map.min_max(), (-2.0, 7.5));
    }
}
