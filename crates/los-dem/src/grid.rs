//! Owned elevation grid used to assemble terrain before querying it.

use crate::{DemError, GridCell, Heightmap, Result};

/// Orientation of a [`Ridge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Orientation {
    /// Runs along a row (constant Y).
    Horizontal,
    /// Runs along a column (constant X).
    Vertical,
}

/// A straight wall of raised cells along one row or column.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ridge {
    /// Whether the ridge follows a row or a column.
    pub orientation: Orientation,
    /// Row index (horizontal) or column index (vertical).
    pub index: usize,
    /// First cell along the ridge (inclusive).
    pub start: usize,
    /// Last cell along the ridge (inclusive).
    pub end: usize,
    /// Elevation assigned to every ridge cell.
    pub elevation: f32,
}

/// Row-major elevation samples that own their storage.
///
/// `ElevationGrid` is the mutable counterpart to [`Heightmap`]: build the
/// terrain here, then borrow it with [`ElevationGrid::as_heightmap`] for
/// line-of-sight queries.
///
/// # Example
///
/// ```
/// use los_dem::ElevationGrid;
///
/// let mut grid = ElevationGrid::filled(10, 10, 0.0)?;
/// grid.set(5, 5, 100.0)?;
///
/// let map = grid.as_heightmap();
/// assert_eq!(map.ground_at(5.5, 5.5), Some(100.0));
/// # Ok::<(), los_dem::DemError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ElevationGrid {
    data: Vec<f32>,
    width: usize,
    height: usize,
}

impl ElevationGrid {
    /// Create a grid with every sample set to `elevation`.
    ///
    /// Fails with [`DemError::TooLarge`] when the sample count overflows or
    /// cannot be allocated.
    pub fn filled(width: usize, height: usize, elevation: f32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(DemError::EmptyGrid { width, height });
        }
        let len = width
            .checked_mul(height)
            .ok_or(DemError::TooLarge { width, height })?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| DemError::TooLarge { width, height })?;
        data.resize(len, elevation);
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Take ownership of a row-major buffer.
    pub fn from_vec(data: Vec<f32>, width: usize, height: usize) -> Result<Self> {
        // Reuse the view's dimension checks.
        Heightmap::new(&data, width, height)?;
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Build a grid from a 2D array of rows, indexed `[row][col]`.
    pub fn from_rows<R: AsRef<[f32]>>(rows: &[R]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if width == 0 || height == 0 {
            return Err(DemError::EmptyGrid { width, height });
        }

        let mut data = Vec::with_capacity(width * height);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != width {
                return Err(DemError::RaggedRows {
                    row,
                    expected: width,
                    actual: values.len(),
                });
            }
            data.extend_from_slice(values);
        }

        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Borrow the samples as a read-only [`Heightmap`].
    pub fn as_heightmap(&self) -> Heightmap<'_> {
        Heightmap::from_validated(&self.data, self.width, self.height)
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major samples.
    pub fn samples(&self) -> &[f32] {
        &self.data
    }

    /// Consume the grid, returning its row-major samples.
    pub fn into_samples(self) -> Vec<f32> {
        self.data
    }

    /// Set the elevation of the cell at `(col, row)`.
    pub fn set(&mut self, col: usize, row: usize, elevation: f32) -> Result<()> {
        if col >= self.width || row >= self.height {
            return Err(DemError::CellOutOfBounds {
                col: col as i64,
                row: row as i64,
                width: self.width,
                height: self.height,
            });
        }
        self.data[row * self.width + col] = elevation;
        Ok(())
    }

    /// Elevation of a cell, or `None` outside the grid.
    pub fn get(&self, cell: GridCell) -> Option<f32> {
        self.as_heightmap().elevation(cell)
    }

    /// Raise a straight wall of cells.
    ///
    /// `start` and `end` may be given in either order; both are inclusive.
    pub fn add_ridge(&mut self, ridge: &Ridge) -> Result<()> {
        let (lo, hi) = if ridge.start <= ridge.end {
            (ridge.start, ridge.end)
        } else {
            (ridge.end, ridge.start)
        };
        for along in lo..=hi {
            match ridge.orientation {
                Orientation::Horizontal => self.set(along, ridge.index, ridge.elevation)?,
                Orientation::Vertical => self.set(ridge.index, along, ridge.elevation)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_rejects_empty() {
        assert_eq!(
            ElevationGrid::filled(0, 0, 1.0).unwrap_err(),
            DemError::EmptyGrid { width: 0, height: 0 }
        );
    }

    #[test]
    fn test_filled_rejects_oversized() {
        // Sample count overflows usize.
        assert_eq!(
            ElevationGrid::filled(usize::MAX, 2, 0.0).unwrap_err(),
            DemError::TooLarge {
                width: usize::MAX,
                height: 2,
            }
        );

        // Fits in usize but not in an allocation.
        let width = usize::MAX / 4;
        assert_eq!(
            ElevationGrid::filled(width, 1, 0.0).unwrap_err(),
            DemError::TooLarge { width, height: 1 }
        );
    }

    #[test]
    fn test_from_rows_is_row_major() {
        let grid = ElevationGrid::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]])
            .expect("rectangular rows");

        assert_eq!(grid.width(), 2);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.samples(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(grid.get(GridCell::new(1, 2)), Some(6.0));
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let err = ElevationGrid::from_rows(&[vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(
            err,
            DemError::RaggedRows {
                row: 1,
                expected: 2,
                actual: 1,
            }
        );
    }

    #[test]
    fn test_set_out_of_bounds() {
        let mut grid = ElevationGrid::filled(4, 4, 0.0).expect("grid");
        assert!(grid.set(3, 3, 1.0).is_ok());
        assert!(matches!(
            grid.set(4, 0, 1.0),
            Err(DemError::CellOutOfBounds { col: 4, row: 0, .. })
        ));
    }

    #[test]
    fn test_add_ridge() {
        let mut grid = ElevationGrid::filled(5, 5, 0.0).expect("grid");
        grid.add_ridge(&Ridge {
            orientation: Orientation::Vertical,
            index: 2,
            start: 3,
            end: 1,
            elevation: 9.0,
        })
        .expect("ridge fits");

        assert_eq!(grid.get(GridCell::new(2, 0)), Some(0.0));
        assert_eq!(grid.get(GridCell::new(2, 1)), Some(9.0));
        assert_eq!(grid.get(GridCell::new(2, 3)), Some(9.0));
        assert_eq!(grid.get(GridCell::new(2, 4)), Some(0.0));
        assert_eq!(grid.get(GridCell::new(1, 2)), Some(0.0));
    }

    #[test]
    fn test_from_vec_checks_dimensions() {
        assert!(ElevationGrid::from_vec(vec![0.0; 6], 3, 2).is_ok());
        assert!(ElevationGrid::from_vec(vec![0.0; 5], 3, 2).is_err());
    }
}
