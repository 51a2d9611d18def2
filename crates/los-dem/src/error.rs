//! Error types for the DEM crate.

use thiserror::Error;

/// Errors that can occur when constructing or editing a heightmap.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DemError {
    /// Width or height is zero.
    #[error("Heightmap must have at least one row and one column (got {width}x{height})")]
    EmptyGrid {
        /// Requested width in columns.
        width: usize,
        /// Requested height in rows.
        height: usize,
    },

    /// The sample buffer does not match the declared dimensions.
    #[error("Heightmap buffer holds {actual} samples but {width}x{height} requires {expected}")]
    DimensionMismatch {
        /// Declared width in columns.
        width: usize,
        /// Declared height in rows.
        height: usize,
        /// `width * height`.
        expected: usize,
        /// Actual buffer length.
        actual: usize,
    },

    /// `width * height` samples cannot be addressed or allocated.
    #[error("Heightmap of {width}x{height} samples is too large")]
    TooLarge {
        /// Requested width in columns.
        width: usize,
        /// Requested height in rows.
        height: usize,
    },

    /// Rows passed to [`crate::ElevationGrid::from_rows`] have differing lengths.
    #[error("Row {row} has {actual} columns, expected {expected}")]
    RaggedRows {
        /// Index of the offending row.
        row: usize,
        /// Column count of the first row.
        expected: usize,
        /// Column count of the offending row.
        actual: usize,
    },

    /// A cell index lies outside the grid.
    #[error("Cell (col {col}, row {row}) is outside the {width}x{height} grid")]
    CellOutOfBounds {
        /// Column index.
        col: i64,
        /// Row index.
        row: i64,
        /// Grid width.
        width: usize,
        /// Grid height.
        height: usize,
    },
}
