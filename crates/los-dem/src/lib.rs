//! # los-dem
//!
//! Digital Elevation Model (DEM) heightmaps for line-of-sight queries.
//!
//! This crate provides the terrain side of the visibility engine:
//! - [`Heightmap`]: a read-only, row-major view over a caller-owned buffer
//!   of `f32` elevation samples, validated against its declared dimensions
//! - [`ElevationGrid`]: an owned grid used to assemble terrain (fill, set
//!   cells, raise ridges) before borrowing it as a [`Heightmap`]
//! - [`GridCell`]: signed integer cell indices
//!
//! ## Coordinates
//!
//! Grid-space positions are fractional `(x, y)` pairs where `x` runs along
//! columns and `y` along rows. The position `(x, y)` lies in the cell
//! `(floor(x), floor(y))`. Elevations share the vertical units of the
//! samples.
//!
//! Rasterizing point clouds into a heightmap, reading raster formats, and
//! reprojecting coordinates are left to the caller.
//!
//! ## Example
//!
//! ```
//! use los_dem::{GridCell, Heightmap};
//!
//! // 3 columns, 2 rows
//! let samples = [0.0, 1.0, 2.0, 10.0, 11.0, 12.0];
//! let map = Heightmap::new(&samples, 3, 2)?;
//!
//! assert_eq!(map.elevation(GridCell::new(2, 1)), Some(12.0));
//! assert_eq!(map.ground_at(0.5, 1.5), Some(10.0));
//! assert_eq!(map.elevation(GridCell::new(3, 0)), None);
//! # Ok::<(), los_dem::DemError>(())
//! ```

mod error;
mod grid;
mod heightmap;

pub use error::DemError;
pub use grid::{ElevationGrid, Orientation, Ridge};
pub use heightmap::{GridCell, Heightmap};

/// Result type for DEM operations.
pub type Result<T> = std::result::Result<T, DemError>;
