//! # los-link
//!
//! Line-of-sight queries over terrain heightmaps.
//!
//! Given an observer and a target above a [`los_dem::Heightmap`], this crate
//! answers whether the straight 3D line between them clears the terrain,
//! and how robustly it does so.
//!
//! ## Features
//!
//! - **Ray traversal**: [`RayTraversal`] walks every grid cell under the
//!   segment's horizontal projection, comparing the terrain with the ray's
//!   interpolated elevation, and returns a tagged [`Visibility`]
//! - **Graded visibility**: [`VisibilityEstimator`] traverses a deterministic
//!   [`SamplePattern`] of parallel rays and reports the clear fraction
//! - **Numeric entry points**: [`los_boolean`] and [`los_probability`] take a
//!   flat row-major buffer and scalar coordinates, returning `0.0..=1.0`
//!
//! Leaving the heightmap is reported as "not visible", never as an error.
//! Errors are reserved for arguments that cannot describe a query.
//!
//! All operations are pure: they only read the heightmap, keep no state
//! between calls, and can run concurrently against the same terrain.
//!
//! ## Example
//!
//! ```
//! use los_link::{los_boolean, los_probability, DEFAULT_SAMPLE_COUNT};
//!
//! let width = 10;
//! let height = 10;
//! let mut dem = vec![0.0f32; width * height];
//!
//! assert_eq!(los_boolean(&dem, width, height, 0.0, 0.0, 1.0, 9.0, 9.0, 1.0)?, 1.0);
//!
//! // A spike at row 5, column 5 blocks a ray along row 5.
//! dem[5 * width + 5] = 100.0;
//! assert_eq!(los_boolean(&dem, width, height, 0.0, 5.0, 1.0, 9.0, 5.0, 1.0)?, 0.0);
//!
//! let p = los_probability(&dem, width, height, 0.5, 5.5, 1.0, 9.5, 5.5, 1.0, DEFAULT_SAMPLE_COUNT)?;
//! assert!((0.0..=1.0).contains(&p));
//! # Ok::<(), los_link::LosError>(())
//! ```

mod api;
mod error;
mod estimate;
mod geometry;
mod traversal;

pub use api::{los_boolean, los_probability};
pub use error::{LosError, LosResult};
pub use estimate::{Estimate, SamplePattern, VisibilityEstimator, DEFAULT_SAMPLE_COUNT};
pub use geometry::{Axis, Point3, Segment};
pub use traversal::{RayTraversal, Visibility};

// Re-export the terrain types used in signatures.
pub use los_dem::{GridCell, Heightmap};
