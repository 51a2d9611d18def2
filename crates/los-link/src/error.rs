//! Error types for line-of-sight queries.

use los_dem::DemError;
use thiserror::Error;

/// Result type for line-of-sight operations.
pub type LosResult<T> = Result<T, LosError>;

/// Errors raised for malformed line-of-sight inputs.
///
/// Geometry never fails: a ray that leaves the terrain or hits it is a
/// normal result, not an error. These variants only cover arguments that
/// cannot describe a query at all.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LosError {
    /// The heightmap buffer or dimensions are invalid.
    #[error("Invalid heightmap: {0}")]
    Heightmap(#[from] DemError),

    /// An endpoint coordinate is NaN or infinite.
    #[error("Non-finite {endpoint} coordinate ({x}, {y}, {z})")]
    NonFiniteCoordinate {
        /// Which endpoint was rejected ("observer" or "target").
        endpoint: &'static str,
        /// X grid coordinate.
        x: f64,
        /// Y grid coordinate.
        y: f64,
        /// Elevation.
        z: f64,
    },

    /// The number of sampled rays must be at least one.
    #[error("Sample count must be positive (got {0})")]
    InvalidSampleCount(u32),
}
