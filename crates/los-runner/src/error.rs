//! Error types for the scenario runner.

use los_dem::DemError;
use los_link::LosError;
use thiserror::Error;

/// Errors that can occur while loading or running a scenario.
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Terrain error: {0}")]
    Terrain(#[from] DemError),

    #[error("Line-of-sight error: {0}")]
    Los(#[from] LosError),

    #[error("Terrain needs either `rows` or both `width` and `height`")]
    MissingDimensions,

    #[error("Terrain `rows` are {rows_width}x{rows_height} but `width`/`height` say {width}x{height}")]
    ConflictingDimensions {
        rows_width: usize,
        rows_height: usize,
        width: usize,
        height: usize,
    },

    #[error("Query '{query}': {endpoint} needs exactly one of `z` or `height_above_ground`")]
    AmbiguousElevation {
        query: String,
        endpoint: &'static str,
    },

    #[error("Query '{query}': {endpoint} at ({x}, {y}) is off the terrain, cannot place it above ground")]
    EndpointOffTerrain {
        query: String,
        endpoint: &'static str,
        x: f64,
        y: f64,
    },

    #[error("Scenario has no queries")]
    NoQueries,
}
