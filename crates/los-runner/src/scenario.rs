//! YAML scenario files: synthetic terrain plus a list of sight-line queries.
//!
//! ```yaml
//! terrain:
//!   width: 1000
//!   height: 1000
//!   base_elevation: 0.0
//!   features:
//!     - kind: spike
//!       col: 500
//!       row: 500
//!       elevation: 50.0
//!     - kind: ridge
//!       orientation: horizontal
//!       index: 200
//!       start: 0
//!       end: 999
//!       elevation: 30.0
//! defaults:
//!   samples: 9
//! queries:
//!   - name: over-the-hill
//!     observer: { x: 100.0, y: 100.0, z: 10.0 }
//!     target: { x: 900.0, y: 900.0, height_above_ground: 2.0 }
//!     samples: 16
//! ```
//!
//! Terrain may instead be given inline as `rows: [[...], ...]`, indexed
//! `[row][col]`; features are applied on top.

use crate::RunnerError;
use los_dem::{ElevationGrid, Heightmap, Ridge};
use los_link::{Point3, DEFAULT_SAMPLE_COUNT};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// A complete scenario file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Terrain to query.
    pub terrain: TerrainSpec,
    /// Values applied to queries that do not set their own.
    #[serde(default)]
    pub defaults: Defaults,
    /// Sight lines to evaluate, in order.
    #[serde(default)]
    pub queries: Vec<QuerySpec>,
}

/// Scenario-wide defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Defaults {
    /// Rays sampled per graded estimate.
    #[serde(default = "default_samples")]
    pub samples: u32,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            samples: default_samples(),
        }
    }
}

fn default_samples() -> u32 {
    DEFAULT_SAMPLE_COUNT
}

/// Terrain description.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TerrainSpec {
    /// Number of columns (required unless `rows` is given).
    #[serde(default)]
    pub width: Option<usize>,
    /// Number of rows (required unless `rows` is given).
    #[serde(default)]
    pub height: Option<usize>,
    /// Fill elevation when building from `width`/`height`.
    #[serde(default)]
    pub base_elevation: f32,
    /// Explicit samples indexed `[row][col]`.
    #[serde(default)]
    pub rows: Option<Vec<Vec<f32>>>,
    /// Features raised on top of the base terrain.
    #[serde(default)]
    pub features: Vec<Feature>,
}

/// A terrain feature.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Feature {
    /// A single raised cell.
    Spike {
        /// Column index.
        col: usize,
        /// Row index.
        row: usize,
        /// Elevation of the cell.
        elevation: f32,
    },
    /// A straight wall along a row or column.
    Ridge(Ridge),
}

impl TerrainSpec {
    /// Build the elevation grid this section describes.
    pub fn build(&self) -> Result<ElevationGrid, RunnerError> {
        let mut grid = match &self.rows {
            Some(rows) => {
                let grid = ElevationGrid::from_rows(rows)?;
                let width = self.width.unwrap_or(grid.width());
                let height = self.height.unwrap_or(grid.height());
                if width != grid.width() || height != grid.height() {
                    return Err(RunnerError::ConflictingDimensions {
                        rows_width: grid.width(),
                        rows_height: grid.height(),
                        width,
                        height,
                    });
                }
                grid
            }
            None => match (self.width, self.height) {
                (Some(width), Some(height)) => {
                    ElevationGrid::filled(width, height, self.base_elevation)?
                }
                _ => return Err(RunnerError::MissingDimensions),
            },
        };

        for feature in &self.features {
            match feature {
                Feature::Spike {
                    col,
                    row,
                    elevation,
                } => grid.set(*col, *row, *elevation)?,
                Feature::Ridge(ridge) => grid.add_ridge(ridge)?,
            }
        }

        debug!(
            width = grid.width(),
            height = grid.height(),
            features = self.features.len(),
            "built terrain"
        );
        Ok(grid)
    }
}

/// One sight-line query.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuerySpec {
    /// Label used in reports; defaults to `query-N`.
    #[serde(default)]
    pub name: Option<String>,
    /// Start of the sight line.
    pub observer: EndpointSpec,
    /// End of the sight line.
    pub target: EndpointSpec,
    /// Rays sampled for the graded estimate; overrides the default.
    #[serde(default)]
    pub samples: Option<u32>,
}

impl QuerySpec {
    /// Report label for the query at `index` (zero-based).
    pub fn label(&self, index: usize) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("query-{}", index + 1))
    }
}

/// A query endpoint with either an absolute elevation or a height above
/// the terrain under it.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EndpointSpec {
    /// Column-space coordinate.
    pub x: f64,
    /// Row-space coordinate.
    pub y: f64,
    /// Absolute elevation.
    #[serde(default)]
    pub z: Option<f64>,
    /// Elevation relative to the terrain sample under `(x, y)`.
    #[serde(default)]
    pub height_above_ground: Option<f64>,
}

impl EndpointSpec {
    /// Resolve to a point over `heightmap`.
    pub fn resolve(
        &self,
        heightmap: &Heightmap<'_>,
        query: &str,
        endpoint: &'static str,
    ) -> Result<Point3, RunnerError> {
        match (self.z, self.height_above_ground) {
            (Some(z), None) => Ok(Point3::new(self.x, self.y, z)),
            (None, Some(agl)) => Point3::above_ground(heightmap, self.x, self.y, agl).ok_or_else(
                || RunnerError::EndpointOffTerrain {
                    query: query.to_string(),
                    endpoint,
                    x: self.x,
                    y: self.y,
                },
            ),
            _ => Err(RunnerError::AmbiguousElevation {
                query: query.to_string(),
                endpoint,
            }),
        }
    }
}

/// Load a scenario from a YAML file.
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<Scenario, RunnerError> {
    let path = path.as_ref();
    debug!(path = %path.display(), "loading scenario");
    let content = std::fs::read_to_string(path)?;
    load_scenario_from_str(&content)
}

/// Parse a scenario from a YAML string.
pub fn load_scenario_from_str(yaml: &str) -> Result<Scenario, RunnerError> {
    let scenario: Scenario = serde_yaml::from_str(yaml)?;
    if scenario.queries.is_empty() {
        return Err(RunnerError::NoQueries);
    }
    Ok(scenario)
}
