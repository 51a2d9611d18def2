//! Running a scenario and rendering its results.

use crate::scenario::Scenario;
use crate::RunnerError;
use los_link::{
    Estimate, Point3, RayTraversal, SamplePattern, Segment, Visibility, VisibilityEstimator,
};
use serde::Serialize;
use std::fmt::Write as _;
use tracing::{debug, info};

/// Options that override scenario settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Sample count forced on every query.
    pub samples: Option<u32>,
    /// Evaluate sampled rays on the rayon thread pool.
    pub parallel: bool,
}

/// Result of one query.
#[derive(Debug, Clone, Serialize)]
pub struct QueryReport {
    /// Query label.
    pub name: String,
    /// Resolved observer position.
    pub observer: Point3,
    /// Resolved target position.
    pub target: Point3,
    /// Outcome of the direct sight line.
    pub visibility: Visibility,
    /// `1.0` when the direct sight line is clear, else `0.0`.
    pub los: f64,
    /// Clear rays out of the sampled bundle.
    pub estimate: Estimate,
    /// `estimate.clear / estimate.samples`.
    pub probability: f64,
}

/// Result of a whole scenario.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Terrain width in columns.
    pub width: usize,
    /// Terrain height in rows.
    pub height: usize,
    /// Lowest terrain sample.
    pub min_elevation: f32,
    /// Highest terrain sample.
    pub max_elevation: f32,
    /// Per-query results, in scenario order.
    pub queries: Vec<QueryReport>,
}

/// Evaluate every query of `scenario`.
pub fn run_scenario(scenario: &Scenario, options: &RunOptions) -> Result<RunReport, RunnerError> {
    let grid = scenario.terrain.build()?;
    let map = grid.as_heightmap();
    let (min_elevation, max_elevation) = map.min_max();
    info!(
        width = map.width(),
        height = map.height(),
        min_elevation,
        max_elevation,
        queries = scenario.queries.len(),
        "running scenario"
    );

    let traversal = RayTraversal::new(&map);
    let estimator = VisibilityEstimator::new(&map);

    let mut queries = Vec::with_capacity(scenario.queries.len());
    for (index, query) in scenario.queries.iter().enumerate() {
        let name = query.label(index);
        let observer = query.observer.resolve(&map, &name, "observer")?;
        let target = query.target.resolve(&map, &name, "target")?;
        let segment = Segment::new(observer, target)?;

        let samples = options
            .samples
            .or(query.samples)
            .unwrap_or(scenario.defaults.samples);
        let pattern = SamplePattern::new(samples)?;

        let visibility = traversal.traverse(&segment);
        let estimate = if options.parallel {
            estimator.estimate_parallel(&segment, &pattern)
        } else {
            estimator.estimate_detailed(&segment, &pattern)
        };
        debug!(query = %name, %visibility, clear = estimate.clear, samples, "query evaluated");

        queries.push(QueryReport {
            name,
            observer,
            target,
            visibility,
            los: visibility.score(),
            estimate,
            probability: estimate.probability(),
        });
    }

    Ok(RunReport {
        width: map.width(),
        height: map.height(),
        min_elevation,
        max_elevation,
        queries,
    })
}

impl RunReport {
    /// Human-readable summary.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Terrain: {}x{}, elevation {:.2} to {:.2}",
            self.width, self.height, self.min_elevation, self.max_elevation
        );
        for q in &self.queries {
            let _ = writeln!(out);
            let _ = writeln!(out, "=== {} ===", q.name);
            let _ = writeln!(
                out,
                "Observer: ({:.1}, {:.1}, {:.1})",
                q.observer.x, q.observer.y, q.observer.z
            );
            let _ = writeln!(
                out,
                "Target:   ({:.1}, {:.1}, {:.1})",
                q.target.x, q.target.y, q.target.z
            );
            let _ = writeln!(out, "LOS visible: {} ({})", q.los, q.visibility);
            let _ = writeln!(
                out,
                "LOS probability: {:.4} ({}/{} rays clear)",
                q.probability, q.estimate.clear, q.estimate.samples
            );
        }
        out
    }

    /// Pretty-printed JSON.
    pub fn render_json(&self) -> Result<String, RunnerError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
