//! # los-runner
//!
//! Scenario runner for line-of-sight queries.
//!
//! A scenario is a YAML file describing synthetic terrain (a flat base,
//! inline rows, spikes, ridges) and a list of observer/target pairs. Each
//! query is evaluated with both the binary traversal and the graded
//! estimate from `los-link`, and the results are rendered as text or JSON.

mod error;
mod report;
mod scenario;

pub use error::RunnerError;
pub use report::{run_scenario, QueryReport, RunOptions, RunReport};
pub use scenario::{
    load_scenario, load_scenario_from_str, Defaults, EndpointSpec, Feature, QuerySpec, Scenario,
    TerrainSpec,
};
