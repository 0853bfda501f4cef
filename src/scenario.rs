//! Scenario runner for batch projections
//!
//! Projections share no state, so batches run in parallel.

use crate::error::ProjectionError;
use crate::parameters::{Field, ProjectionParameters};
use crate::projection::{CostProjector, ProjectionConfig, ProjectionSeries};
use log::info;
use rayon::prelude::*;

/// Runner applying one projection config to many parameter sets
///
/// # Example
/// ```
/// use car_cost_projection::{ProjectionParameters, ScenarioRunner};
///
/// let runner = ScenarioRunner::new();
/// let sweep = runner.sweep_ownership_years(&ProjectionParameters::default(), 5..=20);
/// assert_eq!(sweep.len(), 16);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ScenarioRunner {
    projector: CostProjector,
}

impl ScenarioRunner {
    /// Runner with the default 59-step horizon
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ProjectionConfig) -> Self {
        Self {
            projector: CostProjector::new(config),
        }
    }

    pub fn config(&self) -> &ProjectionConfig {
        self.projector.config()
    }

    /// Run a single projection
    pub fn run(&self, params: &ProjectionParameters) -> Result<ProjectionSeries, ProjectionError> {
        self.projector.project(params)
    }

    /// Run every parameter set, failing if any of them is invalid
    pub fn run_batch(
        &self,
        params: &[ProjectionParameters],
    ) -> Result<Vec<ProjectionSeries>, ProjectionError> {
        info!("Running {} projections", params.len());
        params.par_iter().map(|p| self.projector.project(p)).collect()
    }

    /// Project `base` once per ownership horizon
    ///
    /// Horizons that leave the used car no service life come back as errors
    /// alongside the valid ones.
    pub fn sweep_ownership_years<I>(
        &self,
        base: &ProjectionParameters,
        years: I,
    ) -> Vec<(u32, Result<ProjectionSeries, ProjectionError>)>
    where
        I: IntoIterator<Item = u32>,
    {
        let years: Vec<u32> = years.into_iter().collect();
        years
            .par_iter()
            .map(|&y| (y, self.projector.project(&base.with(Field::OwnershipYears, y))))
            .collect()
    }
}
