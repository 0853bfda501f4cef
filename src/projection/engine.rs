//! Cumulative cost model for buying new, buying used, and leasing

use super::series::{ProjectionRecord, ProjectionSeries};
use super::strategy::Strategy;
use crate::error::{ProjectionError, ValidationError};
use crate::parameters::{PartialParameters, ProjectionParameters};
use log::debug;
use serde::{Deserialize, Serialize};

/// Default number of half-year steps (29.5 years)
pub const DEFAULT_PROJECTION_STEPS: u32 = 59;

/// Months between two projection steps
pub const MONTHS_PER_STEP: u32 = 6;

/// Longest accepted horizon (600 years)
pub const MAX_PROJECTION_STEPS: u32 = 1200;

/// Configuration for a projection run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Number of half-year steps to project, starting at month 6
    pub steps: u32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            steps: DEFAULT_PROJECTION_STEPS,
        }
    }
}

/// Cost functions bound to one validated parameter set
#[derive(Debug, Clone, Copy)]
pub struct CostModel<'a> {
    params: &'a ProjectionParameters,
}

impl<'a> CostModel<'a> {
    /// Bind to a parameter record, checking its bounds first
    pub fn new(params: &'a ProjectionParameters) -> Result<Self, ValidationError> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Cumulative cost of a strategy after `age_months`
    pub fn cost(&self, strategy: Strategy, age_months: u32) -> f64 {
        match strategy {
            Strategy::UsedPurchase => {
                self.purchase_cost(age_months, self.params.used_price, self.params.used_age_years)
            }
            Strategy::NewPurchase => self.purchase_cost(age_months, self.params.new_price, 0),
            Strategy::Leasing => self.leasing_cost(age_months),
        }
    }

    /// Cars bought (purchase) or lease cycles entered (leasing) after `age_months`
    pub fn units(&self, strategy: Strategy, age_months: u32) -> i64 {
        match strategy {
            Strategy::UsedPurchase => self.purchase_units(age_months, self.params.used_age_years).0,
            Strategy::NewPurchase => self.purchase_units(age_months, 0).0,
            Strategy::Leasing => self.lease_cycles(age_months),
        }
    }

    /// Service life in months of one car bought at `initial_age_years`
    fn unit_months(&self, initial_age_years: u32) -> i64 {
        // Validation keeps used_age_years below ownership_years
        (i64::from(self.params.ownership_years) - i64::from(initial_age_years)) * 12
    }

    /// (unit count, months into the current unit)
    fn purchase_units(&self, age_months: u32, initial_age_years: u32) -> (i64, i64) {
        let unit_months = self.unit_months(initial_age_years);
        let age = i64::from(age_months);
        (age.div_euclid(unit_months) + 1, age.rem_euclid(unit_months))
    }

    fn purchase_cost(&self, age_months: u32, price: u32, initial_age_years: u32) -> f64 {
        let unit_months = self.unit_months(initial_age_years);
        let (unit_count, age_within_unit) = self.purchase_units(age_months, initial_age_years);

        let principal = unit_count as f64 * f64::from(price);

        // Every replacement starts its own repair-free clock; the used car has
        // already spent part of it
        let repair_free_months =
            (i64::from(self.params.repair_free_years) - i64::from(initial_age_years)).max(0) * 12;
        let past_units = (unit_months - repair_free_months).max(0) * (unit_count - 1);
        let current_unit = (age_within_unit - repair_free_months).max(0);
        let repair_months = (past_units + current_unit) as f64;
        let repair = repair_months * f64::from(self.params.repair_cost_per_year) / 12.0;

        principal + repair
    }

    fn lease_cycles(&self, age_months: u32) -> i64 {
        let term_months = i64::from(self.params.lease_term_years) * 12;
        // Offset by one so the switch lands exactly at each term boundary
        (i64::from(age_months) - 1).div_euclid(term_months) + 1
    }

    fn leasing_cost(&self, age_months: u32) -> f64 {
        let cycles = self.lease_cycles(age_months) as f64;
        let switches = cycles * f64::from(self.params.lease_switch_cost);
        // Flat current rate over the whole period, no rate history
        let rates = f64::from(age_months) * f64::from(self.params.lease_monthly_cost);
        switches + rates
    }
}

/// Stateless projector producing a [`ProjectionSeries`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CostProjector {
    config: ProjectionConfig,
}

impl CostProjector {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Project all three strategies at every half-year step
    pub fn project(
        &self,
        params: &ProjectionParameters,
    ) -> Result<ProjectionSeries, ProjectionError> {
        if self.config.steps > MAX_PROJECTION_STEPS {
            return Err(ProjectionError::HorizonTooLong {
                steps: self.config.steps,
                max: MAX_PROJECTION_STEPS,
            });
        }
        let model = CostModel::new(params)?;
        let mut series = ProjectionSeries::with_capacity(self.config.steps as usize);

        for step in 1..=self.config.steps {
            let month = step * MONTHS_PER_STEP;
            series.push(ProjectionRecord {
                year: f64::from(step) / 2.0,
                month,
                cost_used_purchase: model.cost(Strategy::UsedPurchase, month),
                cost_new_purchase: model.cost(Strategy::NewPurchase, month),
                cost_leasing: model.cost(Strategy::Leasing, month),
            });
        }

        debug!(
            "Projected {} steps (ownership {}y, lease term {}y)",
            series.len(),
            params.ownership_years,
            params.lease_term_years
        );
        Ok(series)
    }

    /// Project from control values, any of which may be unset
    pub fn project_partial(
        &self,
        partial: &PartialParameters,
    ) -> Result<ProjectionSeries, ProjectionError> {
        let params = partial.complete()?;
        self.project(&params)
    }
}

/// Project with the default horizon
pub fn project(params: &ProjectionParameters) -> Result<ProjectionSeries, ProjectionError> {
    CostProjector::default().project(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::{Bound, Field};
    use approx::assert_relative_eq;

    fn reference() -> ProjectionParameters {
        ProjectionParameters::default()
    }

    #[test]
    fn test_projection_runs() {
        let series = project(&reference()).unwrap();

        assert_eq!(series.len(), 59);
        assert_eq!(series.year()[0], 0.5);
        assert_eq!(series.month()[0], 6);
        assert_eq!(series.year()[58], 29.5);
        assert_eq!(series.month()[58], 354);
    }

    #[test]
    fn test_reference_points() {
        let series = project(&reference()).unwrap();

        // Year 0.5: first new car, still inside its repair-free period
        assert_relative_eq!(series.new_purchase_cost()[0], 31_000.0);
        // Year 1: one lease cycle and twelve rates
        assert_relative_eq!(series.lease_cost()[1], 1.0 * 500.0 + 12.0 * 315.0);
        assert_relative_eq!(series.lease_cost()[1], 4_280.0);
    }

    #[test]
    fn test_used_purchase_repairs() {
        let params = reference();
        let model = CostModel::new(&params).unwrap();

        // Used car: 8 years of service, 1 repair-free year left at purchase
        assert_relative_eq!(model.cost(Strategy::UsedPurchase, 6), 22_000.0);
        assert_relative_eq!(model.cost(Strategy::UsedPurchase, 90), 22_000.0 + 78.0 * 125.0);
        // Replacement at month 96: second car, 84 repair months carried from the first
        assert_relative_eq!(model.cost(Strategy::UsedPurchase, 96), 44_000.0 + 84.0 * 125.0);
        assert_eq!(model.units(Strategy::UsedPurchase, 95), 1);
        assert_eq!(model.units(Strategy::UsedPurchase, 96), 2);
    }

    #[test]
    fn test_new_purchase_replacement() {
        let params = reference();
        let model = CostModel::new(&params).unwrap();

        // Repairs start after 36 months; replacement after 120
        assert_relative_eq!(model.cost(Strategy::NewPurchase, 36), 31_000.0);
        assert_relative_eq!(model.cost(Strategy::NewPurchase, 48), 31_000.0 + 12.0 * 125.0);
        assert_relative_eq!(model.cost(Strategy::NewPurchase, 120), 62_000.0 + 84.0 * 125.0);
        assert_relative_eq!(model.cost(Strategy::NewPurchase, 126), 62_000.0 + 84.0 * 125.0);
    }

    #[test]
    fn test_repair_cost_not_truncated() {
        let params = reference().with(Field::RepairCostPerYear, 1_000);
        let model = CostModel::new(&params).unwrap();

        // 6 repair months at 1000/12 per month
        assert_relative_eq!(model.cost(Strategy::NewPurchase, 42), 31_000.0 + 500.0);
        assert_relative_eq!(model.cost(Strategy::NewPurchase, 37), 31_000.0 + 1_000.0 / 12.0);
    }

    #[test]
    fn test_lease_switch_at_term_boundary() {
        let params = reference();
        let model = CostModel::new(&params).unwrap();

        assert_eq!(model.units(Strategy::Leasing, 0), 0);
        assert_eq!(model.units(Strategy::Leasing, 1), 1);
        assert_eq!(model.units(Strategy::Leasing, 24), 1);
        assert_eq!(model.units(Strategy::Leasing, 25), 2);
        assert_relative_eq!(model.cost(Strategy::Leasing, 24), 500.0 + 24.0 * 315.0);
        assert_relative_eq!(model.cost(Strategy::Leasing, 30), 1_000.0 + 30.0 * 315.0);
    }

    #[test]
    fn test_repair_free_longer_than_service_life() {
        // Repair-free period outlasts the car: no repairs ever
        let params = reference()
            .with(Field::OwnershipYears, 4)
            .with(Field::RepairFreeYears, 6);
        let series = project(&params).unwrap();

        for (record, units) in series.records().map(|r| (r, r.month / 48 + 1)) {
            assert_relative_eq!(record.cost_new_purchase, f64::from(units) * 31_000.0);
        }
    }

    #[test]
    fn test_custom_horizon() {
        let projector = CostProjector::new(ProjectionConfig { steps: 29 });
        let series = projector.project(&reference()).unwrap();
        assert_eq!(series.len(), 29);
        assert_eq!(series.year().last(), Some(&14.5));
    }

    #[test]
    fn test_horizon_limit() {
        let at_limit = CostProjector::new(ProjectionConfig { steps: MAX_PROJECTION_STEPS });
        let series = at_limit.project(&reference()).unwrap();
        assert_eq!(series.len(), MAX_PROJECTION_STEPS as usize);
        assert_eq!(series.month()[series.len() - 1], MAX_PROJECTION_STEPS * MONTHS_PER_STEP);

        let too_long = CostProjector::new(ProjectionConfig { steps: 800_000_000 });
        assert_eq!(
            too_long.project(&reference()),
            Err(ProjectionError::HorizonTooLong {
                steps: 800_000_000,
                max: MAX_PROJECTION_STEPS,
            })
        );
    }

    #[test]
    fn test_invalid_record_rejected() {
        let params = reference().with(Field::LeaseTermYears, 0);
        assert_eq!(
            project(&params),
            Err(ProjectionError::Validation(ValidationError::OutOfBounds {
                field: Field::LeaseTermYears,
                bound: Bound::Positive,
            }))
        );
    }

    #[test]
    fn test_partial_missing_parameter() {
        let mut partial = PartialParameters::from(reference());
        partial.new_price = None;

        let err = CostProjector::default().project_partial(&partial).unwrap_err();
        assert_eq!(err, ProjectionError::MissingParameter(Field::NewPrice));
        assert!(err.is_caller_error());
    }

    #[test]
    fn test_partial_matches_full() {
        let partial = PartialParameters::from(reference());
        let projector = CostProjector::default();
        assert_eq!(
            projector.project_partial(&partial).unwrap(),
            projector.project(&reference()).unwrap()
        );
    }
}
