//! Parameter records for a cost projection

use crate::error::{ProjectionError, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The nine projection inputs, declared in validation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Years a purchased car is kept before replacement
    OwnershipYears,
    /// Purchase price of a new car
    NewPrice,
    /// Purchase price of a used car
    UsedPrice,
    /// Age of the used car at acquisition
    UsedAgeYears,
    /// Recurring monthly leasing payment
    LeaseMonthlyCost,
    /// One-time cost paid each time a lease is switched
    LeaseSwitchCost,
    /// Length of one lease cycle
    LeaseTermYears,
    /// Annual repair cost once a car leaves its repair-free period
    RepairCostPerYear,
    /// Years from a car's age zero during which no repairs are charged
    RepairFreeYears,
}

impl Field {
    /// All fields in the fixed order validation walks them
    pub const ALL: [Field; 9] = [
        Field::OwnershipYears,
        Field::NewPrice,
        Field::UsedPrice,
        Field::UsedAgeYears,
        Field::LeaseMonthlyCost,
        Field::LeaseSwitchCost,
        Field::LeaseTermYears,
        Field::RepairCostPerYear,
        Field::RepairFreeYears,
    ];

    /// Canonical parameter name
    pub fn name(self) -> &'static str {
        match self {
            Field::OwnershipYears => "ownership_years",
            Field::NewPrice => "new_price",
            Field::UsedPrice => "used_price",
            Field::UsedAgeYears => "used_age_years",
            Field::LeaseMonthlyCost => "lease_monthly_cost",
            Field::LeaseSwitchCost => "lease_switch_cost",
            Field::LeaseTermYears => "lease_term_years",
            Field::RepairCostPerYear => "repair_cost_per_year",
            Field::RepairFreeYears => "repair_free_years",
        }
    }

    /// Name used by existing dashboard clients on the wire
    pub fn legacy_name(self) -> &'static str {
        match self {
            Field::OwnershipYears => "purchase_years",
            Field::NewPrice => "purchase_new_price",
            Field::UsedPrice => "purchase_used_price",
            Field::UsedAgeYears => "purchase_used_age",
            Field::LeaseMonthlyCost => "leasing_cost_per_month",
            Field::LeaseSwitchCost => "leasing_switch_cost",
            Field::LeaseTermYears => "leasing_years",
            Field::RepairCostPerYear => "repair_cost_per_year",
            Field::RepairFreeYears => "repair_free_years",
        }
    }

    /// Look up a field by canonical or legacy name
    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL
            .into_iter()
            .find(|field| field.name() == name || field.legacy_name() == name)
    }

    /// Lower bound enforced by validation
    pub fn bound(self) -> Bound {
        match self {
            Field::UsedAgeYears | Field::RepairCostPerYear | Field::RepairFreeYears => {
                Bound::NonNegative
            }
            _ => Bound::Positive,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Range constraint on a coerced integer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// Strictly greater than zero
    Positive,
    /// Zero or more
    NonNegative,
    /// No larger than the given value
    AtMost(u64),
}

impl Bound {
    pub fn admits(self, value: i64) -> bool {
        match self {
            Bound::Positive => value > 0,
            Bound::NonNegative => value >= 0,
            // Negative values are left to the sign bounds
            Bound::AtMost(max) => u64::try_from(value).map_or(true, |value| value <= max),
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Positive => f.write_str("greater than 0"),
            Bound::NonNegative => f.write_str("greater than or equal to 0"),
            Bound::AtMost(max) => write!(f, "at most {}", max),
        }
    }
}

/// Validated inputs of one projection
///
/// Build through [`RawParameters::validate`](super::RawParameters::validate) for
/// untrusted input. Records assembled by hand are re-checked by the projector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionParameters {
    pub ownership_years: u32,
    pub new_price: u32,
    pub used_price: u32,
    pub used_age_years: u32,
    pub lease_monthly_cost: u32,
    pub lease_switch_cost: u32,
    pub lease_term_years: u32,
    pub repair_cost_per_year: u32,
    pub repair_free_years: u32,
}

impl ProjectionParameters {
    /// Build from values given in [`Field::ALL`] order
    pub(crate) fn from_values(values: [u32; 9]) -> Self {
        let [
            ownership_years,
            new_price,
            used_price,
            used_age_years,
            lease_monthly_cost,
            lease_switch_cost,
            lease_term_years,
            repair_cost_per_year,
            repair_free_years,
        ] = values;
        Self {
            ownership_years,
            new_price,
            used_price,
            used_age_years,
            lease_monthly_cost,
            lease_switch_cost,
            lease_term_years,
            repair_cost_per_year,
            repair_free_years,
        }
    }

    /// Value of a single field
    pub fn get(&self, field: Field) -> u32 {
        match field {
            Field::OwnershipYears => self.ownership_years,
            Field::NewPrice => self.new_price,
            Field::UsedPrice => self.used_price,
            Field::UsedAgeYears => self.used_age_years,
            Field::LeaseMonthlyCost => self.lease_monthly_cost,
            Field::LeaseSwitchCost => self.lease_switch_cost,
            Field::LeaseTermYears => self.lease_term_years,
            Field::RepairCostPerYear => self.repair_cost_per_year,
            Field::RepairFreeYears => self.repair_free_years,
        }
    }

    /// Copy with one field replaced
    pub fn with(mut self, field: Field, value: u32) -> Self {
        let slot = match field {
            Field::OwnershipYears => &mut self.ownership_years,
            Field::NewPrice => &mut self.new_price,
            Field::UsedPrice => &mut self.used_price,
            Field::UsedAgeYears => &mut self.used_age_years,
            Field::LeaseMonthlyCost => &mut self.lease_monthly_cost,
            Field::LeaseSwitchCost => &mut self.lease_switch_cost,
            Field::LeaseTermYears => &mut self.lease_term_years,
            Field::RepairCostPerYear => &mut self.repair_cost_per_year,
            Field::RepairFreeYears => &mut self.repair_free_years,
        };
        *slot = value;
        self
    }

    /// Check every bound in [`Field::ALL`] order, then the used-age constraint
    pub fn validate(&self) -> Result<(), ValidationError> {
        for field in Field::ALL {
            let bound = field.bound();
            if !bound.admits(i64::from(self.get(field))) {
                return Err(ValidationError::OutOfBounds { field, bound });
            }
        }
        self.check_used_age()
    }

    pub(crate) fn check_used_age(&self) -> Result<(), ValidationError> {
        if self.used_age_years >= self.ownership_years {
            return Err(ValidationError::UsedAgeNotBelowOwnership {
                used_age_years: self.used_age_years,
                ownership_years: self.ownership_years,
            });
        }
        Ok(())
    }
}

impl Default for ProjectionParameters {
    /// The dashboard's initial control values
    fn default() -> Self {
        let mut values = [0; 9];
        for (slot, field) in values.iter_mut().zip(Field::ALL) {
            *slot = super::control(field).default;
        }
        Self::from_values(values)
    }
}

/// Numeric inputs as supplied by interactive controls, any of which may be unset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialParameters {
    pub ownership_years: Option<u32>,
    pub new_price: Option<u32>,
    pub used_price: Option<u32>,
    pub used_age_years: Option<u32>,
    pub lease_monthly_cost: Option<u32>,
    pub lease_switch_cost: Option<u32>,
    pub lease_term_years: Option<u32>,
    pub repair_cost_per_year: Option<u32>,
    pub repair_free_years: Option<u32>,
}

impl PartialParameters {
    pub fn get(&self, field: Field) -> Option<u32> {
        match field {
            Field::OwnershipYears => self.ownership_years,
            Field::NewPrice => self.new_price,
            Field::UsedPrice => self.used_price,
            Field::UsedAgeYears => self.used_age_years,
            Field::LeaseMonthlyCost => self.lease_monthly_cost,
            Field::LeaseSwitchCost => self.lease_switch_cost,
            Field::LeaseTermYears => self.lease_term_years,
            Field::RepairCostPerYear => self.repair_cost_per_year,
            Field::RepairFreeYears => self.repair_free_years,
        }
    }

    /// Fill a complete record, failing on the first unset field
    pub fn complete(&self) -> Result<ProjectionParameters, ProjectionError> {
        let mut values = [0; 9];
        for (slot, field) in values.iter_mut().zip(Field::ALL) {
            *slot = self.get(field).ok_or(ProjectionError::MissingParameter(field))?;
        }
        Ok(ProjectionParameters::from_values(values))
    }
}

impl From<ProjectionParameters> for PartialParameters {
    fn from(params: ProjectionParameters) -> Self {
        Self {
            ownership_years: Some(params.ownership_years),
            new_price: Some(params.new_price),
            used_price: Some(params.used_price),
            used_age_years: Some(params.used_age_years),
            lease_monthly_cost: Some(params.lease_monthly_cost),
            lease_switch_cost: Some(params.lease_switch_cost),
            lease_term_years: Some(params.lease_term_years),
            repair_cost_per_year: Some(params.repair_cost_per_year),
            repair_free_years: Some(params.repair_free_years),
        }
    }
}
