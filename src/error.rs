//! Error types for parameter validation and projection
//!
//! The two kinds are kept apart so a request boundary can tell a rejected input
//! (`ValidationError`) from a caller that skipped validation
//! (`ProjectionError::MissingParameter`).

use crate::parameters::{Bound, Field};
use thiserror::Error;

/// A raw parameter set was rejected as a whole
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Key that names none of the projection parameters
    #[error("unknown parameter: {0}")]
    UnknownField(String),

    /// Required field absent from the input
    #[error("{0} is required")]
    Missing(Field),

    /// Field present but not coercible to an integer
    #[error("{field} is not a number: {value:?}")]
    NotANumber { field: Field, value: String },

    /// Field coerced but outside its bound
    #[error("{field} must be {bound}")]
    OutOfBounds { field: Field, bound: Bound },

    /// Used car is already at (or past) the end of its ownership horizon
    #[error(
        "used_age_years ({used_age_years}) must be less than ownership_years ({ownership_years})"
    )]
    UsedAgeNotBelowOwnership {
        used_age_years: u32,
        ownership_years: u32,
    },
}

/// A projection could not be computed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectionError {
    /// Parameter record violates a bound
    #[error("invalid parameters: {0}")]
    Validation(#[from] ValidationError),

    /// Projector invoked with an incomplete parameter record
    #[error("missing parameter: {0}")]
    MissingParameter(Field),

    /// Requested horizon longer than the projector supports
    #[error("horizon of {steps} steps exceeds the maximum of {max}")]
    HorizonTooLong { steps: u32, max: u32 },
}

impl ProjectionError {
    /// True when the failure is a programming error in the caller rather than bad user input
    pub fn is_caller_error(&self) -> bool {
        matches!(self, ProjectionError::MissingParameter(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_field() {
        let err = ValidationError::OutOfBounds {
            field: Field::LeaseTermYears,
            bound: Bound::Positive,
        };
        assert_eq!(err.to_string(), "lease_term_years must be greater than 0");

        let err = ValidationError::OutOfBounds {
            field: Field::RepairFreeYears,
            bound: Bound::NonNegative,
        };
        assert_eq!(err.to_string(), "repair_free_years must be greater than or equal to 0");
    }

    #[test]
    fn test_error_kinds_distinguishable() {
        let missing = ProjectionError::MissingParameter(Field::NewPrice);
        let invalid: ProjectionError = ValidationError::Missing(Field::NewPrice).into();

        assert!(missing.is_caller_error());
        assert!(!invalid.is_caller_error());
    }
}
