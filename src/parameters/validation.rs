//! Parsing untyped request values into [`ProjectionParameters`]
//!
//! Coercion runs over every field first, then bounds are checked in
//! [`Field::ALL`] order. The first failure rejects the whole input.

use super::data::{Bound, Field, ProjectionParameters};
use crate::error::ValidationError;
use serde::Deserialize;
use std::collections::HashMap;

/// A single untyped input value
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl RawValue {
    /// Integer coercion: floats truncate toward zero, text must parse as an integer
    fn to_integer(&self, field: Field) -> Result<i64, ValidationError> {
        match self {
            RawValue::Integer(value) => Ok(*value),
            RawValue::Float(value) if value.is_finite() => Ok(value.trunc() as i64),
            RawValue::Float(value) => Err(ValidationError::NotANumber {
                field,
                value: value.to_string(),
            }),
            RawValue::Text(text) => text.trim().parse().map_err(|_| ValidationError::NotANumber {
                field,
                value: text.clone(),
            }),
        }
    }
}

impl From<&str> for RawValue {
    fn from(text: &str) -> Self {
        RawValue::Text(text.to_string())
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Integer(value)
    }
}

/// Unvalidated parameter values keyed by field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawParameters {
    values: HashMap<Field, RawValue>,
}

impl RawParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect string pairs (e.g. query parameters), accepting canonical and legacy names
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut raw = Self::new();
        for (key, value) in pairs {
            raw.insert(key.as_ref(), RawValue::from(value.as_ref()))?;
        }
        Ok(raw)
    }

    /// Store a value; later values for the same field replace earlier ones
    pub fn insert(&mut self, key: &str, value: RawValue) -> Result<(), ValidationError> {
        let field =
            Field::from_name(key).ok_or_else(|| ValidationError::UnknownField(key.to_string()))?;
        self.values.insert(field, value);
        Ok(())
    }

    /// Coerce and bound-check into a complete record
    pub fn validate(&self) -> Result<ProjectionParameters, ValidationError> {
        let mut coerced = [0i64; 9];
        for (slot, field) in coerced.iter_mut().zip(Field::ALL) {
            let raw = self.values.get(&field).ok_or(ValidationError::Missing(field))?;
            *slot = raw.to_integer(field)?;
        }

        let ceiling = Bound::AtMost(u64::from(u32::MAX));
        let mut values = [0u32; 9];
        for ((slot, field), value) in values.iter_mut().zip(Field::ALL).zip(coerced) {
            for bound in [field.bound(), ceiling] {
                if !bound.admits(value) {
                    return Err(ValidationError::OutOfBounds { field, bound });
                }
            }
            // Non-negative and at most u32::MAX
            *slot = value as u32;
        }

        let params = ProjectionParameters::from_values(values);
        params.check_used_age()?;
        Ok(params)
    }
}

impl TryFrom<HashMap<String, RawValue>> for RawParameters {
    type Error = ValidationError;

    fn try_from(map: HashMap<String, RawValue>) -> Result<Self, Self::Error> {
        let mut raw = Self::new();
        for (key, value) in map {
            raw.insert(&key, value)?;
        }
        Ok(raw)
    }
}

/// Parse and validate string pairs in one step
pub fn parse_parameters<I, K, V>(pairs: I) -> Result<ProjectionParameters, ValidationError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    RawParameters::from_pairs(pairs)?.validate()
}
