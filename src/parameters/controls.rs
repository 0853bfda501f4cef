//! Control descriptors for the interactive dashboard
//!
//! One entry per [`Field`], in the same order. Minimums never undercut the
//! validation bounds, so every control position inside a range validates on its
//! own (the used-age/ownership pairing is still checked separately).

use super::data::Field;
use serde::Serialize;

/// Widget used to enter a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    Slider,
    NumberInput,
}

/// Range, step and starting value of one input control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ControlRange {
    pub field: Field,
    pub kind: ControlKind,
    pub min: u32,
    pub max: u32,
    pub step: u32,
    pub default: u32,
}

impl ControlRange {
    /// Whether a value is reachable with this control
    pub fn contains(&self, value: u32) -> bool {
        value >= self.min && value <= self.max && (value - self.min) % self.step == 0
    }

    /// Every selectable position, ascending
    pub fn positions(&self) -> impl Iterator<Item = u32> {
        (self.min..=self.max).step_by(self.step as usize)
    }
}

pub const CONTROLS: [ControlRange; 9] = [
    ControlRange {
        field: Field::OwnershipYears,
        kind: ControlKind::Slider,
        min: 5,
        max: 20,
        step: 1,
        default: 10,
    },
    ControlRange {
        field: Field::NewPrice,
        kind: ControlKind::NumberInput,
        min: 10_000,
        max: 4_000_000,
        step: 1_000,
        default: 31_000,
    },
    ControlRange {
        field: Field::UsedPrice,
        kind: ControlKind::NumberInput,
        min: 10_000,
        max: 4_000_000,
        step: 1_000,
        default: 22_000,
    },
    ControlRange {
        field: Field::UsedAgeYears,
        kind: ControlKind::Slider,
        min: 0,
        max: 10,
        step: 1,
        default: 2,
    },
    ControlRange {
        field: Field::LeaseMonthlyCost,
        kind: ControlKind::NumberInput,
        min: 100,
        max: 5_000,
        step: 5,
        default: 315,
    },
    // Switch cost must be positive, so the range starts one step above zero
    ControlRange {
        field: Field::LeaseSwitchCost,
        kind: ControlKind::NumberInput,
        min: 100,
        max: 10_000,
        step: 100,
        default: 500,
    },
    ControlRange {
        field: Field::LeaseTermYears,
        kind: ControlKind::Slider,
        min: 1,
        max: 6,
        step: 1,
        default: 2,
    },
    ControlRange {
        field: Field::RepairCostPerYear,
        kind: ControlKind::NumberInput,
        min: 0,
        max: 10_000,
        step: 100,
        default: 1_500,
    },
    ControlRange {
        field: Field::RepairFreeYears,
        kind: ControlKind::Slider,
        min: 0,
        max: 10,
        step: 1,
        default: 3,
    },
];

/// Descriptor for a field
pub fn control(field: Field) -> &'static ControlRange {
    // Field discriminants follow declaration order, which CONTROLS mirrors
    &CONTROLS[field as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_controls_follow_field_order() {
        for (control, field) in CONTROLS.iter().zip(Field::ALL) {
            assert_eq!(control.field, field);
        }
    }

    #[test]
    fn test_ranges_respect_bounds() {
        for control in &CONTROLS {
            assert!(control.min <= control.default && control.default <= control.max);
            assert!(control.contains(control.default), "{} default off-step", control.field);
            assert!(control.field.bound().admits(i64::from(control.min)), "{} min", control.field);
        }
    }

    #[test]
    fn test_positions() {
        let ownership = control(Field::OwnershipYears);
        let positions: Vec<u32> = ownership.positions().collect();
        assert_eq!(positions.len(), 16);
        assert_eq!(positions.first(), Some(&5));
        assert_eq!(positions.last(), Some(&20));

        let lease = control(Field::LeaseMonthlyCost);
        assert!(lease.contains(315));
        assert!(!lease.contains(317));
        assert!(!lease.contains(5_005));
    }
}
