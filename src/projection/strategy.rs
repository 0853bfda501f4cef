//! The three acquisition strategies compared by a projection

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Buy a used car, replace it when it reaches the ownership horizon
    UsedPurchase,
    /// Buy a new car, replace it when it reaches the ownership horizon
    NewPurchase,
    /// Lease, switching cars at the end of every lease term
    Leasing,
}

impl Strategy {
    /// All strategies; ties between equal costs resolve in this order
    pub const ALL: [Strategy; 3] =
        [Strategy::UsedPurchase, Strategy::NewPurchase, Strategy::Leasing];

    /// Column key in serialized output
    pub fn key(self) -> &'static str {
        match self {
            Strategy::UsedPurchase => "cost_used_purchase",
            Strategy::NewPurchase => "cost_new_purchase",
            Strategy::Leasing => "cost_leasing",
        }
    }

    /// Human-readable name for legends and tables
    pub fn label(self) -> &'static str {
        match self {
            Strategy::UsedPurchase => "Used purchase",
            Strategy::NewPurchase => "New purchase",
            Strategy::Leasing => "Leasing",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
