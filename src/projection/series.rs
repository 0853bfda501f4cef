//! Projection output: cumulative cost per strategy on a half-year time axis

use super::strategy::Strategy;
use serde::{Deserialize, Serialize};

/// One time step of a projection (record-oriented form)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRecord {
    /// Elapsed time in years
    pub year: f64,
    /// Elapsed time in months
    pub month: u32,
    pub cost_used_purchase: f64,
    pub cost_new_purchase: f64,
    pub cost_leasing: f64,
}

impl ProjectionRecord {
    pub fn cost(&self, strategy: Strategy) -> f64 {
        match strategy {
            Strategy::UsedPurchase => self.cost_used_purchase,
            Strategy::NewPurchase => self.cost_new_purchase,
            Strategy::Leasing => self.cost_leasing,
        }
    }

    /// Cheapest strategy at this step, first in [`Strategy::ALL`] on ties
    pub fn cheapest(&self) -> Strategy {
        let mut best = Strategy::UsedPurchase;
        for strategy in Strategy::ALL {
            if self.cost(strategy) < self.cost(best) {
                best = strategy;
            }
        }
        best
    }
}

/// Complete projection result (column-oriented form)
///
/// Points are only ever appended whole, so all five columns share one length.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectionSeries {
    year: Vec<f64>,
    month: Vec<u32>,
    #[serde(rename = "cost_used_purchase")]
    used_purchase_cost: Vec<f64>,
    #[serde(rename = "cost_new_purchase")]
    new_purchase_cost: Vec<f64>,
    #[serde(rename = "cost_leasing")]
    lease_cost: Vec<f64>,
}

impl ProjectionSeries {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            year: Vec::with_capacity(capacity),
            month: Vec::with_capacity(capacity),
            used_purchase_cost: Vec::with_capacity(capacity),
            new_purchase_cost: Vec::with_capacity(capacity),
            lease_cost: Vec::with_capacity(capacity),
        }
    }

    /// Append one time step
    pub fn push(&mut self, record: ProjectionRecord) {
        self.year.push(record.year);
        self.month.push(record.month);
        self.used_purchase_cost.push(record.cost_used_purchase);
        self.new_purchase_cost.push(record.cost_new_purchase);
        self.lease_cost.push(record.cost_leasing);
    }

    pub fn len(&self) -> usize {
        self.year.len()
    }

    pub fn is_empty(&self) -> bool {
        self.year.is_empty()
    }

    pub fn year(&self) -> &[f64] {
        &self.year
    }

    pub fn month(&self) -> &[u32] {
        &self.month
    }

    pub fn used_purchase_cost(&self) -> &[f64] {
        &self.used_purchase_cost
    }

    pub fn new_purchase_cost(&self) -> &[f64] {
        &self.new_purchase_cost
    }

    pub fn lease_cost(&self) -> &[f64] {
        &self.lease_cost
    }

    /// Cost column for a strategy
    pub fn costs(&self, strategy: Strategy) -> &[f64] {
        match strategy {
            Strategy::UsedPurchase => &self.used_purchase_cost,
            Strategy::NewPurchase => &self.new_purchase_cost,
            Strategy::Leasing => &self.lease_cost,
        }
    }

    /// Time step at an index
    pub fn get(&self, idx: usize) -> Option<ProjectionRecord> {
        Some(ProjectionRecord {
            year: *self.year.get(idx)?,
            month: self.month[idx],
            cost_used_purchase: self.used_purchase_cost[idx],
            cost_new_purchase: self.new_purchase_cost[idx],
            cost_leasing: self.lease_cost[idx],
        })
    }

    /// Iterate time steps in order
    pub fn records(&self) -> impl Iterator<Item = ProjectionRecord> + '_ {
        (0..self.len()).filter_map(move |idx| self.get(idx))
    }

    pub fn cheapest_at(&self, idx: usize) -> Option<Strategy> {
        self.get(idx).map(|record| record.cheapest())
    }

    /// First year at which `candidate` costs no more than `reference`
    pub fn break_even_year(&self, candidate: Strategy, reference: Strategy) -> Option<f64> {
        self.records()
            .find(|record| record.cost(candidate) <= record.cost(reference))
            .map(|record| record.year)
    }

    /// Totals at the end of the horizon
    pub fn summary(&self) -> ProjectionSummary {
        let last = self.len().checked_sub(1).and_then(|idx| self.get(idx));

        ProjectionSummary {
            steps: self.len(),
            final_year: last.map(|r| r.year).unwrap_or(0.0),
            final_used_purchase: last.map(|r| r.cost_used_purchase).unwrap_or(0.0),
            final_new_purchase: last.map(|r| r.cost_new_purchase).unwrap_or(0.0),
            final_leasing: last.map(|r| r.cost_leasing).unwrap_or(0.0),
            cheapest: last.map(|r| r.cheapest()),
        }
    }
}

impl FromIterator<ProjectionRecord> for ProjectionSeries {
    fn from_iter<I: IntoIterator<Item = ProjectionRecord>>(iter: I) -> Self {
        let mut series = ProjectionSeries::default();
        for record in iter {
            series.push(record);
        }
        series
    }
}

/// Summary of a projection at its final step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub steps: usize,
    pub final_year: f64,
    pub final_used_purchase: f64,
    pub final_new_purchase: f64,
    pub final_leasing: f64,
    /// None for an empty series
    pub cheapest: Option<Strategy>,
}
