//! Cost projection over a half-year time axis

mod engine;
mod series;
mod strategy;

pub use engine::{
    project, CostModel, CostProjector, ProjectionConfig, DEFAULT_PROJECTION_STEPS,
    MAX_PROJECTION_STEPS, MONTHS_PER_STEP,
};
pub use series::{ProjectionRecord, ProjectionSeries, ProjectionSummary};
pub use strategy::Strategy;
