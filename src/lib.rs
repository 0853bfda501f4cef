//! Car Cost Projection - cumulative ownership cost of buying new, buying used, or leasing
//!
//! This library provides:
//! - Parameter parsing and validation for the nine projection inputs
//! - The cost model with replacement cycles, repair-free periods and lease switches
//! - Half-year projection series with summary and break-even queries
//! - Parallel scenario runs (e.g. sweeping the ownership horizon)
//! - JSON (columns/records) and CSV output
//! - A transport-independent prediction API with bearer-token auth and CORS

pub mod error;
pub mod parameters;
pub mod projection;
pub mod scenario;
pub mod export;
pub mod service;

// Re-export commonly used types
pub use error::{ProjectionError, ValidationError};
pub use parameters::{Field, PartialParameters, ProjectionParameters, RawParameters, RawValue};
pub use projection::{
    project, CostProjector, ProjectionConfig, ProjectionRecord, ProjectionSeries, ProjectionSummary,
    Strategy,
};
pub use scenario::ScenarioRunner;
