//! Projection parameters: the validated record, its raw and partial input forms,
//! and the dashboard control descriptors

mod data;
mod validation;
pub mod controls;

pub use data::{Bound, Field, PartialParameters, ProjectionParameters};
pub use validation::{parse_parameters, RawParameters, RawValue};
pub use controls::{control, ControlKind, ControlRange, CONTROLS};
