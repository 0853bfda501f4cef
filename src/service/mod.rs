//! Prediction API: configuration, bearer-token auth and request handling

pub mod auth;
pub mod config;
mod handler;

pub use auth::{authenticate, bearer_header, AuthError};
pub use config::{ConfigError, Endpoint, ServiceConfig};
pub use handler::{ApiRequest, ApiResponse, PredictionService, ORIENTATION_PARAM, PREDICTION_PATH};
