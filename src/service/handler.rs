//! Transport-independent handling of prediction requests
//!
//! The Lambda binary converts its events into [`ApiRequest`] and sends
//! [`ApiResponse`] back unchanged, so all routing, auth and CORS decisions live here.

use super::auth::{authenticate, AuthError};
use super::config::ServiceConfig;
use crate::export::{to_json_value, Orientation};
use crate::parameters::RawParameters;
use crate::projection::CostProjector;
use log::{error, info, warn};
use serde_json::{json, Value};

/// Path of the projection endpoint
pub const PREDICTION_PATH: &str = "/prediction";

/// Query key selecting the JSON layout
pub const ORIENTATION_PARAM: &str = "orient";

/// Inbound request, reduced to what the API looks at
#[derive(Debug, Clone, Default)]
pub struct ApiRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub origin: Option<String>,
    pub query: Vec<(String, String)>,
}

/// Outbound response
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl ApiResponse {
    fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: body.to_string(),
        }
    }

    fn error(status: u16, message: &str) -> Self {
        Self::json(status, json!({ "error": message }))
    }

    fn empty(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: String::new(),
        }
    }

    fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// First header with the given name (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Parsed JSON body, if any
    pub fn json_body(&self) -> Option<Value> {
        serde_json::from_str(&self.body).ok()
    }
}

impl From<AuthError> for ApiResponse {
    fn from(err: AuthError) -> Self {
        let response = ApiResponse::error(err.status(), &err.to_string());
        if err.challenges() {
            response.with_header("WWW-Authenticate", "Bearer")
        } else {
            response
        }
    }
}

/// Prediction API with its startup configuration
#[derive(Debug, Clone)]
pub struct PredictionService {
    config: ServiceConfig,
    projector: CostProjector,
}

impl PredictionService {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            config,
            projector: CostProjector::default(),
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Route a request and attach CORS headers
    pub fn handle(&self, request: &ApiRequest) -> ApiResponse {
        let response = self.route(request);
        self.apply_cors(request, response)
    }

    fn route(&self, request: &ApiRequest) -> ApiResponse {
        let path = request.path.trim_end_matches('/');
        if path != PREDICTION_PATH {
            warn!("No route for {} {}", request.method, request.path);
            return ApiResponse::error(404, "Not found");
        }

        match request.method.as_str() {
            "OPTIONS" => ApiResponse::empty(200),
            "GET" => self.get_prediction(request),
            other => {
                warn!("Method {} not allowed on {}", other, PREDICTION_PATH);
                ApiResponse::error(405, "Method not allowed").with_header("Allow", "GET, OPTIONS")
            }
        }
    }

    fn get_prediction(&self, request: &ApiRequest) -> ApiResponse {
        info!("Received prediction request");

        if let Err(err) = authenticate(request.authorization.as_deref(), &self.config.client_id) {
            error!("Unauthenticated prediction request: {}", err);
            return err.into();
        }

        let mut orientation = Orientation::default();
        let mut raw = RawParameters::new();
        for (key, value) in &request.query {
            let parsed = if key == ORIENTATION_PARAM {
                value.parse::<Orientation>().map(|o| orientation = o).map_err(|e| e.to_string())
            } else {
                raw.insert(key, value.as_str().into()).map_err(|e| e.to_string())
            };
            if let Err(detail) = parsed {
                return invalid_parameters(&detail);
            }
        }

        let params = match raw.validate() {
            Ok(params) => params,
            Err(err) => return invalid_parameters(&err.to_string()),
        };

        let series = match self.projector.project(&params) {
            Ok(series) => series,
            Err(err) => {
                error!("Error while creating prediction data: {}", err);
                return ApiResponse::error(500, "Error while computing prediction data");
            }
        };

        match to_json_value(&series, orientation) {
            Ok(body) => {
                info!("Returning prediction data ({} steps, {})", series.len(), orientation);
                ApiResponse::json(200, body)
            }
            Err(err) => {
                error!("Error while serializing prediction data: {}", err);
                ApiResponse::error(500, "Error while computing prediction data")
            }
        }
    }

    fn apply_cors(&self, request: &ApiRequest, response: ApiResponse) -> ApiResponse {
        let Some(origin) = request.origin.as_deref() else {
            return response;
        };
        if !self.config.allows_origin(origin) {
            return response;
        }

        let response = response
            .with_header("Access-Control-Allow-Origin", origin)
            .with_header("Vary", "Origin");
        if request.method == "OPTIONS" {
            response
                .with_header("Access-Control-Allow-Methods", "GET, OPTIONS")
                .with_header("Access-Control-Allow-Headers", "Authorization, Content-Type")
        } else {
            response
        }
    }
}

fn invalid_parameters(detail: &str) -> ApiResponse {
    error!("Invalid request parameters: {}", detail);
    ApiResponse::json(400, json!({ "error": "Invalid request parameters", "detail": detail }))
}
