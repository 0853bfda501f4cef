//! AWS Lambda handler serving the prediction API
//!
//! Answers `GET /prediction` with the cost projection for the query
//! parameters, as columns (default) or records (`orient=records`).
//!
//! Supports Lambda Function URLs for direct HTTP access.
//! Reads config from environment variables at startup:
//!   CAR_CLIENT_ID (required), DEBUG, ORIGIN, API_ENDPOINT

use car_cost_projection::service::{ApiRequest, PredictionService, ServiceConfig};
use lambda_http::{run, service_fn, Body, Error, Request, RequestExt, Response};
use std::sync::Arc;

fn header(event: &Request, name: &str) -> Option<String> {
    event
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

fn to_api_request(event: &Request) -> ApiRequest {
    ApiRequest {
        method: event.method().as_str().to_string(),
        path: event.uri().path().to_string(),
        authorization: header(event, "authorization"),
        origin: header(event, "origin"),
        query: event
            .query_string_parameters()
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect(),
    }
}

/// Lambda handler function
async fn handler(service: &PredictionService, event: Request) -> Result<Response<Body>, Error> {
    let reply = service.handle(&to_api_request(&event));

    let mut builder = Response::builder().status(reply.status);
    for (name, value) in &reply.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    let body = if reply.body.is_empty() {
        Body::Empty
    } else {
        Body::Text(reply.body)
    };

    Ok(builder.body(body)?)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Configuration problems stop the function before it serves anything
    let config = ServiceConfig::from_env()?;

    env_logger::Builder::new()
        .filter_level(config.log_level())
        .parse_default_env()
        .init();
    log::info!(
        "Starting prediction API for {} (origins: {})",
        config.endpoint,
        config.origins.join(", ")
    );

    let service = Arc::new(PredictionService::new(config));
    run(service_fn(move |event: Request| {
        let service = Arc::clone(&service);
        async move { handler(&service, event).await }
    }))
    .await
}
