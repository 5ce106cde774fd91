//! HTTP request handlers for the airdash API.
//!
//! This module contains all the endpoint handlers for the web server and
//! the router that wires them together.

pub mod dashboard;
pub mod forecast;
pub mod heartbeat;
pub mod readings;
pub mod stations;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::error::{AirdashError, FailureKind};
use crate::logging::create_http_trace_layer;
use crate::state::AppState;

pub use dashboard::dashboard_handler;
pub use forecast::forecast_handler;
pub use heartbeat::heartbeat_handler;
pub use readings::readings_handler;
pub use stations::{cities_handler, stations_handler};

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(dashboard_handler))
        .route("/heartbeat", get(heartbeat_handler))
        .route("/api/cities", get(cities_handler))
        .route("/api/stations", get(stations_handler))
        .route("/api/readings", get(readings_handler))
        .route("/api/forecast", get(forecast_handler))
        .layer(create_http_trace_layer())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// A dashboard panel: either the data, or why it cannot be shown.
///
/// Upstream failures and empty results are not HTTP errors; the dashboard
/// renders them as an "unavailable" panel.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Panel<T> {
    Available(T),
    Unavailable { kind: FailureKind, reason: String },
}

impl<T> Panel<T> {
    pub fn unavailable(error: &AirdashError) -> Self {
        Panel::Unavailable {
            kind: error.kind(),
            reason: error.to_string(),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Panel::Available(_))
    }
}

impl<T: Serialize> IntoResponse for Panel<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// HTTP status for an error that is returned as an error response
pub fn status_for(error: &AirdashError) -> StatusCode {
    match error.kind() {
        FailureKind::Request => StatusCode::BAD_REQUEST,
        FailureKind::EmptyResult => StatusCode::NOT_FOUND,
        FailureKind::NetworkFailure => StatusCode::BAD_GATEWAY,
        FailureKind::ParseFailure | FailureKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// JSON error response
pub fn error_response(error: &AirdashError) -> Response {
    (
        status_for(error),
        Json(serde_json::json!({
            "error": error.to_string()
        })),
    )
        .into_response()
}

/// Round to two decimals for display
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
