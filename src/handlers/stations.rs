//! City and station endpoints.
//!
//! `/api/stations` resolves the dashboard selection: given the chosen city,
//! optionally a station picked from the list and optionally a map click, it
//! returns the city's stations and the one that should be active.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use super::{error_response, Panel};
use crate::error::{AirdashError, Result};
use crate::logging::{generate_request_id, log_request_error};
use crate::processing::stations::MapClick;
use crate::processing::{resolve_selection, Selection, Station};
use crate::state::AppState;

/// Query parameters for the stations endpoint
#[derive(Debug, Deserialize)]
pub struct StationsQuery {
    /// City name from the selector
    pub city: Option<String>,
    /// Station currently chosen in the list
    pub station: Option<String>,
    /// Latitude of a map click
    pub lat: Option<f64>,
    /// Longitude of a map click
    pub lon: Option<f64>,
}

impl StationsQuery {
    /// Turn the raw parameters into a selection
    pub fn selection(&self) -> Result<Selection> {
        let city = self
            .city
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| AirdashError::invalid_parameter("city", "must not be empty"))?;

        let click = match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(MapClick { lat, lon }),
            (None, None) => None,
            _ => {
                return Err(AirdashError::invalid_parameter(
                    "lat/lon",
                    "a map click needs both lat and lon",
                ))
            }
        };

        Ok(Selection {
            city: city.to_string(),
            station: self.station.clone().filter(|s| !s.trim().is_empty()),
            click,
        })
    }
}

/// Stations of a city and the active one
#[derive(Debug, Serialize)]
pub struct StationsView {
    pub city: String,
    pub stations: Vec<Station>,
    pub selected: Option<Station>,
}

/// Handle GET /api/cities requests
pub async fn cities_handler(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(state.config.cities.clone())
}

/// Handle GET /api/stations requests
pub async fn stations_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StationsQuery>,
) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(
        endpoint = "/api/stations",
        request_id = %request_id,
        params = ?params,
        "Processing stations request"
    );

    let selection = match params
        .selection()
        .and_then(|s| state.validate_city(&s.city).map(|_| s))
    {
        Ok(selection) => selection,
        Err(e) => {
            log_request_error(&e, "/api/stations", &request_id, Some(&format!("{:?}", params)));
            return error_response(&e);
        }
    };

    let panel = match state.stations_for_city(&selection.city).await {
        Ok(stations) if stations.is_empty() => Panel::unavailable(&AirdashError::EmptyResult {
            message: format!("no stations found for {}", selection.city),
        }),
        Ok(stations) => {
            let selected = resolve_selection(&stations, &selection).cloned();
            Panel::Available(StationsView {
                city: selection.city.clone(),
                stations,
                selected,
            })
        }
        Err(e) => {
            log_request_error(&e, "/api/stations", &request_id, Some(&selection.city));
            Panel::unavailable(&e)
        }
    };

    info!(
        endpoint = "/api/stations",
        request_id = %request_id,
        city = %selection.city,
        available = panel.is_available(),
        duration_us = start_time.elapsed().as_micros() as u64,
        "Stations request completed"
    );

    panel.into_response()
}
