//! Dust forecast endpoint handler.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use super::{error_response, Panel};
use crate::error::{AirdashError, Result};
use crate::logging::{generate_request_id, log_request_error};
use crate::processing::{parse_forecast_date, ForecastEntry, ForecastSeries};
use crate::state::AppState;

/// Query parameters for the forecast endpoint
#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    /// Issue date (YYYY-MM-DD); defaults to today in provider time
    pub date: Option<String>,
}

impl ForecastQuery {
    fn search_date(&self, today: NaiveDate) -> Result<NaiveDate> {
        match self.date.as_deref().map(str::trim) {
            None | Some("") => Ok(today),
            Some(date) => parse_forecast_date(date)
                .map_err(|e| AirdashError::invalid_parameter("date", e.to_string())),
        }
    }
}

/// The forecast panel
#[derive(Debug, Serialize)]
pub struct ForecastView {
    pub search_date: NaiveDate,
    pub current: ForecastEntry,
    pub entries: Vec<ForecastEntry>,
    pub skipped: usize,
}

impl ForecastView {
    /// Build the view. Returns `None` when no bulletin survived parsing.
    pub fn build(search_date: NaiveDate, series: &ForecastSeries) -> Option<Self> {
        Some(Self {
            search_date,
            current: series.current()?.clone(),
            entries: series.entries().to_vec(),
            skipped: series.skipped(),
        })
    }
}

/// Handle GET /api/forecast requests
pub async fn forecast_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ForecastQuery>,
) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(
        endpoint = "/api/forecast",
        request_id = %request_id,
        date = ?params.date,
        "Processing forecast request"
    );

    let search_date = match params.search_date(state.today()) {
        Ok(date) => date,
        Err(e) => {
            log_request_error(&e, "/api/forecast", &request_id, params.date.as_deref());
            return error_response(&e);
        }
    };

    let panel = match state.forecast_series(search_date).await {
        Ok(series) => match ForecastView::build(search_date, &series) {
            Some(view) => Panel::Available(view),
            None => Panel::unavailable(&AirdashError::EmptyResult {
                message: format!("no forecast available for {}", search_date),
            }),
        },
        Err(e) => {
            log_request_error(&e, "/api/forecast", &request_id, params.date.as_deref());
            Panel::unavailable(&e)
        }
    };

    info!(
        endpoint = "/api/forecast",
        request_id = %request_id,
        search_date = %search_date,
        available = panel.is_available(),
        duration_us = start_time.elapsed().as_micros() as u64,
        "Forecast request completed"
    );

    panel.into_response()
}
