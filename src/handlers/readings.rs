//! Current readings endpoint handler.
//!
//! Returns the latest hour with graded PM cards, window statistics and the
//! full series for the trend chart.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use super::{error_response, round2, Panel};
use crate::error::AirdashError;
use crate::grades::{Grade, GradeClassifier};
use crate::logging::{generate_request_id, log_request_error};
use crate::processing::{FieldStats, Pollutant, Reading, ReadingSeries};
use crate::state::AppState;

/// Pollutants shown as grade cards
pub const CARD_POLLUTANTS: [Pollutant; 2] = [Pollutant::Pm10, Pollutant::Pm25];

/// Query parameters for the readings endpoint
#[derive(Debug, Deserialize)]
pub struct ReadingsQuery {
    /// Station name
    pub station: Option<String>,
}

/// One grade card
#[derive(Debug, Serialize)]
pub struct GradeCard {
    pub pollutant: Pollutant,
    pub title: &'static str,
    pub value: Option<f64>,
    pub unit: &'static str,
    pub grade: Grade,
}

/// Display statistics for one pollutant
#[derive(Debug, Serialize)]
pub struct StatsView {
    pub mean: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub count: usize,
    pub unit: &'static str,
}

impl StatsView {
    fn new(pollutant: Pollutant, stats: FieldStats) -> Self {
        Self {
            mean: stats.mean.map(round2),
            min: stats.min,
            max: stats.max,
            count: stats.count,
            unit: pollutant.unit(),
        }
    }
}

/// Everything the readings panel shows
#[derive(Debug, Serialize)]
pub struct ReadingsView {
    pub station: String,
    pub latest: Reading,
    pub cards: Vec<GradeCard>,
    pub summary: BTreeMap<Pollutant, StatsView>,
    pub series: Vec<Reading>,
    pub dropped: usize,
}

impl ReadingsView {
    /// Build the view. Returns `None` for an empty series.
    pub fn build(
        station: &str,
        series: &ReadingSeries,
        classifier: &GradeClassifier,
    ) -> Option<Self> {
        let latest = series.latest()?.clone();

        let cards = CARD_POLLUTANTS
            .iter()
            .map(|&pollutant| {
                let value = latest.value(pollutant);
                GradeCard {
                    pollutant,
                    title: pollutant.display_name(),
                    value,
                    unit: pollutant.unit(),
                    grade: classifier.classify(pollutant, value),
                }
            })
            .collect();

        let summary = series.summarize();
        let summary = Pollutant::ALL
            .iter()
            .map(|&p| (p, StatsView::new(p, summary.get(p))))
            .collect();

        Some(Self {
            station: station.to_string(),
            latest,
            cards,
            summary,
            series: series.readings().to_vec(),
            dropped: series.dropped(),
        })
    }
}

/// Handle GET /api/readings requests
pub async fn readings_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReadingsQuery>,
) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(
        endpoint = "/api/readings",
        request_id = %request_id,
        station = ?params.station,
        "Processing readings request"
    );

    let Some(station) = params
        .station
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    else {
        let e = AirdashError::invalid_parameter("station", "must not be empty");
        log_request_error(&e, "/api/readings", &request_id, None);
        return error_response(&e);
    };

    let panel = match state.reading_series(station).await {
        Ok(series) => match ReadingsView::build(station, &series, &state.classifier) {
            Some(view) => Panel::Available(view),
            None => Panel::unavailable(&AirdashError::EmptyResult {
                message: format!("no readings for station {}", station),
            }),
        },
        Err(e) => {
            log_request_error(&e, "/api/readings", &request_id, Some(station));
            Panel::unavailable(&e)
        }
    };

    info!(
        endpoint = "/api/readings",
        request_id = %request_id,
        station = %station,
        available = panel.is_available(),
        duration_us = start_time.elapsed().as_micros() as u64,
        "Readings request completed"
    );

    panel.into_response()
}
