//! # airdash
//!
//! A real-time and forecast air-quality dashboard for the Korean AirKorea
//! public API.
//!
//! This library fetches station lists, hourly readings and daily dust
//! forecasts, cleans them into typed series, grades PM concentrations
//! against configurable bands and serves the result to a browser dashboard.
//!
//! ## Architecture
//!
//! - **Source Layer**: [`source::AirQualitySource`] fetches raw provider records
//! - **Processing**: pure validation, filtering and aggregation in [`processing`] and [`grades`]
//! - **API Layer**: axum handlers that expose each dashboard panel as JSON

pub mod config;
pub mod error;
pub mod grades;
pub mod handlers;
pub mod logging;
pub mod processing;
pub mod source;
pub mod state;

pub use config::Config;
pub use error::{AirdashError, FailureKind, Result};
pub use grades::{classify, Grade, GradeBand, GradeClassifier, GradeTables};
pub use logging::{
    create_http_trace_layer, generate_request_id, init_tracing, log_error, log_fetch_stats,
    log_operation_end, log_operation_start, log_request_error,
};
pub use processing::{
    filter_by_city, nearest_station, parse_data_time, ForecastEntry, ForecastSeries, Pollutant,
    Reading, ReadingSeries, Selection, SeriesSummary, Station,
};
pub use source::{AirKoreaClient, AirQualitySource};
pub use state::AppState;
