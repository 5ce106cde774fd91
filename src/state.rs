//! Application state management for airdash.
//!
//! This module defines the shared state that is passed to all handlers:
//! the configuration, the upstream data source and the grade classifier.
//! The state holds no per-user data; the current selection travels with
//! each request.

use chrono::{FixedOffset, NaiveDate, Offset, Utc};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::error::{AirdashError, Result};
use crate::grades::GradeClassifier;
use crate::logging::log_fetch_stats;
use crate::processing::stations::parse_stations;
use crate::processing::{filter_by_city, ForecastSeries, ReadingSeries, Station};
use crate::source::AirQualitySource;

/// The main application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Configuration
    pub config: Config,
    /// Upstream data source
    pub source: Arc<dyn AirQualitySource>,
    /// Classifier built from the configured grade tables
    pub classifier: GradeClassifier,
    /// When this state was created
    pub started_at: Instant,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("source", &self.source.name())
            .field("classifier", &self.classifier)
            .finish()
    }
}

impl AppState {
    /// Create a new AppState
    pub fn new(config: Config, source: Arc<dyn AirQualitySource>) -> Self {
        let classifier = GradeClassifier::new(config.grades.clone());
        Self {
            config,
            source,
            classifier,
            started_at: Instant::now(),
        }
    }

    /// Create a new AppState wrapped in an Arc for shared ownership
    pub fn new_shared(config: Config, source: Arc<dyn AirQualitySource>) -> Arc<Self> {
        Arc::new(Self::new(config, source))
    }

    /// Reject cities that are not offered by the dashboard
    pub fn validate_city(&self, city: &str) -> Result<()> {
        if city.trim().is_empty() {
            return Err(AirdashError::invalid_parameter("city", "must not be empty"));
        }
        if !self.config.has_city(city) {
            return Err(AirdashError::invalid_parameter(
                "city",
                format!("unknown city: {}", city),
            ));
        }
        Ok(())
    }

    /// Today's date in the provider's local time
    pub fn today(&self) -> NaiveDate {
        let offset = FixedOffset::east_opt(self.config.api.utc_offset_hours * 3600)
            .unwrap_or_else(|| Utc.fix());
        Utc::now().with_timezone(&offset).date_naive()
    }

    /// Fetch the station list and keep the stations of one city, sorted by name.
    pub async fn stations_for_city(&self, city: &str) -> Result<Vec<Station>> {
        let raw = self.source.station_list().await?;
        let parsed = parse_stations(&raw);
        log_fetch_stats(
            "station_list",
            self.source.name(),
            raw.len(),
            parsed.len(),
            raw.len() - parsed.len(),
        );

        Ok(filter_by_city(&parsed, city))
    }

    /// Fetch and process the hourly readings of one station.
    pub async fn reading_series(&self, station_name: &str) -> Result<ReadingSeries> {
        let raw = self.source.station_readings(station_name).await?;
        let series = ReadingSeries::process(&raw);
        log_fetch_stats(
            "station_readings",
            self.source.name(),
            raw.len(),
            series.len(),
            series.dropped(),
        );

        Ok(series)
    }

    /// Fetch and process the forecast bulletins issued on `date`.
    pub async fn forecast_series(&self, date: NaiveDate) -> Result<ForecastSeries> {
        let raw = self.source.forecasts(date).await?;
        let series = ForecastSeries::process(&raw);
        log_fetch_stats(
            "forecasts",
            self.source.name(),
            raw.len(),
            series.entries().len(),
            series.skipped(),
        );

        Ok(series)
    }
}
