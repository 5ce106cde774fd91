//! Daily dust forecast bulletins.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::timestamp::parse_forecast_date;
use crate::error::{AirdashError, Result};
use crate::source::RawForecast;

/// Placeholder used when a bulletin has no overall summary
pub const NO_SUMMARY: &str = "정보 없음";

/// One validated forecast bulletin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub date: NaiveDate,
    /// Regional grades with the provider's brackets removed
    pub grade_text: String,
    /// Overall outlook on a single line
    pub summary_text: String,
}

impl ForecastEntry {
    /// Validate a raw bulletin. The date is required; text fields are
    /// cleaned and defaulted.
    pub fn from_raw(raw: &RawForecast) -> Result<Self> {
        let date = raw
            .inform_data
            .as_deref()
            .ok_or_else(|| AirdashError::parse("forecast has no informData"))
            .and_then(parse_forecast_date)?;

        let grade_text = raw
            .inform_grade
            .as_deref()
            .unwrap_or_default()
            .replace(['[', ']'], "");

        let summary_text = raw
            .inform_overall
            .as_deref()
            .map(|summary| summary.replace('\n', " "))
            .unwrap_or_else(|| NO_SUMMARY.to_string());

        Ok(Self {
            date,
            grade_text,
            summary_text,
        })
    }
}

/// Forecast bulletins in ascending date order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ForecastSeries {
    entries: Vec<ForecastEntry>,
    skipped: usize,
}

impl ForecastSeries {
    /// Build a series from raw bulletins, skipping invalid ones.
    pub fn process(raw: &[RawForecast]) -> Self {
        let mut skipped = 0;
        let mut entries: Vec<ForecastEntry> = raw
            .iter()
            .filter_map(|item| match ForecastEntry::from_raw(item) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(error = %e, "Skipping forecast item");
                    skipped += 1;
                    None
                }
            })
            .collect();
        entries.sort_by_key(|entry| entry.date);

        Self { entries, skipped }
    }

    pub fn entries(&self) -> &[ForecastEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of raw bulletins that were discarded
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// The earliest bulletin, i.e. the one for the current day.
    pub fn current(&self) -> Option<&ForecastEntry> {
        self.entries.first()
    }
}
