//! Hourly readings for one station.
//!
//! Raw rows are coerced field by field: a pollutant value that does not
//! parse becomes missing for that field only, while a row whose timestamp
//! does not parse is dropped entirely.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::timestamp::parse_data_time;
use crate::error::{AirdashError, Result};
use crate::source::RawReading;

/// The six pollutants reported per hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pollutant {
    Pm10,
    Pm25,
    O3,
    Co,
    No2,
    So2,
}

impl Pollutant {
    pub const ALL: [Pollutant; 6] = [
        Pollutant::Pm10,
        Pollutant::Pm25,
        Pollutant::O3,
        Pollutant::Co,
        Pollutant::No2,
        Pollutant::So2,
    ];

    /// Field name in the provider's reading records
    pub fn wire_field(self) -> &'static str {
        match self {
            Pollutant::Pm10 => "pm10Value",
            Pollutant::Pm25 => "pm25Value",
            Pollutant::O3 => "o3Value",
            Pollutant::Co => "coValue",
            Pollutant::No2 => "no2Value",
            Pollutant::So2 => "so2Value",
        }
    }

    /// Label used on the dashboard
    pub fn display_name(self) -> &'static str {
        match self {
            Pollutant::Pm10 => "미세먼지 (PM10)",
            Pollutant::Pm25 => "초미세먼지 (PM2.5)",
            Pollutant::O3 => "오존 (O3)",
            Pollutant::Co => "일산화탄소 (CO)",
            Pollutant::No2 => "이산화질소 (NO2)",
            Pollutant::So2 => "아황산가스 (SO2)",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Pollutant::Pm10 | Pollutant::Pm25 => "µg/m³",
            Pollutant::O3 | Pollutant::Co | Pollutant::No2 | Pollutant::So2 => "ppm",
        }
    }
}

/// Coerce a raw JSON value to a finite number.
///
/// Numbers pass through, strings are trimmed and parsed, and anything else
/// (null, `"-"`, `""`, `"NaN"`) is missing.
pub fn coerce_value(value: Option<&Value>) -> Option<f64> {
    let number = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|v| v.is_finite())
}

/// One hour of measurements at a station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub timestamp: NaiveDateTime,
    pub pm10: Option<f64>,
    pub pm25: Option<f64>,
    pub o3: Option<f64>,
    pub co: Option<f64>,
    pub no2: Option<f64>,
    pub so2: Option<f64>,
}

impl Reading {
    /// Validate a raw row. Only the timestamp is required.
    pub fn from_raw(raw: &RawReading) -> Result<Self> {
        let data_time = raw
            .data_time
            .as_deref()
            .ok_or_else(|| AirdashError::parse("reading has no dataTime"))?;

        Ok(Self {
            timestamp: parse_data_time(data_time)?,
            pm10: coerce_value(raw.pm10_value.as_ref()),
            pm25: coerce_value(raw.pm25_value.as_ref()),
            o3: coerce_value(raw.o3_value.as_ref()),
            co: coerce_value(raw.co_value.as_ref()),
            no2: coerce_value(raw.no2_value.as_ref()),
            so2: coerce_value(raw.so2_value.as_ref()),
        })
    }

    pub fn value(&self, pollutant: Pollutant) -> Option<f64> {
        match pollutant {
            Pollutant::Pm10 => self.pm10,
            Pollutant::Pm25 => self.pm25,
            Pollutant::O3 => self.o3,
            Pollutant::Co => self.co,
            Pollutant::No2 => self.no2,
            Pollutant::So2 => self.so2,
        }
    }
}

/// Readings in ascending timestamp order.
///
/// Duplicate timestamps are kept as the provider sent them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReadingSeries {
    readings: Vec<Reading>,
    dropped: usize,
}

impl ReadingSeries {
    /// Build a series from raw rows, dropping rows with unparsable timestamps.
    pub fn process(raw: &[RawReading]) -> Self {
        let mut dropped = 0;
        let mut readings: Vec<Reading> = raw
            .iter()
            .filter_map(|row| match Reading::from_raw(row) {
                Ok(reading) => Some(reading),
                Err(e) => {
                    warn!(error = %e, "Dropping reading row");
                    dropped += 1;
                    None
                }
            })
            .collect();
        readings.sort_by_key(|reading| reading.timestamp);

        Self { readings, dropped }
    }

    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Number of raw rows that were discarded
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// The most recent reading, or `None` when the series is empty.
    pub fn latest(&self) -> Option<&Reading> {
        self.readings.last()
    }

    /// Mean, min and max per pollutant over the whole series.
    pub fn summarize(&self) -> SeriesSummary {
        let fields = Pollutant::ALL
            .iter()
            .map(|&p| (p, FieldStats::from_values(self.readings.iter().map(|r| r.value(p)))))
            .collect();
        SeriesSummary { fields }
    }
}

/// Aggregates for one pollutant. All three are `None` when the series has
/// no value for it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldStats {
    pub mean: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Number of non-missing values aggregated
    pub count: usize,
}

impl FieldStats {
    pub fn from_values(values: impl Iterator<Item = Option<f64>>) -> Self {
        let mut sum = 0.0;
        let mut stats = FieldStats::default();

        for value in values.flatten() {
            sum += value;
            stats.count += 1;
            stats.min = Some(stats.min.map_or(value, |m: f64| m.min(value)));
            stats.max = Some(stats.max.map_or(value, |m: f64| m.max(value)));
        }

        if stats.count > 0 {
            stats.mean = Some(sum / stats.count as f64);
        }
        stats
    }
}

/// Per-pollutant aggregates for a series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesSummary {
    pub fields: BTreeMap<Pollutant, FieldStats>,
}

impl SeriesSummary {
    pub fn get(&self, pollutant: Pollutant) -> FieldStats {
        self.fields.get(&pollutant).copied().unwrap_or_default()
    }
}
