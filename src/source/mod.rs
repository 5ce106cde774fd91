//! Upstream data sources.
//!
//! A source returns raw, untyped-ish records exactly as the provider sends
//! them. Turning those into validated domain values is the job of
//! [`crate::processing`]; a source only guarantees one record per item the
//! provider sent, so that processing can count what it rejects.

pub mod airkorea;

use chrono::NaiveDate;
use futures::future::BoxFuture;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::{AirdashError, Result};

pub use airkorea::AirKoreaClient;

/// Result code the provider uses for a successful call
pub const SUCCESS_CODE: &str = "00";

/// One measuring station record (`getMsrstnList`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStation {
    pub station_name: Option<String>,
    pub addr: Option<String>,
    /// Latitude, usually sent as a string
    pub dm_x: Option<Value>,
    /// Longitude, usually sent as a string
    pub dm_y: Option<Value>,
}

/// One hourly measurement record (`getMsrstnAcctoRltmMesureDnsty`).
///
/// Values are kept as raw JSON since the provider sends numbers as strings
/// and uses markers such as `"-"` for missing measurements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReading {
    pub data_time: Option<String>,
    pub pm10_value: Option<Value>,
    pub pm25_value: Option<Value>,
    pub o3_value: Option<Value>,
    pub co_value: Option<Value>,
    pub no2_value: Option<Value>,
    pub so2_value: Option<Value>,
}

/// One daily forecast record (`getMinuDustFrcstDspth`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawForecast {
    pub inform_data: Option<String>,
    pub inform_grade: Option<String>,
    pub inform_overall: Option<String>,
}

/// A provider of raw air-quality records.
///
/// Implementations must be shareable across handlers; every call is an
/// independent fetch with no state carried between calls.
pub trait AirQualitySource: Send + Sync {
    /// Short name used in logs and the heartbeat
    fn name(&self) -> &str;

    /// The full national station list.
    fn station_list(&self) -> BoxFuture<'_, Result<Vec<RawStation>>>;

    /// The most recent hourly readings for one station.
    fn station_readings<'a>(&'a self, station_name: &'a str)
        -> BoxFuture<'a, Result<Vec<RawReading>>>;

    /// Forecast bulletins issued on `search_date`.
    fn forecasts(&self, search_date: NaiveDate) -> BoxFuture<'_, Result<Vec<RawForecast>>>;
}

#[derive(Debug, Deserialize)]
struct Envelope {
    response: Option<EnvelopeResponse>,
}

#[derive(Debug, Deserialize)]
struct EnvelopeResponse {
    header: Option<EnvelopeHeader>,
    body: Option<EnvelopeBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnvelopeHeader {
    result_code: Option<String>,
    result_msg: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EnvelopeBody {
    items: Option<Vec<Value>>,
}

/// Extract `response.body.items` from a provider response body.
///
/// A non-success `resultCode` is an [`AirdashError::Upstream`] error. A
/// response without an items list is treated as an empty result set.
pub fn decode_envelope(text: &str) -> Result<Vec<Value>> {
    let envelope: Envelope = serde_json::from_str(text)?;
    let Some(response) = envelope.response else {
        return Ok(Vec::new());
    };

    if let Some(header) = response.header {
        if let Some(code) = header.result_code {
            if code != SUCCESS_CODE {
                return Err(AirdashError::Upstream {
                    code,
                    message: header.result_msg.unwrap_or_default(),
                });
            }
        }
    }

    Ok(response.body.and_then(|b| b.items).unwrap_or_default())
}

/// Convert raw items into typed records.
///
/// An item that does not fit the record type becomes an empty record. It
/// lacks every required field, so processing rejects it and reports it in
/// its dropped/skipped counts.
pub fn decode_items<T: DeserializeOwned + Default>(items: Vec<Value>, record: &str) -> Vec<T> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).unwrap_or_else(|e| {
                warn!(record = record, index = index, error = %e, "Malformed record");
                T::default()
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::stations::parse_stations;
    use crate::processing::{ForecastSeries, ReadingSeries};
    use serde_json::json;

    #[test]
    fn test_decode_envelope_items() {
        let body = json!({
            "response": {
                "header": {"resultCode": "00", "resultMsg": "NORMAL_CODE"},
                "body": {
                    "totalCount": 2,
                    "items": [
                        {"stationName": "중구", "addr": "서울 중구 덕수궁길 15", "dmX": "37.564", "dmY": "126.975"},
                        {"stationName": "종로구", "addr": "서울 종로구 종로35가길 19", "dmX": "37.572", "dmY": "127.005"}
                    ]
                }
            }
        });
        let items = decode_envelope(&body.to_string()).unwrap();
        assert_eq!(items.len(), 2);

        let stations: Vec<RawStation> = decode_items(items, "station");
        assert_eq!(stations[0].station_name.as_deref(), Some("중구"));
        assert_eq!(stations[1].dm_x, Some(json!("37.572")));
    }

    #[test]
    fn test_decode_envelope_error_code() {
        let body = json!({
            "response": {
                "header": {"resultCode": "30", "resultMsg": "SERVICE KEY IS NOT REGISTERED ERROR."}
            }
        });
        match decode_envelope(&body.to_string()) {
            Err(AirdashError::Upstream { code, message }) => {
                assert_eq!(code, "30");
                assert!(message.contains("SERVICE KEY"));
            }
            other => panic!("expected upstream error, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_envelope_missing_items() {
        let body = json!({"response": {"header": {"resultCode": "00"}, "body": {"totalCount": 0}}});
        assert!(decode_envelope(&body.to_string()).unwrap().is_empty());
        assert!(decode_envelope("{}").unwrap().is_empty());
    }

    #[test]
    fn test_decode_envelope_rejects_non_json() {
        let err = decode_envelope("<OpenAPI_ServiceResponse>").unwrap_err();
        assert!(matches!(err, AirdashError::Json(_)));
    }

    #[test]
    fn test_decode_items_keeps_a_record_per_item() {
        let items = vec![
            json!({"dataTime": "2024-03-01 13:00", "pm10Value": "41"}),
            json!("not a record"),
            json!({"dataTime": "2024-03-01 14:00", "pm10Value": 38}),
        ];
        let readings: Vec<RawReading> = decode_items(items, "reading");
        assert_eq!(readings.len(), 3);
        assert_eq!(readings[1], RawReading::default());
        assert_eq!(readings[2].pm10_value, Some(json!(38)));
    }

    #[test]
    fn test_undecodable_readings_count_as_dropped() {
        let items = vec![
            json!({"dataTime": "2024-03-01 13:00", "pm10Value": "41"}),
            json!({"dataTime": 2024030113, "pm10Value": "40"}),
            json!(7),
        ];
        let raw: Vec<RawReading> = decode_items(items, "reading");
        let series = ReadingSeries::process(&raw);
        assert_eq!(raw.len(), 3);
        assert_eq!(series.len(), 1);
        assert_eq!(series.dropped(), 2);
    }

    #[test]
    fn test_undecodable_forecasts_count_as_skipped() {
        let items = vec![
            json!({"informData": "2024-03-02", "informGrade": "[보통]", "informOverall": "맑음"}),
            json!({"informData": "2024-03-03", "informOverall": 17}),
        ];
        let raw: Vec<RawForecast> = decode_items(items, "forecast");
        let series = ForecastSeries::process(&raw);
        assert_eq!(series.entries().len(), 1);
        assert_eq!(series.skipped(), 1);
    }

    #[test]
    fn test_undecodable_stations_are_rejected() {
        let items = vec![
            json!({"stationName": "중구", "addr": "서울 중구", "dmX": "37.564", "dmY": "126.975"}),
            json!({"stationName": ["중구"], "dmX": "37.5", "dmY": "127.0"}),
        ];
        let raw: Vec<RawStation> = decode_items(items, "station");
        assert_eq!(raw.len(), 2);
        assert_eq!(parse_stations(&raw).len(), 1);
    }
}
