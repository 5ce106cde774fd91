//! Client for the AirKorea open API published on data.go.kr.
//!
//! Three operations are used:
//!
//! - `MsrstnInfoInqireSvc/getMsrstnList`: national station list with
//!   addresses and WGS84 coordinates
//! - `ArpltnInforInqireSvc/getMsrstnAcctoRltmMesureDnsty`: hourly readings
//!   for one station
//! - `ArpltnInforInqireSvc/getMinuDustFrcstDspth`: daily dust forecasts
//!
//! The service key must be the *decoded* key from the data.go.kr console;
//! reqwest percent-encodes it when building the query string.

use std::fmt;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use futures::future::BoxFuture;
use serde_json::Value;
use tracing::debug;

use super::{decode_envelope, decode_items, AirQualitySource, RawForecast, RawReading, RawStation};
use crate::config::ApiConfig;
use crate::error::{AirdashError, Result};

pub const STATION_LIST_PATH: &str = "/MsrstnInfoInqireSvc/getMsrstnList";
pub const READINGS_PATH: &str = "/ArpltnInforInqireSvc/getMsrstnAcctoRltmMesureDnsty";
pub const FORECAST_PATH: &str = "/ArpltnInforInqireSvc/getMinuDustFrcstDspth";

type Query = Vec<(&'static str, String)>;

/// HTTP client for the AirKorea API.
#[derive(Clone)]
pub struct AirKoreaClient {
    http: reqwest::Client,
    config: ApiConfig,
    service_key: String,
}

impl fmt::Debug for AirKoreaClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AirKoreaClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AirKoreaClient {
    /// Build a client. Fails if no service key is configured.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let service_key = config
            .service_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(String::from)
            .ok_or_else(|| AirdashError::Config {
                message: "An AirKorea service key is required (--service-key or AIRDASH_SERVICE_KEY)"
                    .to_string(),
            })?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            config,
            service_key,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn station_list_query(&self) -> Query {
        vec![
            ("numOfRows", self.config.station_rows.to_string()),
            ("ver", "1.0".to_string()),
        ]
    }

    fn readings_query(&self, station_name: &str) -> Query {
        vec![
            ("numOfRows", self.config.reading_rows.to_string()),
            ("stationName", station_name.to_string()),
            ("dataTerm", self.config.data_term.clone()),
            ("ver", "1.0".to_string()),
        ]
    }

    fn forecast_query(&self, search_date: NaiveDate) -> Query {
        vec![
            ("numOfRows", self.config.forecast_rows.to_string()),
            ("searchDate", search_date.format("%Y-%m-%d").to_string()),
            ("ver", "1.1".to_string()),
        ]
    }

    /// GET one operation and return its `items` list.
    async fn fetch_items(&self, path: &'static str, params: Query) -> Result<Vec<Value>> {
        let url = self.endpoint(path);
        let start = Instant::now();

        // Logged before the service key is appended
        debug!(url = %url, params = ?params, "Requesting AirKorea operation");

        let mut query: Query = vec![
            ("serviceKey", self.service_key.clone()),
            ("returnType", "json".to_string()),
            ("pageNo", "1".to_string()),
        ];
        query.extend(params);

        let response = self
            .http
            .get(&url)
            .query(&query)
            .send()
            .await?
            .error_for_status()?;
        let text = response.text().await?;
        let items = decode_envelope(&text)?;

        debug!(
            url = %url,
            items = items.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "AirKorea operation completed"
        );

        Ok(items)
    }
}

impl AirQualitySource for AirKoreaClient {
    fn name(&self) -> &str {
        "airkorea"
    }

    fn station_list(&self) -> BoxFuture<'_, Result<Vec<RawStation>>> {
        Box::pin(async move {
            let items = self
                .fetch_items(STATION_LIST_PATH, self.station_list_query())
                .await?;
            Ok(decode_items(items, "station"))
        })
    }

    fn station_readings<'a>(
        &'a self,
        station_name: &'a str,
    ) -> BoxFuture<'a, Result<Vec<RawReading>>> {
        Box::pin(async move {
            let items = self
                .fetch_items(READINGS_PATH, self.readings_query(station_name))
                .await?;
            Ok(decode_items(items, "reading"))
        })
    }

    fn forecasts(&self, search_date: NaiveDate) -> BoxFuture<'_, Result<Vec<RawForecast>>> {
        Box::pin(async move {
            let items = self
                .fetch_items(FORECAST_PATH, self.forecast_query(search_date))
                .await?;
            Ok(decode_items(items, "forecast"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyed_config() -> ApiConfig {
        ApiConfig {
            service_key: Some("test-key".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_client_requires_service_key() {
        let err = AirKoreaClient::new(ApiConfig::default()).unwrap_err();
        assert!(matches!(err, AirdashError::Config { .. }));

        let blank = ApiConfig {
            service_key: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(AirKoreaClient::new(blank).is_err());
    }

    #[test]
    fn test_debug_hides_service_key() {
        let client = AirKoreaClient::new(keyed_config()).unwrap();
        assert!(!format!("{:?}", client).contains("test-key"));
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        let config = ApiConfig {
            base_url: "http://localhost:9000/B552584/".to_string(),
            ..keyed_config()
        };
        let client = AirKoreaClient::new(config).unwrap();
        assert_eq!(
            client.endpoint(READINGS_PATH),
            "http://localhost:9000/B552584/ArpltnInforInqireSvc/getMsrstnAcctoRltmMesureDnsty"
        );
    }

    #[test]
    fn test_operation_queries() {
        let client = AirKoreaClient::new(keyed_config()).unwrap();

        let stations = client.station_list_query();
        assert!(stations.contains(&("numOfRows", "700".to_string())));

        let readings = client.readings_query("중구");
        assert!(readings.contains(&("stationName", "중구".to_string())));
        assert!(readings.contains(&("dataTerm", "DAILY".to_string())));
        assert!(readings.contains(&("numOfRows", "24".to_string())));

        let date = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let forecast = client.forecast_query(date);
        assert!(forecast.contains(&("searchDate", "2024-03-02".to_string())));
        assert!(forecast.contains(&("ver", "1.1".to_string())));
    }
}
