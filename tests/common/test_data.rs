//! Test data for the airdash server.
//!
//! This module provides an in-memory [`AirQualitySource`] that serves
//! provider-shaped records with known values, including the malformed rows
//! the real service is known to send.

use airdash::error::{AirdashError, Result};
use airdash::source::{AirQualitySource, RawForecast, RawReading, RawStation};
use chrono::NaiveDate;
use futures::future::BoxFuture;
use serde_json::{json, Value};

/// Station whose readings come back empty
pub const EMPTY_STATION: &str = "빈측정소";

/// Station whose readings request fails upstream
pub const FAILING_STATION: &str = "장애측정소";

/// Issue date for which no bulletins exist
pub const NO_FORECAST_DATE: &str = "2024-01-01";

fn station(name: &str, addr: &str, lat: Value, lon: Value) -> RawStation {
    RawStation {
        station_name: Some(name.to_string()),
        addr: Some(addr.to_string()),
        dm_x: Some(lat),
        dm_y: Some(lon),
    }
}

/// Station list covering two cities, plus one record without coordinates.
pub fn stations() -> Vec<RawStation> {
    vec![
        station(
            "중구",
            "서울 중구 덕수궁길 15",
            json!("37.564"),
            json!("126.975"),
        ),
        station(
            "강남구",
            "서울 강남구 학동로 426",
            json!("37.517"),
            json!("127.047"),
        ),
        station(
            "종로구",
            "서울특별시 종로구 종로35가길 19",
            json!(37.572),
            json!(127.005),
        ),
        station(
            "연산동",
            "부산광역시 연제구 고분로 36",
            json!("35.185"),
            json!("129.085"),
        ),
        station(
            "광복동",
            "부산 중구 광복로 55번길 10",
            json!("35.099"),
            json!("129.032"),
        ),
        RawStation {
            station_name: Some("좌표없음".to_string()),
            addr: Some("서울 어딘가".to_string()),
            ..Default::default()
        },
    ]
}

fn reading(data_time: &str, pm10: &str, pm25: &str, o3: &str) -> RawReading {
    RawReading {
        data_time: Some(data_time.to_string()),
        pm10_value: Some(json!(pm10)),
        pm25_value: Some(json!(pm25)),
        o3_value: Some(json!(o3)),
        co_value: Some(json!("0.4")),
        no2_value: Some(json!("0.021")),
        so2_value: Some(json!("0.003")),
    }
}

/// Hourly readings, newest first as the provider sends them.
///
/// The 24:00 row is the latest hour. The 23:00 row has a missing PM10 value
/// and the last row has an unparseable timestamp.
pub fn readings() -> Vec<RawReading> {
    vec![
        reading("2024-03-01 24:00", "41", "18", "0.030"),
        reading("2024-03-01 23:00", "-", "20", "0.029"),
        reading("2024-03-01 22:00", "35", "12", "0.031"),
        reading("garbage", "100", "100", "0.1"),
    ]
}

/// Forecast bulletins, out of order, with one malformed item.
pub fn forecasts() -> Vec<RawForecast> {
    vec![
        RawForecast {
            inform_data: Some("2024-03-03".to_string()),
            inform_grade: Some("[나쁨]".to_string()),
            inform_overall: None,
        },
        RawForecast {
            inform_data: Some("2024-03-02".to_string()),
            inform_grade: Some("[보통]".to_string()),
            inform_overall: Some("내용\n계속".to_string()),
        },
        RawForecast {
            inform_data: Some("bad".to_string()),
            ..Default::default()
        },
    ]
}

/// In-memory source serving the fixtures above
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureSource {
    /// Fail every request the way an unregistered service key does
    pub offline: bool,
}

impl FixtureSource {
    pub fn online() -> Self {
        Self { offline: false }
    }

    pub fn offline() -> Self {
        Self { offline: true }
    }

    fn check_online(&self) -> Result<()> {
        if self.offline {
            return Err(AirdashError::Upstream {
                code: "30".to_string(),
                message: "SERVICE KEY IS NOT REGISTERED ERROR.".to_string(),
            });
        }
        Ok(())
    }
}

impl AirQualitySource for FixtureSource {
    fn name(&self) -> &str {
        "fixture"
    }

    fn station_list(&self) -> BoxFuture<'_, Result<Vec<RawStation>>> {
        Box::pin(async move {
            self.check_online()?;
            Ok(stations())
        })
    }

    fn station_readings<'a>(
        &'a self,
        station_name: &'a str,
    ) -> BoxFuture<'a, Result<Vec<RawReading>>> {
        Box::pin(async move {
            self.check_online()?;
            match station_name {
                EMPTY_STATION => Ok(Vec::new()),
                FAILING_STATION => Err(AirdashError::Upstream {
                    code: "22".to_string(),
                    message: "LIMITED NUMBER OF SERVICE REQUESTS EXCEEDS ERROR.".to_string(),
                }),
                _ => Ok(readings()),
            }
        })
    }

    fn forecasts(&self, search_date: NaiveDate) -> BoxFuture<'_, Result<Vec<RawForecast>>> {
        Box::pin(async move {
            self.check_online()?;
            if search_date.to_string() == NO_FORECAST_DATE {
                return Ok(Vec::new());
            }
            Ok(forecasts())
        })
    }
}
