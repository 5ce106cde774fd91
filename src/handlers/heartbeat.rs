//! Heartbeat endpoint handler.
//!
//! Returns server status information: identity, uptime and which data
//! source is configured.

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::state::AppState;

/// Server ID, unique per process
static SERVER_ID: once_cell::sync::Lazy<String> =
    once_cell::sync::Lazy::new(|| Uuid::new_v4().to_string());

/// Heartbeat response structure
#[derive(Debug, Serialize)]
pub struct HeartbeatResponse {
    /// Server ID (unique per instance)
    pub server_id: String,
    /// Current timestamp (ISO 8601 format)
    pub timestamp: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Name of the upstream data source
    pub source: String,
    /// Number of cities offered
    pub city_count: usize,
    /// Server status
    pub status: String,
}

/// Handle GET /heartbeat requests
pub async fn heartbeat_handler(State(state): State<Arc<AppState>>) -> Json<HeartbeatResponse> {
    Json(heartbeat(&state))
}

fn heartbeat(state: &AppState) -> HeartbeatResponse {
    let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

    HeartbeatResponse {
        server_id: SERVER_ID.clone(),
        timestamp,
        uptime_seconds: state.started_at.elapsed().as_secs(),
        source: state.source.name().to_string(),
        city_count: state.config.cities.len(),
        status: "healthy".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::Result;
    use crate::source::{AirQualitySource, RawForecast, RawReading, RawStation};
    use chrono::NaiveDate;
    use futures::future::BoxFuture;

    struct EmptySource;

    impl AirQualitySource for EmptySource {
        fn name(&self) -> &str {
            "empty"
        }

        fn station_list(&self) -> BoxFuture<'_, Result<Vec<RawStation>>> {
            Box::pin(async { Ok(Vec::new()) })
        }

        fn station_readings<'a>(&'a self, _: &'a str) -> BoxFuture<'a, Result<Vec<RawReading>>> {
            Box::pin(async { Ok(Vec::new()) })
        }

        fn forecasts(&self, _: NaiveDate) -> BoxFuture<'_, Result<Vec<RawForecast>>> {
            Box::pin(async { Ok(Vec::new()) })
        }
    }

    #[test]
    fn test_heartbeat_response_structure() {
        let state = AppState::new(Config::default(), Arc::new(EmptySource));
        let response = heartbeat(&state);

        assert_eq!(response.source, "empty");
        assert_eq!(response.city_count, 17);
        assert_eq!(response.status, "healthy");
        assert_eq!(response.server_id, heartbeat(&state).server_id);
    }
}
