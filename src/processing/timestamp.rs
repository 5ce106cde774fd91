//! Timestamp parsing for provider records.
//!
//! Hourly readings are stamped `YYYY-MM-DD HH:MM` in local (KST) time. The
//! provider reports the last hour of a day as `24:00` of that day; chrono
//! rejects that, so it is rewritten to `00:00` of the next day.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{AirdashError, Result};

/// Format of the `dataTime` field
pub const DATA_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Format of the `informData` field
pub const FORECAST_DATE_FORMAT: &str = "%Y-%m-%d";

const END_OF_DAY_SUFFIX: &str = " 24:00";

/// Parse a reading timestamp, mapping `24:00` to midnight of the next day.
pub fn parse_data_time(value: &str) -> Result<NaiveDateTime> {
    let value = value.trim();

    if let Some(date_part) = value.strip_suffix(END_OF_DAY_SUFFIX) {
        let date = NaiveDate::parse_from_str(date_part, FORECAST_DATE_FORMAT)
            .map_err(|e| AirdashError::parse(format!("invalid dataTime {:?}: {}", value, e)))?;
        return date
            .succ_opt()
            .and_then(|next| next.and_hms_opt(0, 0, 0))
            .ok_or_else(|| AirdashError::parse(format!("dataTime {:?} is out of range", value)));
    }

    NaiveDateTime::parse_from_str(value, DATA_TIME_FORMAT)
        .map_err(|e| AirdashError::parse(format!("invalid dataTime {:?}: {}", value, e)))
}

/// Parse a forecast date (`YYYY-MM-DD`).
pub fn parse_forecast_date(value: &str) -> Result<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, FORECAST_DATE_FORMAT)
        .map_err(|e| AirdashError::parse(format!("invalid forecast date {:?}: {}", value, e)))
}
