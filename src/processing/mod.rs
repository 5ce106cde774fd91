//! Validation and shaping of raw provider records.
//!
//! Everything in here is pure: the functions take raw records or domain
//! values and return new values, so they are safe to call from any number
//! of concurrent requests.
//!
//! Submodules:
//! - `timestamp`: `dataTime` and forecast date parsing
//! - `stations`: station validation, city filtering, nearest-station lookup
//! - `readings`: hourly reading series and summary statistics
//! - `forecast`: daily forecast series

pub mod forecast;
pub mod readings;
pub mod stations;
pub mod timestamp;

pub use forecast::{ForecastEntry, ForecastSeries, NO_SUMMARY};
pub use readings::{FieldStats, Pollutant, Reading, ReadingSeries, SeriesSummary};
pub use stations::{filter_by_city, nearest_station, resolve_selection, Selection, Station};
pub use timestamp::{parse_data_time, parse_forecast_date};
