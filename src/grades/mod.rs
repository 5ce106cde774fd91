//! Severity grades for pollutant concentrations.
//!
//! A grade table is an ordered list of inclusive concentration bands, each
//! carrying the label, color and icon shown on the dashboard cards.

pub mod band;
pub mod tables;

pub use band::{classify, Grade, GradeBand, UNKNOWN_COLOR, UNKNOWN_ICON, UNKNOWN_LABEL};
pub use tables::{
    default_pm10_bands, default_pm25_bands, validate_bands, GradeClassifier, GradeTables,
};
