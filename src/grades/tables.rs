//! Grade tables per pollutant and the classifier built from them.

use serde::{Deserialize, Serialize};

use super::band::{classify, Grade, GradeBand};
use crate::error::{AirdashError, Result};
use crate::processing::readings::Pollutant;

/// Default PM10 table in µg/m³.
pub fn default_pm10_bands() -> Vec<GradeBand> {
    vec![
        GradeBand::new(0.0, 30.0, "좋음", "#4575B4", "😊"),
        GradeBand::new(31.0, 80.0, "보통", "#74ADD1", "🙂"),
        GradeBand::new(81.0, 150.0, "나쁨", "#F46D43", "😷"),
        GradeBand::new(151.0, 999.0, "매우나쁨", "#D73027", "😨"),
    ]
}

/// Default PM2.5 table in µg/m³.
pub fn default_pm25_bands() -> Vec<GradeBand> {
    vec![
        GradeBand::new(0.0, 15.0, "좋음", "#4575B4", "😊"),
        GradeBand::new(16.0, 35.0, "보통", "#74ADD1", "🙂"),
        GradeBand::new(36.0, 75.0, "나쁨", "#F46D43", "😷"),
        GradeBand::new(76.0, 999.0, "매우나쁨", "#D73027", "😨"),
    ]
}

/// Check that a table is usable: non-empty, every band well formed, and
/// bands strictly ascending without overlap.
pub fn validate_bands(name: &str, bands: &[GradeBand]) -> Result<()> {
    if bands.is_empty() {
        return Err(AirdashError::Config {
            message: format!("Grade table {} has no bands", name),
        });
    }

    for band in bands {
        if band.lower.is_nan() || band.upper.is_nan() || band.lower > band.upper {
            return Err(AirdashError::Config {
                message: format!(
                    "Grade table {}: band {} has lower bound {} above upper bound {}",
                    name, band.label, band.lower, band.upper
                ),
            });
        }
    }

    for pair in bands.windows(2) {
        if pair[1].lower <= pair[0].upper {
            return Err(AirdashError::Config {
                message: format!(
                    "Grade table {}: band {} ({}..{}) overlaps or precedes band {} ({}..{})",
                    name,
                    pair[1].label,
                    pair[1].lower,
                    pair[1].upper,
                    pair[0].label,
                    pair[0].lower,
                    pair[0].upper
                ),
            });
        }
    }

    Ok(())
}

/// The configured grade tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeTables {
    /// PM10 bands
    #[serde(default = "default_pm10_bands")]
    pub pm10: Vec<GradeBand>,
    /// PM2.5 bands
    #[serde(default = "default_pm25_bands")]
    pub pm25: Vec<GradeBand>,
}

impl Default for GradeTables {
    fn default() -> Self {
        Self {
            pm10: default_pm10_bands(),
            pm25: default_pm25_bands(),
        }
    }
}

impl GradeTables {
    /// The table for a pollutant, if one is configured.
    pub fn for_pollutant(&self, pollutant: Pollutant) -> Option<&[GradeBand]> {
        match pollutant {
            Pollutant::Pm10 => Some(&self.pm10),
            Pollutant::Pm25 => Some(&self.pm25),
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_bands("pm10", &self.pm10)?;
        validate_bands("pm25", &self.pm25)
    }
}

/// Classifies pollutant values against tables injected at construction.
#[derive(Debug, Clone)]
pub struct GradeClassifier {
    tables: GradeTables,
}

impl GradeClassifier {
    pub fn new(tables: GradeTables) -> Self {
        Self { tables }
    }

    /// Grade a value for a pollutant. Pollutants without a table are
    /// always unknown.
    pub fn classify(&self, pollutant: Pollutant, value: Option<f64>) -> Grade {
        match self.tables.for_pollutant(pollutant) {
            Some(bands) => classify(value, bands),
            None => Grade::unknown(),
        }
    }

    pub fn tables(&self) -> &GradeTables {
        &self.tables
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tables_are_valid() {
        assert!(GradeTables::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_table() {
        let tables = GradeTables {
            pm10: vec![],
            ..Default::default()
        };
        assert!(tables.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_band() {
        let bands = vec![GradeBand::new(10.0, 5.0, "bad", "#000000", "x")];
        assert!(validate_bands("pm10", &bands).is_err());
    }

    #[test]
    fn test_validate_rejects_overlap() {
        let bands = vec![
            GradeBand::new(0.0, 30.0, "a", "#000000", "x"),
            GradeBand::new(30.0, 80.0, "b", "#000000", "y"),
        ];
        let err = validate_bands("pm25", &bands).unwrap_err();
        assert!(err.to_string().contains("overlaps"));
    }

    #[test]
    fn test_classifier_uses_injected_tables() {
        let tables = GradeTables {
            pm10: vec![GradeBand::new(0.0, 999.0, "any", "#123456", "!")],
            ..Default::default()
        };
        let classifier = GradeClassifier::new(tables);
        assert_eq!(classifier.classify(Pollutant::Pm10, Some(500.0)).label, "any");
        assert_eq!(classifier.classify(Pollutant::Pm25, Some(10.0)).label, "좋음");
    }

    #[test]
    fn test_classifier_without_table_is_unknown() {
        let classifier = GradeClassifier::new(GradeTables::default());
        assert!(classifier.classify(Pollutant::O3, Some(0.03)).is_unknown());
        assert!(classifier.classify(Pollutant::Pm10, None).is_unknown());
    }
}
