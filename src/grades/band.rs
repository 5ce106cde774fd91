//! Grade bands and the band lookup.

use serde::{Deserialize, Serialize};

/// Label reported when a value is missing or outside every band
pub const UNKNOWN_LABEL: &str = "정보없음";

/// Neutral gray used for the unknown grade
pub const UNKNOWN_COLOR: &str = "#808080";

/// Icon used for the unknown grade
pub const UNKNOWN_ICON: &str = "❓";

/// One labeled concentration range. Both bounds are inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeBand {
    /// Lowest concentration in this band
    pub lower: f64,
    /// Highest concentration in this band
    pub upper: f64,
    /// Grade label, e.g. "보통"
    pub label: String,
    /// CSS color for the grade card
    pub color: String,
    /// Emoji shown next to the grade
    pub icon: String,
}

impl GradeBand {
    pub fn new(lower: f64, upper: f64, label: &str, color: &str, icon: &str) -> Self {
        Self {
            lower,
            upper,
            label: label.to_string(),
            color: color.to_string(),
            icon: icon.to_string(),
        }
    }

    /// Whether `value` falls inside `[lower, upper]`.
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }

    fn grade(&self) -> Grade {
        Grade {
            label: self.label.clone(),
            color: self.color.clone(),
            icon: self.icon.clone(),
        }
    }
}

/// The (label, color, icon) triple shown for a classified value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grade {
    pub label: String,
    pub color: String,
    pub icon: String,
}

impl Grade {
    /// The fallback grade for missing or unclassifiable values.
    pub fn unknown() -> Self {
        Self {
            label: UNKNOWN_LABEL.to_string(),
            color: UNKNOWN_COLOR.to_string(),
            icon: UNKNOWN_ICON.to_string(),
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.label == UNKNOWN_LABEL
    }
}

/// Classify a concentration against an ordered band table.
///
/// Bands are scanned in order and the first one containing the value wins.
/// A missing value, a NaN, or a value outside every band yields
/// [`Grade::unknown`].
pub fn classify(value: Option<f64>, bands: &[GradeBand]) -> Grade {
    let Some(value) = value.filter(|v| !v.is_nan()) else {
        return Grade::unknown();
    };

    bands
        .iter()
        .find(|band| band.contains(value))
        .map(GradeBand::grade)
        .unwrap_or_else(Grade::unknown)
}
