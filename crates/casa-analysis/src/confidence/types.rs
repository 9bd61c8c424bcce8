//! Confidence score and label types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Five-tier trust label for a group's representative value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConfidenceLabel {
    #[serde(rename = "Very Low")]
    VeryLow,
    Low,
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl ConfidenceLabel {
    /// Lower edges are inclusive: 82 is Very High, 81.99 is High.
    pub fn from_score(score: f64) -> Self {
        if score >= 82.0 {
            Self::VeryHigh
        } else if score >= 68.0 {
            Self::High
        } else if score >= 50.0 {
            Self::Medium
        } else if score >= 35.0 {
            Self::Low
        } else {
            Self::VeryLow
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::VeryHigh => "Very High",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::VeryLow => "Very Low",
        }
    }
}

impl fmt::Display for ConfidenceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Final score with the adjustments that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfidenceAssessment {
    /// Clamped to [0, 100].
    pub score: f64,
    pub label: ConfidenceLabel,
    /// Non-zero adjustments by rule name.
    pub adjustments: Vec<(&'static str, f64)>,
}
