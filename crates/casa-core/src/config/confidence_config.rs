//! Confidence scoring configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ConfidenceConfig {
    /// Score every group starts from before adjustments. Default: 50.
    pub base_score: Option<f64>,
}

impl ConfidenceConfig {
    pub fn effective_base_score(&self) -> f64 {
        self.base_score.unwrap_or(50.0)
    }

    pub(crate) fn merge_from(&mut self, other: &ConfidenceConfig) {
        if other.base_score.is_some() {
            self.base_score = other.base_score;
        }
    }
}
