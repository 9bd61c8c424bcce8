//! Cross-field coherence configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the coherence rules. Room sizes are in square meters.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CoherenceConfig {
    /// Bathrooms allowed above the bedroom count. Default: 1.5.
    pub bathroom_slack: Option<f64>,
    /// Parking spots allowed above the bedroom count. Default: 1.
    pub parking_slack: Option<f64>,
    /// Lowest admissible reported/theoretical surface ratio. Default: 0.2.
    pub min_surface_ratio: Option<f64>,
    /// Highest admissible reported/theoretical surface ratio. Default: 5.0.
    pub max_surface_ratio: Option<f64>,
    /// Default: 9.45.
    pub bedroom_area: Option<f64>,
    /// Default: 3.96.
    pub bathroom_area: Option<f64>,
    /// Default: 1.5.
    pub half_bathroom_area: Option<f64>,
    /// Default: 7.5.
    pub kitchen_area: Option<f64>,
    /// Living plus dining room. Default: 15.75.
    pub living_dining_area: Option<f64>,
}

impl CoherenceConfig {
    pub fn effective_bathroom_slack(&self) -> f64 {
        self.bathroom_slack.unwrap_or(1.5)
    }

    pub fn effective_parking_slack(&self) -> f64 {
        self.parking_slack.unwrap_or(1.0)
    }

    pub fn effective_min_surface_ratio(&self) -> f64 {
        self.min_surface_ratio.unwrap_or(0.2)
    }

    pub fn effective_max_surface_ratio(&self) -> f64 {
        self.max_surface_ratio.unwrap_or(5.0)
    }

    pub fn effective_bedroom_area(&self) -> f64 {
        self.bedroom_area.unwrap_or(9.45)
    }

    pub fn effective_bathroom_area(&self) -> f64 {
        self.bathroom_area.unwrap_or(3.96)
    }

    pub fn effective_half_bathroom_area(&self) -> f64 {
        self.half_bathroom_area.unwrap_or(1.5)
    }

    pub fn effective_kitchen_area(&self) -> f64 {
        self.kitchen_area.unwrap_or(7.5)
    }

    pub fn effective_living_dining_area(&self) -> f64 {
        self.living_dining_area.unwrap_or(15.75)
    }

    pub(crate) fn merge_from(&mut self, other: &CoherenceConfig) {
        let pairs: [(&mut Option<f64>, Option<f64>); 9] = [
            (&mut self.bathroom_slack, other.bathroom_slack),
            (&mut self.parking_slack, other.parking_slack),
            (&mut self.min_surface_ratio, other.min_surface_ratio),
            (&mut self.max_surface_ratio, other.max_surface_ratio),
            (&mut self.bedroom_area, other.bedroom_area),
            (&mut self.bathroom_area, other.bathroom_area),
            (&mut self.half_bathroom_area, other.half_bathroom_area),
            (&mut self.kitchen_area, other.kitchen_area),
            (&mut self.living_dining_area, other.living_dining_area),
        ];
        for (base, value) in pairs {
            if value.is_some() {
                *base = value;
            }
        }
    }
}
