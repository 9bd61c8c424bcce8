//! Record repair configuration.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

/// Configuration for per-record imputation and miscapture correction.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RepairConfig {
    /// Year used to turn a construction year into an age. Default: current UTC year.
    pub reference_year: Option<i32>,
    /// Square meters per bedroom when imputing bedrooms. Default: 45.
    pub area_per_bedroom: Option<f64>,
    /// Upper clamp for imputed bedrooms. Default: 4.
    pub max_imputed_bedrooms: Option<f64>,
    /// Largest parking count accepted after a decimal-shift correction. Default: 6.
    pub max_shifted_parking: Option<f64>,
    /// Largest age accepted after a decimal-shift correction. Default: 100.
    pub max_shifted_age: Option<f64>,
}

impl RepairConfig {
    pub fn effective_reference_year(&self) -> i32 {
        self.reference_year
            .unwrap_or_else(|| chrono::Utc::now().year())
    }

    pub fn effective_area_per_bedroom(&self) -> f64 {
        self.area_per_bedroom.unwrap_or(45.0)
    }

    pub fn effective_max_imputed_bedrooms(&self) -> f64 {
        self.max_imputed_bedrooms.unwrap_or(4.0)
    }

    pub fn effective_max_shifted_parking(&self) -> f64 {
        self.max_shifted_parking.unwrap_or(6.0)
    }

    pub fn effective_max_shifted_age(&self) -> f64 {
        self.max_shifted_age.unwrap_or(100.0)
    }

    pub(crate) fn merge_from(&mut self, other: &RepairConfig) {
        if other.reference_year.is_some() {
            self.reference_year = other.reference_year;
        }
        if other.area_per_bedroom.is_some() {
            self.area_per_bedroom = other.area_per_bedroom;
        }
        if other.max_imputed_bedrooms.is_some() {
            self.max_imputed_bedrooms = other.max_imputed_bedrooms;
        }
        if other.max_shifted_parking.is_some() {
            self.max_shifted_parking = other.max_shifted_parking;
        }
        if other.max_shifted_age.is_some() {
            self.max_shifted_age = other.max_shifted_age;
        }
    }
}
