//! Outlier detection configuration, including fixed logical bounds.

use serde::{Deserialize, Serialize};

use crate::types::{Operation, Variable};

/// A physically admissible interval for a variable, independent of group
/// statistics. `operation = None` applies to both sale and rent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicalBound {
    pub variable: Variable,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<Operation>,
    pub min: f64,
    pub max: f64,
}

impl LogicalBound {
    fn new(variable: Variable, operation: Option<Operation>, min: f64, max: f64) -> Self {
        Self {
            variable,
            operation,
            min,
            max,
        }
    }
}

/// Configuration for the outlier detection stage.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OutlierConfig {
    /// IQR multiplier for Tukey fences. Default: 1.5.
    pub iqr_multiplier: Option<f64>,
    /// IQR multiplier for the extreme fences. Default: 3.0.
    pub extreme_iqr_multiplier: Option<f64>,
    /// Classic Z-score threshold. Default: 3.0.
    pub z_threshold: Option<f64>,
    /// Modified Z-score threshold. Default: 3.5.
    pub mad_threshold: Option<f64>,
    /// Smallest group on which the statistical methods run. Default: 4.
    pub min_statistical_n: Option<usize>,
    /// Methods that must agree for a consensus outlier. Default: 2.
    pub consensus_threshold: Option<u8>,
    /// Logical bounds. Empty means the compiled bounds.
    pub logical: Vec<LogicalBound>,
}

impl OutlierConfig {
    pub fn effective_iqr_multiplier(&self) -> f64 {
        self.iqr_multiplier.unwrap_or(1.5)
    }

    pub fn effective_extreme_iqr_multiplier(&self) -> f64 {
        self.extreme_iqr_multiplier.unwrap_or(3.0)
    }

    pub fn effective_z_threshold(&self) -> f64 {
        self.z_threshold.unwrap_or(3.0)
    }

    pub fn effective_mad_threshold(&self) -> f64 {
        self.mad_threshold.unwrap_or(3.5)
    }

    pub fn effective_min_statistical_n(&self) -> usize {
        self.min_statistical_n.unwrap_or(4)
    }

    pub fn effective_consensus_threshold(&self) -> u8 {
        self.consensus_threshold.unwrap_or(2)
    }

    pub fn effective_logical(&self) -> Vec<LogicalBound> {
        if self.logical.is_empty() {
            default_logical_bounds()
        } else {
            self.logical.clone()
        }
    }

    pub(crate) fn merge_from(&mut self, other: &OutlierConfig) {
        if other.iqr_multiplier.is_some() {
            self.iqr_multiplier = other.iqr_multiplier;
        }
        if other.extreme_iqr_multiplier.is_some() {
            self.extreme_iqr_multiplier = other.extreme_iqr_multiplier;
        }
        if other.z_threshold.is_some() {
            self.z_threshold = other.z_threshold;
        }
        if other.mad_threshold.is_some() {
            self.mad_threshold = other.mad_threshold;
        }
        if other.min_statistical_n.is_some() {
            self.min_statistical_n = other.min_statistical_n;
        }
        if other.consensus_threshold.is_some() {
            self.consensus_threshold = other.consensus_threshold;
        }
        if !other.logical.is_empty() {
            self.logical = other.logical.clone();
        }
    }
}

/// Compiled logical bounds. Coordinates box the Mexico City metropolitan area.
pub fn default_logical_bounds() -> Vec<LogicalBound> {
    use Operation::{Rent, Sale};
    vec![
        LogicalBound::new(Variable::Price, Some(Sale), 100_000.0, 100_000_000.0),
        LogicalBound::new(Variable::Price, Some(Rent), 1_000.0, 1_000_000.0),
        LogicalBound::new(Variable::Area, None, 20.0, 2_000.0),
        LogicalBound::new(Variable::PricePerArea, Some(Sale), 1_000.0, 500_000.0),
        LogicalBound::new(Variable::PricePerArea, Some(Rent), 10.0, 5_000.0),
        LogicalBound::new(Variable::MaintenanceFee, None, 0.0, 100_000.0),
        LogicalBound::new(Variable::Latitude, None, 19.0, 19.6),
        LogicalBound::new(Variable::Longitude, None, -99.4, -98.9),
    ]
}
