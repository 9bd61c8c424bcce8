//! Core types for outlier detection.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single method's finding for one data point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlierResult {
    /// Index into the analyzed values slice.
    pub index: usize,
    /// The value that was flagged.
    pub value: f64,
    /// Distance measure of the method (fence distance in IQRs, |z|, |modified z|).
    pub test_statistic: f64,
    pub method: OutlierMethod,
}

/// Statistical method used for outlier detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutlierMethod {
    Iqr,
    ZScore,
    ModifiedZScore,
    LogicalRange,
}

impl OutlierMethod {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Iqr => "iqr",
            Self::ZScore => "z_score",
            Self::ModifiedZScore => "modified_z_score",
            Self::LogicalRange => "logical_range",
        }
    }
}

impl fmt::Display for OutlierMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a statistical method did not run for a group/variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Fewer values than the minimum for stable quartiles/moments.
    InsufficientSample,
    /// Every value identical: Z-score would divide by zero.
    ZeroStdDev,
    /// Most values identical: modified Z-score would divide by zero.
    ZeroMad,
}

/// Per (record, variable) flags from the four methods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlierVerdict {
    pub iqr_flag: bool,
    pub zscore_flag: bool,
    pub modified_zscore_flag: bool,
    pub logical_range_flag: bool,
    /// Outside the 3·IQR fences. Informational; not part of the consensus.
    pub extreme_iqr_flag: bool,
    /// Number of the four methods that flagged the value (0–4).
    pub consensus_count: u8,
    /// `consensus_count` reached the configured agreement threshold.
    pub consensus_outlier: bool,
}

impl OutlierVerdict {
    /// Build a verdict; the count is derived from the flags, never supplied.
    pub fn from_flags(
        iqr_flag: bool,
        zscore_flag: bool,
        modified_zscore_flag: bool,
        logical_range_flag: bool,
        extreme_iqr_flag: bool,
        consensus_threshold: u8,
    ) -> Self {
        let consensus_count = [iqr_flag, zscore_flag, modified_zscore_flag, logical_range_flag]
            .iter()
            .filter(|f| **f)
            .count() as u8;
        Self {
            iqr_flag,
            zscore_flag,
            modified_zscore_flag,
            logical_range_flag,
            extreme_iqr_flag,
            consensus_count,
            consensus_outlier: consensus_count >= consensus_threshold,
        }
    }

    /// Flagged by at least one method.
    pub fn is_outlier(&self) -> bool {
        self.consensus_count >= 1
    }
}

/// Fences and centers used for one group/variable, kept for audit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutlierBounds {
    pub q1: Option<f64>,
    pub q3: Option<f64>,
    pub iqr: Option<f64>,
    pub lower_fence: Option<f64>,
    pub upper_fence: Option<f64>,
    pub lower_extreme_fence: Option<f64>,
    pub upper_extreme_fence: Option<f64>,
    pub mean: Option<f64>,
    pub std_dev: Option<f64>,
    pub median: Option<f64>,
    pub mad: Option<f64>,
    pub logical_min: Option<f64>,
    pub logical_max: Option<f64>,
}
