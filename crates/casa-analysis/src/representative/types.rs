//! Selection outcome types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which statistic describes a group's typical value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepresentativeMethod {
    /// Not enough evidence; no value is reported.
    None,
    /// Median, with min/max as the only dispersion indicator.
    MedianRange,
    /// Median with interquartile range.
    MedianIqr,
    /// Mean with standard deviation.
    #[serde(rename = "mean_stddev")]
    MeanStdDev,
}

impl RepresentativeMethod {
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::MedianRange => "median_range",
            Self::MedianIqr => "median_iqr",
            Self::MeanStdDev => "mean_stddev",
        }
    }

    pub fn reports_value(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for RepresentativeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The chosen method, its value, and the audit trail of why.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub method: RepresentativeMethod,
    /// Mean for `mean_stddev`, median for the median methods, absent for `none`.
    pub value: Option<f64>,
    pub justification: String,
    /// Name of the rule that matched.
    pub rule: &'static str,
}
