//! Summary of one group's distribution for one variable.

use serde::Serialize;

use super::descriptive;
use super::normality::NormalityTest;

/// Everything the selector and the confidence scorer read about a distribution.
/// Undefined statistics are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DistributionProfile {
    pub n: usize,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub std_dev: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub q1: Option<f64>,
    pub q3: Option<f64>,
    pub iqr: Option<f64>,
    pub mad: Option<f64>,
    pub skewness: Option<f64>,
    pub excess_kurtosis: Option<f64>,
    pub cv: Option<f64>,
    pub normality_p_value: Option<f64>,
}

impl DistributionProfile {
    /// Compute the profile; `normality` supplies the optional p-value.
    pub fn from_values(values: &[f64], normality: &dyn NormalityTest) -> Self {
        let sorted = descriptive::sorted(values);
        let mean = descriptive::mean(values);
        let median = descriptive::percentile(&sorted, 50.0);
        let std_dev = descriptive::std_dev(values);
        let quartiles = descriptive::quartiles(&sorted);

        Self {
            n: values.len(),
            mean,
            median,
            std_dev,
            min: sorted.first().copied(),
            max: sorted.last().copied(),
            q1: quartiles.map(|q| q.0),
            q3: quartiles.map(|q| q.1),
            iqr: quartiles.map(|(q1, q3)| q3 - q1),
            mad: median.and_then(|m| descriptive::mad(values, m)),
            skewness: descriptive::skewness(values),
            excess_kurtosis: descriptive::excess_kurtosis(values),
            cv: match (mean, std_dev) {
                (Some(m), Some(s)) => descriptive::coefficient_of_variation(m, s),
                _ => None,
            },
            normality_p_value: normality.p_value(values),
        }
    }

    /// Profile carrying only a sample size, used to evaluate rules in isolation.
    pub fn with_n(n: usize) -> Self {
        Self {
            n,
            ..Self::default()
        }
    }

    /// Interquartile range relative to the median.
    pub fn dispersion_ratio(&self) -> Option<f64> {
        match (self.iqr, self.median) {
            (Some(iqr), Some(median)) if median > 0.0 => Some(iqr / median),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::SkewnessProxy;

    #[test]
    fn test_profile_of_small_group() {
        let p = DistributionProfile::from_values(
            &[100_000.0, 105_000.0, 110_000.0, 108_000.0, 950_000.0],
            &SkewnessProxy,
        );
        assert_eq!(p.n, 5);
        assert_eq!(p.median, Some(108_000.0));
        assert_eq!(p.q1, Some(105_000.0));
        assert_eq!(p.q3, Some(110_000.0));
        assert_eq!(p.iqr, Some(5_000.0));
        assert_eq!(p.min, Some(100_000.0));
        assert_eq!(p.max, Some(950_000.0));
        assert!(p.skewness.unwrap() > 2.0);
        assert_eq!(p.normality_p_value, None);
    }

    #[test]
    fn test_profile_of_empty_group() {
        let p = DistributionProfile::from_values(&[], &SkewnessProxy);
        assert_eq!(p, DistributionProfile::with_n(0));
        assert_eq!(p.dispersion_ratio(), None);
    }
}
