//! IQR with Tukey fences.
//!
//! Resistant to extreme values that inflate the standard deviation.
//! Fences are Q1 − k·IQR and Q3 + k·IQR (k = 1.5, extreme variant k = 3).

use crate::stats::descriptive;

use super::types::{OutlierMethod, OutlierResult, SkipReason};

/// Quartiles and fences for one multiplier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TukeyFences {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower: f64,
    pub upper: f64,
}

impl TukeyFences {
    /// Compute fences over already-sorted values.
    pub fn from_sorted(sorted: &[f64], multiplier: f64) -> Option<Self> {
        let (q1, q3) = descriptive::quartiles(sorted)?;
        let iqr = q3 - q1;
        if !iqr.is_finite() {
            return None;
        }
        Some(Self {
            q1,
            q3,
            iqr,
            lower: q1 - multiplier * iqr,
            upper: q3 + multiplier * iqr,
        })
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

/// Detect outliers using IQR with Tukey fences.
///
/// `values`: the data points.
/// `multiplier`: IQR multiplier for fences (default 1.5).
/// `min_n`: smallest sample with meaningful quartiles (default 4).
pub fn detect(
    values: &[f64],
    multiplier: f64,
    min_n: usize,
) -> Result<(TukeyFences, Vec<OutlierResult>), SkipReason> {
    if values.len() < min_n.max(2) {
        return Err(SkipReason::InsufficientSample);
    }

    let sorted = descriptive::sorted(values);
    let fences =
        TukeyFences::from_sorted(&sorted, multiplier).ok_or(SkipReason::InsufficientSample)?;

    let results = values
        .iter()
        .enumerate()
        .filter(|(_, &val)| !fences.contains(val))
        .map(|(index, &value)| {
            let distance = if value < fences.lower {
                fences.lower - value
            } else {
                value - fences.upper
            };
            OutlierResult {
                index,
                value,
                test_statistic: if fences.iqr > 0.0 { distance / fences.iqr } else { distance },
                method: OutlierMethod::Iqr,
            }
        })
        .collect();

    Ok((fences, results))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iqr_no_outliers() {
        let values: Vec<f64> = (1..=20).map(|i| i as f64).collect();
        let (_, results) = detect(&values, 1.5, 4).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_iqr_flags_extreme_listing() {
        let values = [100_000.0, 105_000.0, 110_000.0, 108_000.0, 950_000.0];
        let (fences, results) = detect(&values, 1.5, 4).unwrap();
        assert_eq!(fences.q1, 105_000.0);
        assert_eq!(fences.q3, 110_000.0);
        assert_eq!(fences.upper, 117_500.0);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].index, 4);
    }

    #[test]
    fn test_iqr_identical_values() {
        let (fences, results) = detect(&[5.0; 20], 1.5, 4).unwrap();
        assert_eq!(fences.iqr, 0.0);
        assert!(results.is_empty());
    }

    #[test]
    fn test_zero_iqr_collapses_fences_onto_quartiles() {
        let mut values = vec![5.0; 10];
        values.push(6.0);
        let (fences, results) = detect(&values, 1.5, 4).unwrap();
        assert_eq!(fences.iqr, 0.0);
        assert_eq!((fences.lower, fences.upper), (5.0, 5.0));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].index, 10);
        assert_eq!(results[0].test_statistic, 1.0);
    }

    #[test]
    fn test_iqr_small_sample_skipped() {
        assert_eq!(
            detect(&[1.0, 2.0, 100.0], 1.5, 4).unwrap_err(),
            SkipReason::InsufficientSample
        );
    }

    #[test]
    fn test_extreme_multiplier_is_stricter() {
        let mut values: Vec<f64> = (1..=20).map(|i| i as f64).collect();
        values.push(45.0);
        let (_, mild) = detect(&values, 1.5, 4).unwrap();
        let (_, extreme) = detect(&values, 3.0, 4).unwrap();
        assert_eq!(mild.len(), 1);
        assert!(extreme.is_empty());
    }
}
