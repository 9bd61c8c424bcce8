//! Classic Z-score: |x − mean| / std > threshold.
//!
//! Sensitive to the very outliers it hunts (they inflate std), which is why
//! it is one vote among four rather than the sole criterion.

use crate::stats::descriptive;

use super::types::{OutlierMethod, OutlierResult, SkipReason};

/// Detect outliers using the classic Z-score.
///
/// `threshold`: |z| above which a value is flagged (default 3.0).
/// `min_n`: smallest sample analyzed (default 4; never below 3).
///
/// Returns (mean, std_dev, results).
pub fn detect(
    values: &[f64],
    threshold: f64,
    min_n: usize,
) -> Result<(f64, f64, Vec<OutlierResult>), SkipReason> {
    if values.len() < min_n.max(3) {
        return Err(SkipReason::InsufficientSample);
    }

    let mean = descriptive::mean(values).ok_or(SkipReason::InsufficientSample)?;
    let stddev = descriptive::std_dev(values).ok_or(SkipReason::InsufficientSample)?;
    if stddev <= 0.0 || !stddev.is_finite() {
        return Err(SkipReason::ZeroStdDev);
    }

    let results = values
        .iter()
        .enumerate()
        .filter_map(|(index, &value)| {
            let z = (value - mean) / stddev;
            (z.abs() > threshold).then_some(OutlierResult {
                index,
                value,
                test_statistic: z,
                method: OutlierMethod::ZScore,
            })
        })
        .collect();

    Ok((mean, stddev, results))
}
