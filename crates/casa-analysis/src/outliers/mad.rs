//! Modified Z-score (Iglewicz–Hoaglin): 0.6745 · (x − median) / MAD.
//!
//! Median and MAD are barely moved by the outliers being detected, so this is
//! the primary robust method for small or skewed groups. MAD = 0 (most values
//! identical) disables it for the group.

use crate::stats::descriptive;

use super::types::{OutlierMethod, OutlierResult, SkipReason};

/// 0.6745 is the 75th percentile of the standard normal: MAD ≈ 0.6745·σ.
pub const MAD_CONSISTENCY: f64 = 0.6745;

/// Modified Z-score of one value.
pub fn modified_zscore(value: f64, median: f64, mad: f64) -> f64 {
    MAD_CONSISTENCY * (value - median) / mad
}

/// Detect outliers using the modified Z-score.
///
/// `threshold`: |modified z| above which a value is flagged (default 3.5).
/// `min_n`: smallest sample analyzed (default 4).
///
/// Returns (median, mad, results).
pub fn detect(
    values: &[f64],
    threshold: f64,
    min_n: usize,
) -> Result<(f64, f64, Vec<OutlierResult>), SkipReason> {
    if values.len() < min_n.max(1) {
        return Err(SkipReason::InsufficientSample);
    }

    let median = descriptive::median(values).ok_or(SkipReason::InsufficientSample)?;
    let mad = descriptive::mad(values, median).ok_or(SkipReason::InsufficientSample)?;
    if mad <= 0.0 || !mad.is_finite() {
        return Err(SkipReason::ZeroMad);
    }

    let results = values
        .iter()
        .enumerate()
        .filter_map(|(index, &value)| {
            let m = modified_zscore(value, median, mad);
            (m.abs() > threshold).then_some(OutlierResult {
                index,
                value,
                test_statistic: m,
                method: OutlierMethod::ModifiedZScore,
            })
        })
        .collect();

    Ok((median, mad, results))
}
