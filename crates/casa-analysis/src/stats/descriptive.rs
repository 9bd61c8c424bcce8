//! Moment and order statistics. Degenerate inputs yield `None`, never NaN.

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let m = values.iter().sum::<f64>() / values.len() as f64;
    m.is_finite().then_some(m)
}

/// Sample standard deviation (n − 1 denominator). Requires n ≥ 2.
pub fn std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    if is_constant(values) {
        return Some(0.0);
    }
    let m = mean(values)?;
    let n = values.len() as f64;
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (n - 1.0);
    if variance.is_finite() && variance >= 0.0 {
        Some(variance.sqrt())
    } else {
        None
    }
}

/// Relative spread below which a sample counts as constant. The mean of n
/// copies of a non-representable value sits a few ulps off its members.
const CONSTANT_TOLERANCE: f64 = 1e-12;

/// True when every value equals the others up to rounding noise.
pub fn is_constant(values: &[f64]) -> bool {
    if values.is_empty() || values.iter().any(|v| !v.is_finite()) {
        return false;
    }
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    max - min <= min.abs().max(max.abs()) * CONSTANT_TOLERANCE
}

/// Copy and sort ascending. NaN compares equal so it never panics.
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sorted
}

/// Percentile of already-sorted data using linear interpolation.
pub fn percentile(sorted: &[f64], p: f64) -> Option<f64> {
    match sorted.len() {
        0 => return None,
        1 => return Some(sorted[0]),
        _ => {}
    }

    let rank = (p / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let frac = rank - lower as f64;

    if upper >= sorted.len() {
        Some(sorted[sorted.len() - 1])
    } else if sorted[lower] == sorted[upper] {
        Some(sorted[lower])
    } else {
        Some(sorted[lower] * (1.0 - frac) + sorted[upper] * frac)
    }
}

/// Median of unsorted data.
pub fn median(values: &[f64]) -> Option<f64> {
    percentile(&sorted(values), 50.0)
}

/// First and third quartiles of already-sorted data.
pub fn quartiles(sorted: &[f64]) -> Option<(f64, f64)> {
    Some((percentile(sorted, 25.0)?, percentile(sorted, 75.0)?))
}

/// Median absolute deviation around `center`.
pub fn mad(values: &[f64], center: f64) -> Option<f64> {
    let deviations: Vec<f64> = values.iter().map(|v| (v - center).abs()).collect();
    median(&deviations)
}

/// Central moments m2, m3, m4 (population denominators).
fn central_moments(values: &[f64]) -> Option<(f64, f64, f64)> {
    let m = mean(values)?;
    let n = values.len() as f64;
    let (mut m2, mut m3, mut m4) = (0.0, 0.0, 0.0);
    for v in values {
        let d = v - m;
        let d2 = d * d;
        m2 += d2;
        m3 += d2 * d;
        m4 += d2 * d2;
    }
    Some((m2 / n, m3 / n, m4 / n))
}

/// Population skewness g1 = m3 / m2^1.5. Requires n ≥ 3 and non-zero spread.
pub fn population_skewness(values: &[f64]) -> Option<f64> {
    if values.len() < 3 || is_constant(values) {
        return None;
    }
    let (m2, m3, _) = central_moments(values)?;
    if m2 <= f64::EPSILON * f64::EPSILON {
        return None;
    }
    let g1 = m3 / m2.powf(1.5);
    g1.is_finite().then_some(g1)
}

/// Adjusted Fisher–Pearson sample skewness G1 = g1 · √(n(n−1)) / (n−2).
pub fn skewness(values: &[f64]) -> Option<f64> {
    let g1 = population_skewness(values)?;
    let n = values.len() as f64;
    let adjusted = g1 * (n * (n - 1.0)).sqrt() / (n - 2.0);
    adjusted.is_finite().then_some(adjusted)
}

/// Population excess kurtosis g2 = m4 / m2² − 3. Requires n ≥ 4.
pub fn excess_kurtosis(values: &[f64]) -> Option<f64> {
    if values.len() < 4 || is_constant(values) {
        return None;
    }
    let (m2, _, m4) = central_moments(values)?;
    if m2 <= f64::EPSILON * f64::EPSILON {
        return None;
    }
    let g2 = m4 / (m2 * m2) - 3.0;
    g2.is_finite().then_some(g2)
}

/// Coefficient of variation std/mean, undefined for non-positive means.
pub fn coefficient_of_variation(mean: f64, std_dev: f64) -> Option<f64> {
    if mean > 0.0 && mean.is_finite() && std_dev.is_finite() {
        Some(std_dev / mean)
    } else {
        None
    }
}
