//! Normality evidence for the representative-value selector.
//!
//! Jarque–Bera: JB = n/6 · (S² + K²/4) with S the population skewness and K
//! the excess kurtosis; under normality JB ~ χ²(2). Critical values via `statrs`.

use casa_core::config::NormalityTestKind;
use statrs::distribution::{ChiSquared, ContinuousCDF};

use super::descriptive;

/// A test producing a p-value for the null hypothesis "values are normal".
/// `None` means the test has no opinion and the selector falls back to skewness.
pub trait NormalityTest: Send + Sync {
    fn name(&self) -> &'static str;
    fn p_value(&self, values: &[f64]) -> Option<f64>;
}

/// Jarque–Bera goodness-of-fit test.
#[derive(Debug, Clone, Copy, Default)]
pub struct JarqueBera;

impl JarqueBera {
    /// The JB statistic, `None` when moments are undefined (n < 4 or zero spread).
    pub fn statistic(values: &[f64]) -> Option<f64> {
        let s = descriptive::population_skewness(values)?;
        let k = descriptive::excess_kurtosis(values)?;
        let n = values.len() as f64;
        let jb = n / 6.0 * (s * s + k * k / 4.0);
        jb.is_finite().then_some(jb)
    }
}

impl NormalityTest for JarqueBera {
    fn name(&self) -> &'static str {
        "jarque_bera"
    }

    fn p_value(&self, values: &[f64]) -> Option<f64> {
        let jb = Self::statistic(values)?;
        let chi2 = ChiSquared::new(2.0).ok()?;
        let p = 1.0 - chi2.cdf(jb);
        p.is_finite().then(|| p.clamp(0.0, 1.0))
    }
}

/// No formal test; the selector's `|skew|` gate decides alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkewnessProxy;

impl NormalityTest for SkewnessProxy {
    fn name(&self) -> &'static str {
        "skewness"
    }

    fn p_value(&self, _values: &[f64]) -> Option<f64> {
        None
    }
}

/// Build the configured test.
pub fn normality_test_for(kind: NormalityTestKind) -> Box<dyn NormalityTest> {
    match kind {
        NormalityTestKind::JarqueBera => Box::new(JarqueBera),
        NormalityTestKind::Skewness => Box::new(SkewnessProxy),
    }
}
