//! Representative-value selector configuration.

use serde::{Deserialize, Serialize};

/// Which normality evidence the selector consults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalityTestKind {
    /// Jarque–Bera p-value, combined with the skewness gate.
    JarqueBera,
    /// No test; `|skew| <= normal_max_abs_skew` alone decides.
    Skewness,
}

impl NormalityTestKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "jarque_bera" | "jarque-bera" | "jb" => Some(Self::JarqueBera),
            "skewness" | "skew" => Some(Self::Skewness),
            _ => None,
        }
    }
}

/// Smallest sample size at which a mean may ever be reported.
pub const MEAN_SAMPLE_FLOOR: usize = 30;

/// Configuration for the representative-value decision tree.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SelectorConfig {
    /// Below this n no value is reported. Default: 5.
    pub min_n: Option<usize>,
    /// Below this n the median with min/max is reported. Default: 10.
    pub small_n: Option<usize>,
    /// Minimum n before a mean may be reported. Default and floor: 30.
    pub mean_min_n: Option<usize>,
    /// Largest |skewness| still treated as approximately normal. Default: 0.5.
    pub normal_max_abs_skew: Option<f64>,
    /// |skewness| above this is strong asymmetry. Default: 1.0.
    pub strong_skew: Option<f64>,
    /// Coefficient of variation must stay below this for a mean. Default: 1.0.
    pub max_cv: Option<f64>,
    /// Significance level of the normality test. Default: 0.05.
    pub normality_alpha: Option<f64>,
    /// Default: jarque_bera.
    pub normality_test: Option<NormalityTestKind>,
}

impl SelectorConfig {
    pub fn effective_min_n(&self) -> usize {
        self.min_n.unwrap_or(5)
    }

    pub fn effective_small_n(&self) -> usize {
        self.small_n.unwrap_or(10)
    }

    pub fn effective_mean_min_n(&self) -> usize {
        self.mean_min_n.unwrap_or(MEAN_SAMPLE_FLOOR)
    }

    pub fn effective_normal_max_abs_skew(&self) -> f64 {
        self.normal_max_abs_skew.unwrap_or(0.5)
    }

    pub fn effective_strong_skew(&self) -> f64 {
        self.strong_skew.unwrap_or(1.0)
    }

    pub fn effective_max_cv(&self) -> f64 {
        self.max_cv.unwrap_or(1.0)
    }

    pub fn effective_normality_alpha(&self) -> f64 {
        self.normality_alpha.unwrap_or(0.05)
    }

    pub fn effective_normality_test(&self) -> NormalityTestKind {
        self.normality_test.unwrap_or(NormalityTestKind::JarqueBera)
    }

    pub(crate) fn merge_from(&mut self, other: &SelectorConfig) {
        if other.min_n.is_some() {
            self.min_n = other.min_n;
        }
        if other.small_n.is_some() {
            self.small_n = other.small_n;
        }
        if other.mean_min_n.is_some() {
            self.mean_min_n = other.mean_min_n;
        }
        if other.normal_max_abs_skew.is_some() {
            self.normal_max_abs_skew = other.normal_max_abs_skew;
        }
        if other.strong_skew.is_some() {
            self.strong_skew = other.strong_skew;
        }
        if other.max_cv.is_some() {
            self.max_cv = other.max_cv;
        }
        if other.normality_alpha.is_some() {
            self.normality_alpha = other.normality_alpha;
        }
        if other.normality_test.is_some() {
            self.normality_test = other.normality_test;
        }
    }
}
