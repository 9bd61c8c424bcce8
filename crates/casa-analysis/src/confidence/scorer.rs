//! Additive confidence scoring.
//!
//! Each adjustment reads the inputs independently, so the sum does not depend
//! on rule order and new rules append without touching existing ones.

use casa_core::config::ConfidenceConfig;

use super::types::{ConfidenceAssessment, ConfidenceLabel};
use crate::stats::DistributionProfile;

/// What the scorer reads about a group/variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceInputs {
    pub n: usize,
    /// Members flagged by at least one outlier method, over n.
    pub outlier_ratio: f64,
    /// IQR / median.
    pub dispersion_ratio: Option<f64>,
    /// std_dev / mean.
    pub cv: Option<f64>,
}

impl ConfidenceInputs {
    pub fn from_profile(profile: &DistributionProfile, outlier_ratio: f64) -> Self {
        Self {
            n: profile.n,
            outlier_ratio,
            dispersion_ratio: profile.dispersion_ratio(),
            cv: profile.cv,
        }
    }
}

/// A named adjustment returning its delta (zero when it does not apply).
pub type AdjustmentRule = (&'static str, fn(&ConfidenceInputs) -> f64);

fn volume(inputs: &ConfidenceInputs) -> f64 {
    match inputs.n {
        n if n >= 120 => 30.0,
        n if n >= 80 => 22.0,
        n if n >= 60 => 16.0,
        n if n >= 40 => 10.0,
        n if n >= 25 => 5.0,
        n if n < 12 => -25.0,
        n if n < 20 => -12.0,
        _ => 0.0,
    }
}

fn outlier_rate(inputs: &ConfidenceInputs) -> f64 {
    let r = inputs.outlier_ratio;
    if r < 0.08 {
        12.0
    } else if r < 0.12 {
        6.0
    } else if r > 0.30 {
        -18.0
    } else if r > 0.22 {
        -10.0
    } else {
        0.0
    }
}

fn dispersion(inputs: &ConfidenceInputs) -> f64 {
    match inputs.dispersion_ratio {
        Some(d) if d <= 0.35 => 8.0,
        Some(d) if d <= 0.50 => 4.0,
        Some(d) if d > 0.80 => -10.0,
        _ => 0.0,
    }
}

fn variation(inputs: &ConfidenceInputs) -> f64 {
    match inputs.cv {
        Some(cv) if cv <= 0.30 => 5.0,
        Some(cv) if cv <= 0.45 => 2.0,
        Some(cv) if cv > 0.70 => -8.0,
        _ => 0.0,
    }
}

pub fn default_adjustments() -> Vec<AdjustmentRule> {
    let rules: [AdjustmentRule; 4] = [
        ("volume", volume),
        ("outlier_ratio", outlier_rate),
        ("dispersion_ratio", dispersion),
        ("coefficient_of_variation", variation),
    ];
    rules.to_vec()
}

#[derive(Debug, Clone)]
pub struct ConfidenceScorer {
    base_score: f64,
    adjustments: Vec<AdjustmentRule>,
}

impl ConfidenceScorer {
    pub fn new(base_score: f64) -> Self {
        Self {
            base_score,
            adjustments: default_adjustments(),
        }
    }

    pub fn from_config(config: &ConfidenceConfig) -> Self {
        Self::new(config.effective_base_score())
    }

    /// Append a rule; existing rules are unaffected.
    pub fn with_adjustment(mut self, rule: AdjustmentRule) -> Self {
        self.adjustments.push(rule);
        self
    }

    pub fn score(&self, inputs: &ConfidenceInputs) -> ConfidenceAssessment {
        let adjustments: Vec<(&'static str, f64)> = self
            .adjustments
            .iter()
            .map(|(name, rule)| (*name, rule(inputs)))
            .filter(|(_, delta)| *delta != 0.0)
            .collect();
        let raw = self.base_score + adjustments.iter().map(|(_, d)| d).sum::<f64>();
        let score = raw.clamp(0.0, 100.0);

        ConfidenceAssessment {
            score,
            label: ConfidenceLabel::from_score(score),
            adjustments,
        }
    }
}

impl Default for ConfidenceScorer {
    fn default() -> Self {
        Self::from_config(&ConfidenceConfig::default())
    }
}
