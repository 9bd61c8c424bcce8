//! Evaluates the rule list over a group's distribution.

use casa_core::config::{NormalityTestKind, SelectorConfig};

use super::rules::{default_rules, SelectionRule};
use super::types::{RepresentativeMethod, Selection};
use crate::stats::{normality_test_for, DistributionProfile, NormalityTest};

/// Resolved selector thresholds.
#[derive(Debug, Clone)]
pub struct SelectorParams {
    pub min_n: usize,
    pub small_n: usize,
    pub mean_min_n: usize,
    pub normal_max_abs_skew: f64,
    pub strong_skew: f64,
    /// Coefficient of variation must stay below this for a mean.
    pub max_cv: f64,
    pub normality_alpha: f64,
    pub normality_test: NormalityTestKind,
}

impl From<&SelectorConfig> for SelectorParams {
    fn from(config: &SelectorConfig) -> Self {
        Self {
            min_n: config.effective_min_n(),
            small_n: config.effective_small_n(),
            mean_min_n: config.effective_mean_min_n(),
            normal_max_abs_skew: config.effective_normal_max_abs_skew(),
            strong_skew: config.effective_strong_skew(),
            max_cv: config.effective_max_cv(),
            normality_alpha: config.effective_normality_alpha(),
            normality_test: config.effective_normality_test(),
        }
    }
}

impl Default for SelectorParams {
    fn default() -> Self {
        Self::from(&SelectorConfig::default())
    }
}

pub struct RepresentativeSelector {
    rules: Vec<SelectionRule>,
    normality: Box<dyn NormalityTest>,
}

impl RepresentativeSelector {
    pub fn new(params: &SelectorParams) -> Self {
        Self {
            rules: default_rules(params),
            normality: normality_test_for(params.normality_test),
        }
    }

    /// Custom rule list, evaluated in the given order.
    pub fn with_rules(rules: Vec<SelectionRule>, normality: Box<dyn NormalityTest>) -> Self {
        Self { rules, normality }
    }

    pub fn rules(&self) -> &[SelectionRule] {
        &self.rules
    }

    pub fn normality_test_name(&self) -> &'static str {
        self.normality.name()
    }

    pub fn profile(&self, values: &[f64]) -> DistributionProfile {
        DistributionProfile::from_values(values, self.normality.as_ref())
    }

    /// First matching rule wins. A list with no match yields `none`.
    pub fn select(&self, profile: &DistributionProfile) -> Selection {
        let Some(rule) = self.rules.iter().find(|r| r.matches(profile)) else {
            return Selection {
                method: RepresentativeMethod::None,
                value: None,
                justification: "no rule matched".to_string(),
                rule: "unmatched",
            };
        };

        let value = match rule.method {
            RepresentativeMethod::None => None,
            RepresentativeMethod::MeanStdDev => profile.mean,
            RepresentativeMethod::MedianRange | RepresentativeMethod::MedianIqr => profile.median,
        };
        tracing::trace!(
            n = profile.n,
            rule = rule.name,
            method = %rule.method,
            "representative selected"
        );

        Selection {
            method: rule.method,
            value,
            justification: rule.justification.clone(),
            rule: rule.name,
        }
    }

    pub fn evaluate(&self, values: &[f64]) -> (DistributionProfile, Selection) {
        let profile = self.profile(values);
        let selection = self.select(&profile);
        (profile, selection)
    }
}

impl Default for RepresentativeSelector {
    fn default() -> Self {
        Self::new(&SelectorParams::default())
    }
}
