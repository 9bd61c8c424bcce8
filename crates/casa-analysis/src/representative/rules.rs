//! The default decision rules.
//!
//! Order is precedence: insufficient sample size beats every statistical
//! signal, and a mean needs both a large sample and approximate normality.

use casa_core::config::MEAN_SAMPLE_FLOOR;

use super::selector::SelectorParams;
use super::types::RepresentativeMethod;
use crate::stats::DistributionProfile;

pub type SelectionPredicate = Box<dyn Fn(&DistributionProfile) -> bool + Send + Sync>;

/// One (predicate, method, justification) row.
pub struct SelectionRule {
    pub name: &'static str,
    pub predicate: SelectionPredicate,
    pub method: RepresentativeMethod,
    pub justification: String,
}

impl SelectionRule {
    pub fn new(
        name: &'static str,
        method: RepresentativeMethod,
        justification: impl Into<String>,
        predicate: impl Fn(&DistributionProfile) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            predicate: Box::new(predicate),
            method,
            justification: justification.into(),
        }
    }

    pub fn matches(&self, profile: &DistributionProfile) -> bool {
        (self.predicate)(profile)
    }
}

impl std::fmt::Debug for SelectionRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionRule")
            .field("name", &self.name)
            .field("method", &self.method)
            .field("justification", &self.justification)
            .finish()
    }
}

/// Approximately normal: low skew, and an accepted normality test when one ran.
pub fn approximately_normal(profile: &DistributionProfile, params: &SelectorParams) -> bool {
    let low_skew = profile
        .skewness
        .is_some_and(|s| s.abs() <= params.normal_max_abs_skew);
    let accepted = profile
        .normality_p_value
        .map_or(true, |p| p >= params.normality_alpha);
    low_skew && accepted
}

pub fn default_rules(params: &SelectorParams) -> Vec<SelectionRule> {
    let p = params.clone();
    let min_n = p.min_n;
    let small_n = p.small_n;
    let mean_min_n = p.mean_min_n.max(MEAN_SAMPLE_FLOOR);
    let max_cv = p.max_cv;
    let strong_skew = p.strong_skew;

    vec![
        SelectionRule::new(
            "insufficient_sample",
            RepresentativeMethod::None,
            format!("n<{min_n} insufficient data"),
            move |profile| profile.n < min_n,
        ),
        SelectionRule::new(
            "small_sample",
            RepresentativeMethod::MedianRange,
            format!("{min_n}<=n<{small_n} median with min/max"),
            move |profile| profile.n < small_n,
        ),
        SelectionRule::new(
            "normal_large_sample",
            RepresentativeMethod::MeanStdDev,
            format!("n>={mean_min_n} & normality accepted"),
            move |profile| {
                profile.n >= mean_min_n
                    && approximately_normal(profile, &p)
                    && profile.cv.is_some_and(|cv| cv < max_cv)
            },
        ),
        SelectionRule::new(
            "strong_asymmetry",
            RepresentativeMethod::MedianIqr,
            format!("|skew|>{strong_skew} strong asymmetry"),
            move |profile| profile.skewness.is_some_and(|s| s.abs() > strong_skew),
        ),
        SelectionRule::new(
            "robust_default",
            RepresentativeMethod::MedianIqr,
            "mixed evidence, robust default",
            |_| true,
        ),
    ]
}
