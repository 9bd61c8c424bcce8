//! Per-group, per-variable statistics. Built once per run, never mutated.

use casa_core::types::collections::BTreeMap;
use casa_core::types::{GroupKey, Variable};
use serde::Serialize;

use crate::confidence::{ConfidenceAssessment, ConfidenceLabel};
use crate::outliers::{OutlierMethod, SkipReason, VariableOutliers};
use crate::representative::{RepresentativeMethod, Selection};
use crate::stats::DistributionProfile;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupStatistics {
    pub variable: Variable,
    pub count: usize,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub std_dev: Option<f64>,
    pub skewness: Option<f64>,
    pub iqr: Option<f64>,
    pub q1: Option<f64>,
    pub q3: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mad: Option<f64>,
    pub cv: Option<f64>,
    pub normality_p_value: Option<f64>,
    /// Members flagged by at least one method.
    pub outlier_count: usize,
    /// Members flagged by enough methods to reach consensus.
    pub consensus_outlier_count: usize,
    pub outlier_ratio: f64,
    pub skipped_methods: Vec<(OutlierMethod, SkipReason)>,
    pub representative_method: RepresentativeMethod,
    pub representative_value: Option<f64>,
    pub justification: String,
    pub confidence_score: f64,
    pub confidence_label: ConfidenceLabel,
    pub confidence_adjustments: Vec<(&'static str, f64)>,
}

impl GroupStatistics {
    pub fn assemble(
        profile: &DistributionProfile,
        outliers: &VariableOutliers,
        selection: Selection,
        confidence: ConfidenceAssessment,
    ) -> Self {
        Self {
            variable: outliers.variable,
            count: profile.n,
            mean: profile.mean,
            median: profile.median,
            std_dev: profile.std_dev,
            skewness: profile.skewness,
            iqr: profile.iqr,
            q1: profile.q1,
            q3: profile.q3,
            min: profile.min,
            max: profile.max,
            mad: profile.mad,
            cv: profile.cv,
            normality_p_value: profile.normality_p_value,
            outlier_count: outliers.outlier_count(),
            consensus_outlier_count: outliers.consensus_outlier_count(),
            outlier_ratio: outliers.outlier_ratio(),
            skipped_methods: outliers.skipped.clone(),
            representative_method: selection.method,
            representative_value: selection.value,
            justification: selection.justification,
            confidence_score: confidence.score,
            confidence_label: confidence.label,
            confidence_adjustments: confidence.adjustments,
        }
    }

    /// Too few values for any representative value.
    pub fn is_insufficient(&self) -> bool {
        self.representative_method == RepresentativeMethod::None
    }
}

/// One group's output: identity, members and statistics per variable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupReport {
    pub key: GroupKey,
    pub member_ids: Vec<String>,
    pub primary_variable: Variable,
    pub statistics: BTreeMap<Variable, GroupStatistics>,
}

impl GroupReport {
    pub fn count(&self) -> usize {
        self.member_ids.len()
    }

    /// Statistics of the headline variable (price per area by default).
    pub fn primary(&self) -> Option<&GroupStatistics> {
        self.statistics.get(&self.primary_variable)
    }
}
