//! Runs the four methods over one group's values and reconciles them.

use casa_core::config::{LogicalBound, OutlierConfig};
use casa_core::types::{Operation, Variable};
use serde::Serialize;

use super::iqr::{self, TukeyFences};
use super::logical::{self, LogicalRanges};
use super::mad;
use super::types::{OutlierBounds, OutlierMethod, OutlierResult, OutlierVerdict, SkipReason};
use super::zscore;
use crate::stats::descriptive;

/// Resolved thresholds for outlier detection.
#[derive(Debug, Clone)]
pub struct OutlierParams {
    /// IQR multiplier for Tukey fences (default 1.5).
    pub iqr_multiplier: f64,
    /// IQR multiplier for the informational extreme fences (default 3.0).
    pub extreme_iqr_multiplier: f64,
    /// Z-score threshold (default 3.0).
    pub z_threshold: f64,
    /// Modified Z-score threshold (default 3.5).
    pub mad_threshold: f64,
    /// Groups smaller than this rely on the logical range only (default 4).
    pub min_statistical_n: usize,
    /// Agreeing methods needed for a consensus outlier (default 2).
    pub consensus_threshold: u8,
    pub logical: Vec<LogicalBound>,
}

impl From<&OutlierConfig> for OutlierParams {
    fn from(config: &OutlierConfig) -> Self {
        Self {
            iqr_multiplier: config.effective_iqr_multiplier(),
            extreme_iqr_multiplier: config.effective_extreme_iqr_multiplier(),
            z_threshold: config.effective_z_threshold(),
            mad_threshold: config.effective_mad_threshold(),
            min_statistical_n: config.effective_min_statistical_n(),
            consensus_threshold: config.effective_consensus_threshold(),
            logical: config.effective_logical(),
        }
    }
}

impl Default for OutlierParams {
    fn default() -> Self {
        Self::from(&OutlierConfig::default())
    }
}

/// Outcome of detection for one variable of one group.
#[derive(Debug, Clone, Serialize)]
pub struct VariableOutliers {
    pub variable: Variable,
    /// One verdict per analyzed value, aligned with the input slice.
    pub verdicts: Vec<OutlierVerdict>,
    pub bounds: OutlierBounds,
    /// Statistical methods that did not run, with the reason.
    pub skipped: Vec<(OutlierMethod, SkipReason)>,
}

impl VariableOutliers {
    /// Values flagged by at least one method.
    pub fn outlier_count(&self) -> usize {
        self.verdicts.iter().filter(|v| v.is_outlier()).count()
    }

    /// Values flagged by enough methods to reach consensus.
    pub fn consensus_outlier_count(&self) -> usize {
        self.verdicts.iter().filter(|v| v.consensus_outlier).count()
    }

    /// `outlier_count / n`, zero for an empty group.
    pub fn outlier_ratio(&self) -> f64 {
        if self.verdicts.is_empty() {
            0.0
        } else {
            self.outlier_count() as f64 / self.verdicts.len() as f64
        }
    }
}

/// Multi-method outlier detector for a single group/variable at a time.
pub struct OutlierDetector {
    params: OutlierParams,
    logical: LogicalRanges,
}

impl OutlierDetector {
    pub fn new(params: OutlierParams) -> Self {
        let logical = LogicalRanges::new(params.logical.clone());
        Self { params, logical }
    }

    pub fn with_defaults() -> Self {
        Self::new(OutlierParams::default())
    }

    pub fn params(&self) -> &OutlierParams {
        &self.params
    }

    /// Flag every value with the four methods and count agreement.
    pub fn detect(
        &self,
        values: &[f64],
        variable: Variable,
        operation: Operation,
    ) -> VariableOutliers {
        let n = values.len();
        let p = &self.params;
        let mut bounds = OutlierBounds::default();
        let mut skipped = Vec::new();

        let mut iqr_flags = vec![false; n];
        let mut extreme_flags = vec![false; n];
        match iqr::detect(values, p.iqr_multiplier, p.min_statistical_n) {
            Ok((fences, results)) => {
                mark(&mut iqr_flags, &results);
                bounds.q1 = Some(fences.q1);
                bounds.q3 = Some(fences.q3);
                bounds.iqr = Some(fences.iqr);
                bounds.lower_fence = Some(fences.lower);
                bounds.upper_fence = Some(fences.upper);

                let sorted = descriptive::sorted(values);
                if let Some(extreme) = TukeyFences::from_sorted(&sorted, p.extreme_iqr_multiplier) {
                    for (flag, &v) in extreme_flags.iter_mut().zip(values) {
                        *flag = !extreme.contains(v);
                    }
                    bounds.lower_extreme_fence = Some(extreme.lower);
                    bounds.upper_extreme_fence = Some(extreme.upper);
                }
            }
            Err(reason) => skipped.push((OutlierMethod::Iqr, reason)),
        }

        let mut z_flags = vec![false; n];
        match zscore::detect(values, p.z_threshold, p.min_statistical_n) {
            Ok((mean, std_dev, results)) => {
                mark(&mut z_flags, &results);
                bounds.mean = Some(mean);
                bounds.std_dev = Some(std_dev);
            }
            Err(reason) => skipped.push((OutlierMethod::ZScore, reason)),
        }

        let mut mad_flags = vec![false; n];
        match mad::detect(values, p.mad_threshold, p.min_statistical_n) {
            Ok((median, mad, results)) => {
                mark(&mut mad_flags, &results);
                bounds.median = Some(median);
                bounds.mad = Some(mad);
            }
            Err(reason) => skipped.push((OutlierMethod::ModifiedZScore, reason)),
        }

        let interval = self.logical.interval(variable, operation);
        let mut logical_flags = vec![false; n];
        mark(&mut logical_flags, &logical::detect(values, interval));
        bounds.logical_min = interval.map(|i| i.min);
        bounds.logical_max = interval.map(|i| i.max);

        if !skipped.is_empty() {
            tracing::trace!(%variable, n, ?skipped, "outlier methods skipped");
        }

        let verdicts = (0..n)
            .map(|i| {
                OutlierVerdict::from_flags(
                    iqr_flags[i],
                    z_flags[i],
                    mad_flags[i],
                    logical_flags[i],
                    extreme_flags[i],
                    p.consensus_threshold,
                )
            })
            .collect();

        VariableOutliers {
            variable,
            verdicts,
            bounds,
            skipped,
        }
    }
}

fn mark(flags: &mut [bool], results: &[OutlierResult]) {
    for r in results {
        if let Some(flag) = flags.get_mut(r.index) {
            *flag = true;
        }
    }
}
