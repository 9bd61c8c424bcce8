//! Logical-range detection (always active, independent of group statistics).
//!
//! Catches data-entry errors that look statistically normal inside a group
//! corrupted the same way but are physically impossible.

use casa_core::config::LogicalBound;
use casa_core::types::{Operation, Variable};

use super::types::{OutlierMethod, OutlierResult};

/// Inclusive admissible interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogicalInterval {
    pub min: f64,
    pub max: f64,
}

impl LogicalInterval {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Lookup of logical bounds by variable and operation.
#[derive(Debug, Clone, Default)]
pub struct LogicalRanges {
    bounds: Vec<LogicalBound>,
}

impl LogicalRanges {
    pub fn new(bounds: Vec<LogicalBound>) -> Self {
        Self { bounds }
    }

    /// Operation-specific bounds win over bounds that apply to both operations.
    pub fn interval(&self, variable: Variable, operation: Operation) -> Option<LogicalInterval> {
        let specific = self
            .bounds
            .iter()
            .find(|b| b.variable == variable && b.operation == Some(operation));
        let general = || {
            self.bounds
                .iter()
                .find(|b| b.variable == variable && b.operation.is_none())
        };
        specific.or_else(general).map(|b| LogicalInterval {
            min: b.min,
            max: b.max,
        })
    }
}

/// Flag every value outside `interval`. No interval means nothing is flagged.
pub fn detect(values: &[f64], interval: Option<LogicalInterval>) -> Vec<OutlierResult> {
    let Some(interval) = interval else {
        return Vec::new();
    };

    values
        .iter()
        .enumerate()
        .filter(|(_, &v)| !interval.contains(v))
        .map(|(index, &value)| OutlierResult {
            index,
            value,
            test_statistic: if value < interval.min {
                interval.min - value
            } else {
                value - interval.max
            },
            method: OutlierMethod::LogicalRange,
        })
        .collect()
}
