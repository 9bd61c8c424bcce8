//! Outlier detection with four independent methods and their consensus.
//!
//! Per (group, variable):
//! - IQR with Tukey fences (n ≥ 4)
//! - Classic Z-score (n ≥ 4, std > 0)
//! - Modified Z-score / MAD, the robust choice for small or skewed groups (n ≥ 4, MAD > 0)
//! - Logical range, always active, independent of group statistics
//!
//! A record is an outlier for a variable when any method flags it and a
//! consensus outlier when at least two agree.

pub mod detector;
pub mod iqr;
pub mod logical;
pub mod mad;
pub mod types;
pub mod zscore;

pub use detector::{OutlierDetector, OutlierParams, VariableOutliers};
pub use types::{OutlierBounds, OutlierMethod, OutlierResult, OutlierVerdict, SkipReason};
