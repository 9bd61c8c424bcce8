//! casa-analysis: data validation and representative-statistics engine.
//!
//! Stages, leaf to root:
//! - `repair`: per-record imputation and miscapture correction
//! - `validation`: cross-field coherence rules, then admissible ranges
//! - `grouping`: (city, operation, property_type, colony) arena
//! - `outliers`: IQR, Z-score, modified Z-score and logical-range consensus
//! - `representative`: ordered decision rules choosing mean, median or nothing
//! - `confidence`: additive 0–100 score and label per group
//! - `pipeline`: ingestion and orchestration of the stages above

pub mod confidence;
pub mod grouping;
pub mod outliers;
pub mod pipeline;
pub mod repair;
pub mod representative;
pub mod stats;
pub mod validation;

pub use pipeline::{PipelineOutput, ValidationPipeline};
