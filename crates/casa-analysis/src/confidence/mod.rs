//! Group confidence: a base score plus independent additive adjustments.

pub mod scorer;
pub mod types;

pub use scorer::{ConfidenceInputs, ConfidenceScorer};
pub use types::{ConfidenceAssessment, ConfidenceLabel};
