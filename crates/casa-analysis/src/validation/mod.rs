//! Record validation: cross-field coherence, then per-category ranges.
//!
//! The two families stay separate end to end. `RangeFilter` only accepts a
//! `CoherentRecord`, which only `CoherenceValidator` can produce.

pub mod coherence;
pub mod ranges;
pub mod reasons;

pub use coherence::{
    CoherenceParams, CoherenceReason, CoherenceRejection, CoherenceValidator, CoherentRecord,
};
pub use ranges::{RangeFilter, RangeReason};
pub use reasons::{join_reasons, RejectionReason};
