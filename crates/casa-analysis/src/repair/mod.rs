//! Record repair: deterministic per-record imputation and miscapture fixes.
//!
//! Runs before any group statistics exist. Never fails: a field that cannot
//! be repaired stays missing or out of range for the validators to reject.

pub mod repairer;
pub mod rules;
pub mod types;

pub use repairer::{RecordRepairer, RepairParams};
pub use types::{Provenance, RepairOutcome};
