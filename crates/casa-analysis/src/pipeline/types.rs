//! Pipeline output types.

use casa_core::errors::{CasaErrorCode, PipelineError};
use casa_core::types::collections::BTreeMap;
use casa_core::types::{Field, Record, Variable};
use serde::Serialize;

use super::summary::RunSummary;
use crate::grouping::GroupReport;
use crate::outliers::OutlierVerdict;
use crate::repair::Provenance;
use crate::validation::RejectionReason;

/// Per-record result of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordOutcome {
    pub id: String,
    pub repaired_fields: BTreeMap<Field, Provenance>,
    pub passed: bool,
    /// Coherence reasons first, then range reasons.
    pub rejection_reasons: Vec<RejectionReason>,
    /// Only for passed records with a value for the variable.
    pub outlier_verdicts: BTreeMap<Variable, OutlierVerdict>,
    /// The record after repair.
    pub record: Record,
}

impl RecordOutcome {
    pub fn rejected_for_coherence(&self) -> bool {
        self.rejection_reasons
            .iter()
            .any(|r| matches!(r, RejectionReason::Coherence(_)))
    }

    pub fn is_consensus_outlier(&self, variable: Variable) -> bool {
        self.outlier_verdicts
            .get(&variable)
            .is_some_and(|v| v.consensus_outlier)
    }
}

/// A record that never entered the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DroppedListing {
    pub id: String,
    pub code: &'static str,
    pub message: String,
}

impl From<&PipelineError> for DroppedListing {
    fn from(error: &PipelineError) -> Self {
        let id = match error {
            PipelineError::Input(e) => e.listing_id().to_string(),
            PipelineError::Config(_) => String::new(),
        };
        Self {
            id,
            code: error.error_code(),
            message: error.coded_string(),
        }
    }
}

/// Everything a run produces.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PipelineOutput {
    pub records: Vec<RecordOutcome>,
    pub groups: Vec<GroupReport>,
    pub dropped: Vec<DroppedListing>,
    pub summary: RunSummary,
}

impl PipelineOutput {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn passed_records(&self) -> impl Iterator<Item = &RecordOutcome> {
        self.records.iter().filter(|r| r.passed)
    }

    pub fn record(&self, id: &str) -> Option<&RecordOutcome> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn group(&self, key: &casa_core::types::GroupKey) -> Option<&GroupReport> {
        self.groups.iter().find(|g| &g.key == key)
    }
}
