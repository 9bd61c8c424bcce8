//! Run-level counts and percentages, reported alongside the data.

use casa_core::types::collections::BTreeMap;
use serde::Serialize;

use super::types::RecordOutcome;
use crate::grouping::GroupReport;
use crate::repair::Provenance;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    /// Records handed to the run, before screening.
    pub received: usize,
    /// Records dropped for breaking the input contract.
    pub dropped: usize,
    /// Records that entered repair.
    pub processed: usize,
    pub repaired: usize,
    pub imputed_fields: usize,
    pub corrected_fields: usize,
    pub coherence_rejected: usize,
    pub range_rejected: usize,
    pub passed: usize,
    pub groups: usize,
    pub group_variables: usize,
    /// Group/variable pairs whose method is `none`.
    pub insufficient: usize,
    pub repaired_pct: f64,
    pub coherence_rejected_pct: f64,
    pub range_rejected_pct: f64,
    pub passed_pct: f64,
    pub insufficient_pct: f64,
    /// Rejections by reason code, e.g. `area_out_of_range`.
    pub reason_counts: BTreeMap<String, usize>,
}

fn pct(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        100.0 * part as f64 / whole as f64
    }
}

impl RunSummary {
    pub fn build(
        received: usize,
        dropped: usize,
        records: &[RecordOutcome],
        groups: &[GroupReport],
    ) -> Self {
        let mut s = Self {
            received,
            dropped,
            processed: records.len(),
            groups: groups.len(),
            ..Self::default()
        };

        for r in records {
            if !r.repaired_fields.is_empty() {
                s.repaired += 1;
            }
            for p in r.repaired_fields.values() {
                match p {
                    Provenance::Imputed => s.imputed_fields += 1,
                    Provenance::Corrected => s.corrected_fields += 1,
                }
            }
            if r.passed {
                s.passed += 1;
            } else if r.rejected_for_coherence() {
                s.coherence_rejected += 1;
            } else {
                s.range_rejected += 1;
            }
            for reason in &r.rejection_reasons {
                *s.reason_counts.entry(reason.code()).or_insert(0) += 1;
            }
        }

        for g in groups {
            s.group_variables += g.statistics.len();
            s.insufficient += g.statistics.values().filter(|st| st.is_insufficient()).count();
        }

        s.repaired_pct = pct(s.repaired, s.processed);
        s.coherence_rejected_pct = pct(s.coherence_rejected, s.processed);
        s.range_rejected_pct = pct(s.range_rejected, s.processed);
        s.passed_pct = pct(s.passed, s.processed);
        s.insufficient_pct = pct(s.insufficient, s.group_variables);
        s
    }

    pub fn log(&self) {
        tracing::info!(
            received = self.received,
            dropped = self.dropped,
            repaired = self.repaired,
            repaired_pct = self.repaired_pct,
            coherence_rejected = self.coherence_rejected,
            range_rejected = self.range_rejected,
            passed = self.passed,
            passed_pct = self.passed_pct,
            groups = self.groups,
            insufficient = self.insufficient,
            insufficient_pct = self.insufficient_pct,
            "validation run complete"
        );
    }
}
