//! Orchestrates one validation run.
//!
//! Phase 1: screen inputs (finite values, unique ids), once per batch
//! Phase 2: repair, coherence, ranges (parallel per record)
//! Phase 3: group passed records into the arena
//! Phase 4: outliers, selection, confidence (parallel per group)
//! Phase 5: attach verdicts to records and summarize

use casa_core::config::EngineConfig;
use casa_core::errors::PipelineResult;
use casa_core::types::collections::BTreeMap;
use casa_core::types::{Record, Variable};
use rayon::prelude::*;
use smallvec::SmallVec;

use super::ingest::{self, RawListing};
use super::summary::RunSummary;
use super::types::{DroppedListing, PipelineOutput, RecordOutcome};
use crate::confidence::{ConfidenceInputs, ConfidenceScorer};
use crate::grouping::{Group, GroupArena, GroupReport, GroupStatistics};
use crate::outliers::{OutlierDetector, OutlierParams, OutlierVerdict};
use crate::repair::{RecordRepairer, RepairParams};
use crate::representative::{RepresentativeSelector, SelectorParams};
use crate::validation::{CoherenceParams, CoherenceValidator, RangeFilter, RejectionReason};

/// Verdicts of one group, keyed by index into the passed-record slice.
type GroupVerdicts = Vec<(usize, Variable, OutlierVerdict)>;

/// Rejection reasons of one record; rarely more than two.
type Reasons = SmallVec<[RejectionReason; 2]>;

/// The whole engine, configured once and reusable across runs.
pub struct ValidationPipeline {
    repairer: RecordRepairer,
    coherence: CoherenceValidator,
    ranges: RangeFilter,
    detector: OutlierDetector,
    selector: RepresentativeSelector,
    scorer: ConfidenceScorer,
    variables: Vec<Variable>,
    primary_variable: Variable,
    pool: Option<rayon::ThreadPool>,
}

impl ValidationPipeline {
    pub fn new(config: &EngineConfig) -> Self {
        let pool = config.pipeline.threads.and_then(|threads| {
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| tracing::warn!(threads, error = %e, "falling back to the global pool"))
                .ok()
        });

        Self {
            repairer: RecordRepairer::new(RepairParams::from(&config.repair)),
            coherence: CoherenceValidator::new(CoherenceParams::from(&config.coherence)),
            ranges: RangeFilter::new(&config.ranges),
            detector: OutlierDetector::new(OutlierParams::from(&config.outliers)),
            selector: RepresentativeSelector::new(&SelectorParams::from(&config.selector)),
            scorer: ConfidenceScorer::from_config(&config.confidence),
            variables: config.pipeline.effective_variables(),
            primary_variable: config.pipeline.effective_primary_variable(),
            pool,
        }
    }

    /// Admit upstream rows, then run on the ones that satisfy the input contract.
    pub fn run_raw(&self, rows: Vec<RawListing>) -> PipelineOutput {
        let received = rows.len();
        self.execute(received, ingest::admit(rows))
    }

    /// Run every stage over a fully materialized batch. Never fails: bad
    /// records are dropped or rejected and reported in the output.
    pub fn run(&self, records: Vec<Record>) -> PipelineOutput {
        let received = records.len();
        self.execute(received, ingest::screen(records))
    }

    /// `admitted` has already been screened for finite values and unique ids.
    fn execute(&self, received: usize, admitted: PipelineResult<Vec<Record>>) -> PipelineOutput {
        let span = tracing::info_span!(
            "validation_run",
            records = received,
            normality_test = self.selector.normality_test_name()
        );
        let _guard = span.enter();

        let dropped = admitted.errors.iter().map(DroppedListing::from).collect();
        let output = match &self.pool {
            Some(pool) => pool.install(|| self.run_stages(received, admitted.data, dropped)),
            None => self.run_stages(received, admitted.data, dropped),
        };
        output.summary.log();
        output
    }

    fn run_stages(
        &self,
        received: usize,
        records: Vec<Record>,
        dropped: Vec<DroppedListing>,
    ) -> PipelineOutput {
        // Phase 2: per-record repair and validation
        let mut outcomes: Vec<RecordOutcome> = records
            .into_par_iter()
            .map(|record| self.process_record(record))
            .collect();

        // Phase 3: arena over passed records
        let passed_positions: Vec<usize> = outcomes
            .iter()
            .enumerate()
            .filter(|(_, o)| o.passed)
            .map(|(i, _)| i)
            .collect();
        let passed: Vec<Record> = passed_positions
            .iter()
            .map(|&i| outcomes[i].record.clone())
            .collect();
        let arena = GroupArena::build(&passed);
        tracing::debug!(groups = arena.len(), passed = passed.len(), "group arena built");

        // Phase 4: per-group statistics
        let analyzed: Vec<(GroupReport, GroupVerdicts)> = arena
            .groups()
            .par_iter()
            .map(|group| self.analyze_group(group, &passed))
            .collect();

        // Phase 5: attach verdicts
        let mut groups = Vec::with_capacity(analyzed.len());
        for (report, verdicts) in analyzed {
            for (passed_index, variable, verdict) in verdicts {
                if let Some(outcome) = passed_positions
                    .get(passed_index)
                    .and_then(|&i| outcomes.get_mut(i))
                {
                    outcome.outlier_verdicts.insert(variable, verdict);
                }
            }
            groups.push(report);
        }

        let summary = RunSummary::build(received, dropped.len(), &outcomes, &groups);
        PipelineOutput {
            records: outcomes,
            groups,
            dropped,
            summary,
        }
    }

    /// Repair, then coherence, then ranges. Range checks only see coherent records.
    fn process_record(&self, record: Record) -> RecordOutcome {
        let repaired = self.repairer.repair(record);
        let provenance = repaired.provenance;

        let (record, reasons): (Record, Reasons) = match self.coherence.validate(repaired.record) {
            Ok(coherent) => {
                let range_reasons = self.ranges.check(&coherent);
                let reasons = range_reasons.into_iter().map(RejectionReason::from).collect();
                (coherent.into_inner(), reasons)
            }
            Err(rejection) => {
                let reasons = rejection.reasons.into_iter().map(RejectionReason::from).collect();
                (rejection.record, reasons)
            }
        };

        RecordOutcome {
            id: record.id.clone(),
            repaired_fields: provenance,
            passed: reasons.is_empty(),
            rejection_reasons: reasons.into_vec(),
            outlier_verdicts: BTreeMap::new(),
            record,
        }
    }

    /// Statistics for every configured variable that has at least one value
    /// in the group. Reads only this group's members.
    fn analyze_group(&self, group: &Group, passed: &[Record]) -> (GroupReport, GroupVerdicts) {
        let mut statistics = BTreeMap::new();
        let mut verdicts = Vec::new();

        for &variable in &self.variables {
            let (members, values): (Vec<usize>, Vec<f64>) = group
                .members
                .iter()
                .filter_map(|&i| {
                    passed
                        .get(i)
                        .and_then(|r| variable.value_of(r))
                        .filter(|v| v.is_finite())
                        .map(|v| (i, v))
                })
                .unzip();
            if values.is_empty() {
                continue;
            }

            let outliers = self.detector.detect(&values, variable, group.key.operation);
            let (profile, selection) = self.selector.evaluate(&values);
            let confidence = self
                .scorer
                .score(&ConfidenceInputs::from_profile(&profile, outliers.outlier_ratio()));
            tracing::debug!(
                group = %group.key,
                %variable,
                n = profile.n,
                method = %selection.method,
                score = confidence.score,
                "group variable analyzed"
            );

            verdicts.extend(
                members
                    .iter()
                    .zip(&outliers.verdicts)
                    .map(|(&i, &verdict)| (i, variable, verdict)),
            );
            statistics.insert(
                variable,
                GroupStatistics::assemble(&profile, &outliers, selection, confidence),
            );
        }

        let report = GroupReport {
            key: group.key.clone(),
            member_ids: group.records(passed).map(|r| r.id.clone()).collect(),
            primary_variable: self.primary_variable,
            statistics,
        };
        (report, verdicts)
    }
}

impl Default for ValidationPipeline {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}
