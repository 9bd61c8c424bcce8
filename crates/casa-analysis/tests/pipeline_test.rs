//! End-to-end runs of the validation pipeline.
//!
//! Scenarios cover the decision points a report consumer relies on:
//! repair before validation, coherence vs range rejections, IQR/MAD
//! agreement on a small group, and the mean path for a large normal group.

use casa_analysis::confidence::ConfidenceLabel;
use casa_analysis::outliers::{OutlierDetector, OutlierMethod, SkipReason};
use casa_analysis::pipeline::{admit, RawListing};
use casa_analysis::repair::Provenance;
use casa_analysis::representative::{RepresentativeMethod, RepresentativeSelector};
use casa_analysis::{PipelineOutput, ValidationPipeline};
use casa_core::config::{EngineConfig, PipelineConfig};
use casa_core::types::{Field, Operation, PropertyType, Record, Variable};
use statrs::distribution::{ContinuousCDF, Normal};

fn apartment_sale(id: &str, area: f64, price: f64) -> Record {
    Record::new(id, "cdmx", Operation::Sale, PropertyType::Apartment, "narvarte", area, price)
}

fn with_rooms(mut record: Record, bedrooms: f64, bathrooms: f64, parking: f64) -> Record {
    record.bedrooms = Some(bedrooms);
    record.bathrooms = Some(bathrooms);
    record.parking_spots = Some(parking);
    record
}

/// Five warehouse listings with one extreme price. "bodega" has no range
/// row, so the permissive fallback applies and every record passes.
fn scenario_a_records() -> Vec<Record> {
    [100_000.0, 105_000.0, 110_000.0, 108_000.0, 950_000.0]
        .into_iter()
        .enumerate()
        .map(|(i, price)| {
            Record::new(
                format!("A{i}"),
                "cdmx",
                Operation::Sale,
                PropertyType::from_label("Bodega"),
                "vallejo",
                100.0,
                price,
            )
        })
        .collect()
}

/// Forty price-per-area values at normal quantiles (mean 100000, sd 20000).
fn scenario_d_records() -> Vec<Record> {
    let normal = Normal::new(100_000.0, 20_000.0).unwrap();
    (0..40)
        .map(|i| {
            let p = (i as f64 + 0.5) / 40.0;
            let pxm2 = normal.inverse_cdf(p);
            with_rooms(apartment_sale(&format!("D{i}"), 80.0, pxm2 * 80.0), 2.0, 2.0, 1.0)
        })
        .collect()
}

fn run(records: Vec<Record>) -> PipelineOutput {
    ValidationPipeline::new(&EngineConfig::default()).run(records)
}

#[test]
fn scenario_a_small_group_iqr_flag_and_median_range() {
    let values = [100_000.0, 105_000.0, 110_000.0, 108_000.0, 950_000.0];
    let outliers =
        OutlierDetector::with_defaults().detect(&values, Variable::Price, Operation::Sale);
    assert!(outliers.verdicts[4].iqr_flag);
    assert_eq!(outliers.bounds.upper_fence, Some(117_500.0));
    assert!(outliers.verdicts[..4].iter().all(|v| !v.iqr_flag));

    let (_, selection) = RepresentativeSelector::default().evaluate(&values);
    assert_eq!(selection.method, RepresentativeMethod::MedianRange);
    assert_eq!(selection.value, Some(108_000.0));

    let output = run(scenario_a_records());
    assert_eq!(output.groups.len(), 1);
    let price = &output.groups[0].statistics[&Variable::Price];
    assert_eq!(price.count, 5);
    assert_eq!(price.representative_method, RepresentativeMethod::MedianRange);
    assert_eq!(price.representative_value, Some(108_000.0));
    assert_eq!(price.median, Some(108_000.0));

    let extreme = output.record("A4").unwrap();
    let verdict = extreme.outlier_verdicts[&Variable::Price];
    assert!(verdict.iqr_flag);
    assert!(verdict.modified_zscore_flag);
    assert!(!verdict.zscore_flag);
    assert_eq!(verdict.consensus_count, 2);
    assert!(extreme.is_consensus_outlier(Variable::Price));
    assert!(!output.record("A0").unwrap().is_consensus_outlier(Variable::Price));
}

#[test]
fn scenario_b_bathrooms_excessive() {
    let mut record = apartment_sale("B", 60.0, 2_000_000.0);
    record.bedrooms = Some(2.0);
    record.bathrooms = Some(6.0);
    let output = run(vec![record]);

    let outcome = output.record("B").unwrap();
    assert!(!outcome.passed);
    let reasons: Vec<String> = outcome.rejection_reasons.iter().map(ToString::to_string).collect();
    assert_eq!(reasons, vec!["bathrooms_excessive"]);
    assert!(outcome.rejected_for_coherence());
    assert!(outcome.outlier_verdicts.is_empty());
    assert!(output.groups.is_empty());
}

#[test]
fn scenario_c_area_out_of_range() {
    let output = run(vec![apartment_sale("C", 25.0, 1_000_000.0)]);
    let outcome = output.record("C").unwrap();
    assert!(!outcome.passed);
    let reasons: Vec<String> = outcome.rejection_reasons.iter().map(ToString::to_string).collect();
    assert_eq!(reasons, vec!["area_out_of_range_25_30-200"]);
    assert!(!outcome.rejected_for_coherence());
}

#[test]
fn scenario_d_normal_group_reports_mean() {
    let output = run(scenario_d_records());
    assert!(output.records.iter().all(|r| r.passed));
    assert_eq!(output.groups.len(), 1);

    let report = &output.groups[0];
    let pxm2 = report.primary().unwrap();
    assert_eq!(pxm2.variable, Variable::PricePerArea);
    assert_eq!(pxm2.count, 40);
    assert!(pxm2.skewness.unwrap().abs() < 0.1);
    assert!(pxm2.cv.unwrap() < 0.25);
    assert!(pxm2.normality_p_value.unwrap() > 0.05);
    assert_eq!(pxm2.representative_method, RepresentativeMethod::MeanStdDev);
    assert_eq!(pxm2.justification, "n>=30 & normality accepted");
    assert!((pxm2.representative_value.unwrap() - 100_000.0).abs() < 1.0);
    assert!(pxm2.outlier_ratio < 0.08);
    assert!(pxm2.confidence_label >= ConfidenceLabel::High);
    assert_eq!(pxm2.confidence_score, 85.0);
}

#[test]
fn scenario_d_constant_area_skips_moment_methods() {
    let output = run(scenario_d_records());
    let area = &output.groups[0].statistics[&Variable::Area];
    assert!(area
        .skipped_methods
        .contains(&(OutlierMethod::ZScore, SkipReason::ZeroStdDev)));
    assert!(area
        .skipped_methods
        .contains(&(OutlierMethod::ModifiedZScore, SkipReason::ZeroMad)));
    assert_eq!(area.outlier_count, 0);
    assert_eq!(area.representative_method, RepresentativeMethod::MedianIqr);
}

#[test]
fn scenario_e_decimal_shift_survives_validation() {
    let mut record = apartment_sale("E", 80.0, 3_000_000.0);
    record.bedrooms = Some(2.0);
    record.bathrooms = Some(25.0);
    let output = run(vec![record]);

    let outcome = output.record("E").unwrap();
    assert!(outcome.passed, "reasons: {:?}", outcome.rejection_reasons);
    assert_eq!(outcome.record.bathrooms, Some(2.5));
    assert_eq!(outcome.repaired_fields.get(&Field::Bathrooms), Some(&Provenance::Corrected));
    assert_eq!(outcome.repaired_fields.get(&Field::ParkingSpots), Some(&Provenance::Imputed));
}

#[test]
fn small_group_reports_no_value() {
    let records = (0..3)
        .map(|i| {
            let record = apartment_sale(&format!("S{i}"), 70.0, 3_500_000.0 + i as f64);
            with_rooms(record, 2.0, 1.0, 1.0)
        })
        .collect();
    let output = run(records);
    let stats = output.groups[0].primary().unwrap();
    assert_eq!(stats.representative_method, RepresentativeMethod::None);
    assert_eq!(stats.representative_value, None);
    assert!(stats.is_insufficient());
    // -25 for volume, offset by a clean, tight distribution.
    assert_eq!(stats.confidence_score, 50.0);
    assert_eq!(stats.confidence_label, ConfidenceLabel::Medium);
    assert_eq!(stats.skipped_methods.len(), 3);
}

#[test]
fn summary_counts_every_outcome() {
    let mut records = scenario_a_records();
    let mut b = apartment_sale("B", 60.0, 2_000_000.0);
    b.bedrooms = Some(2.0);
    b.bathrooms = Some(6.0);
    records.push(b);
    records.push(apartment_sale("C", 25.0, 1_000_000.0));
    let mut e = apartment_sale("E", 80.0, 3_000_000.0);
    e.bedrooms = Some(2.0);
    e.bathrooms = Some(25.0);
    records.push(e);

    let summary = run(records).summary;
    assert_eq!(summary.received, 8);
    assert_eq!(summary.processed, 8);
    assert_eq!(summary.dropped, 0);
    assert_eq!(summary.passed, 6);
    assert_eq!(summary.coherence_rejected, 1);
    assert_eq!(summary.range_rejected, 1);
    assert_eq!(summary.repaired, 8);
    assert_eq!(summary.passed_pct, 75.0);
    assert_eq!(summary.coherence_rejected_pct, 12.5);
    assert_eq!(summary.reason_counts.get("bathrooms_excessive"), Some(&1));
    assert_eq!(summary.reason_counts.get("area_out_of_range"), Some(&1));
    assert_eq!(summary.groups, 2);
}

#[test]
fn raw_rows_are_admitted_and_drops_reported() {
    let rows: Vec<RawListing> = serde_json::from_str(
        r#"[
            {"id":"R1","city":"CDMX","operation":"Venta","property_type":"Departamento",
             "colony":"Narvarte","area":"80","price":"$3,000,000","bedrooms":2,"bathrooms":25},
            {"id":"R2","city":"CDMX","operation":"Venta","property_type":"Departamento",
             "colony":"Narvarte","area":80},
            {"id":"R3","city":"CDMX","operation":"traspaso","property_type":"Casa",
             "colony":"Roma","area":100,"price":1000000},
            {"id":"R1","city":"CDMX","operation":"Renta","property_type":"Casa",
             "colony":"Roma","area":100,"price":20000}
        ]"#,
    )
    .unwrap();

    let output = ValidationPipeline::default().run_raw(rows);
    assert_eq!(output.summary.received, 4);
    assert_eq!(output.summary.dropped, 3);
    assert_eq!(output.records.len(), 1);
    assert!(output.record("R1").unwrap().passed);

    let codes: Vec<&str> = output.dropped.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec!["MISSING_FIELD", "INVALID_OPERATION", "DUPLICATE_LISTING"]);
    assert_eq!(output.dropped[0].id, "R2");
}

#[test]
fn raw_run_matches_direct_run_on_admitted_records() {
    let rows: Vec<RawListing> = serde_json::from_str(
        r#"[
            {"id":"D1","city":"CDMX","operation":"Venta","property_type":"Departamento",
             "colony":"Narvarte","area":80,"price":3000000,"bedrooms":2,"bathrooms":1},
            {"id":"D1","city":"CDMX","operation":"Venta","property_type":"Departamento",
             "colony":"Narvarte","area":85,"price":3100000},
            {"id":"D2","city":"CDMX","operation":"Venta","property_type":"Departamento",
             "colony":"Narvarte","area":90,"price":3300000,"bedrooms":2,"bathrooms":2},
            {"id":"D3","city":"CDMX","operation":"Venta"}
        ]"#,
    )
    .unwrap();

    let pipeline = ValidationPipeline::default();
    let raw = pipeline.run_raw(rows.clone());
    let direct = pipeline.run(admit(rows).data);

    assert_eq!(raw.records, direct.records);
    assert_eq!(raw.groups, direct.groups);
    assert!(direct.dropped.is_empty());

    let codes: Vec<&str> = raw.dropped.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec!["MISSING_FIELD", "DUPLICATE_LISTING"]);
    assert_eq!(raw.summary.received, 4);
    assert_eq!(raw.summary.received, raw.summary.dropped + raw.summary.processed);
}

#[test]
fn non_finite_records_dropped_before_repair() {
    let mut bad = apartment_sale("X", 80.0, 3_000_000.0);
    bad.bedrooms = Some(f64::INFINITY);
    let output = run(vec![bad]);
    assert!(output.records.is_empty());
    assert_eq!(output.dropped[0].code, "NON_FINITE_VALUE");
}

#[test]
fn dedicated_pool_matches_global_pool() {
    let config = EngineConfig {
        pipeline: PipelineConfig {
            threads: Some(2),
            ..PipelineConfig::default()
        },
        ..EngineConfig::default()
    };
    let pooled = ValidationPipeline::new(&config).run(scenario_d_records());
    let global = run(scenario_d_records());
    assert_eq!(pooled, global);
}

#[test]
fn configured_variables_limit_statistics() {
    let config = EngineConfig {
        pipeline: PipelineConfig {
            variables: vec![Variable::Price],
            primary_variable: Some(Variable::Price),
            ..PipelineConfig::default()
        },
        ..EngineConfig::default()
    };
    let output = ValidationPipeline::new(&config).run(scenario_d_records());
    let report = &output.groups[0];
    assert_eq!(report.statistics.len(), 1);
    assert_eq!(report.primary().unwrap().variable, Variable::Price);
    assert!(output.records[0].outlier_verdicts.contains_key(&Variable::Price));
    assert!(!output.records[0].outlier_verdicts.contains_key(&Variable::Area));
}

#[test]
fn json_report_renders_reasons_and_labels() {
    let mut records = scenario_d_records();
    records.push(apartment_sale("C", 25.0, 1_000_000.0));
    let json = run(records).to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let rejected = value["records"]
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["id"] == "C")
        .unwrap();
    assert_eq!(rejected["rejection_reasons"][0], "area_out_of_range_25_30-200");
    assert_eq!(rejected["passed"], false);

    let pxm2 = &value["groups"][0]["statistics"]["price_per_area"];
    assert_eq!(pxm2["representative_method"], "mean_stddev");
    assert_eq!(pxm2["confidence_label"], "Very High");
    assert_eq!(value["summary"]["range_rejected"], 1);
}
