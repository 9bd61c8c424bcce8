//! Property-based tests for the engine's invariants.
//!
//! Uses proptest to fuzz-verify:
//!   - repair idempotence
//!   - consensus_count is exactly the sum of the four method flags
//!   - n < 5 always selects `none`, whatever the statistics say
//!   - range checks are inclusive and symmetric at both bounds
//!   - confidence score stays in [0, 100] with inclusive label edges

use proptest::prelude::*;

use casa_analysis::confidence::{ConfidenceInputs, ConfidenceLabel, ConfidenceScorer};
use casa_analysis::outliers::OutlierDetector;
use casa_analysis::repair::RecordRepairer;
use casa_analysis::representative::{
    default_rules, RepresentativeMethod, RepresentativeSelector, SelectorParams,
};
use casa_analysis::stats::DistributionProfile;
use casa_analysis::validation::{CoherenceValidator, RangeFilter};
use casa_core::config::{default_range_table, RangeConfig};
use casa_core::types::{Field, Operation, PropertyType, Record, Variable};

fn optional(range: std::ops::Range<f64>) -> impl Strategy<Value = Option<f64>> {
    prop::option::of(range)
}

fn arb_record() -> impl Strategy<Value = Record> {
    (
        0.0f64..600.0,
        optional(-1.0..12.0),
        optional(-1.0..120.0),
        optional(-3.0..90.0),
        optional(0.0..2_200.0),
        prop::bool::ANY,
    )
        .prop_map(|(area, bedrooms, bathrooms, parking, age, apartment)| {
            let property_type = if apartment {
                PropertyType::Apartment
            } else {
                PropertyType::House
            };
            let mut r =
                Record::new("p", "cdmx", Operation::Sale, property_type, "roma", area, 2_000_000.0);
            r.bedrooms = bedrooms.map(f64::round);
            r.bathrooms = bathrooms.map(f64::round);
            r.parking_spots = parking.map(f64::round);
            r.age_years = age.map(f64::round);
            r
        })
}

// ═══════════════════════════════════════════════════════════════════
// Repair
// ═══════════════════════════════════════════════════════════════════

proptest! {
    /// Repairing an already repaired record changes nothing.
    #[test]
    fn prop_repair_idempotent(record in arb_record()) {
        let repairer = RecordRepairer::default();
        let first = repairer.repair(record);
        let second = repairer.repair(first.record.clone());
        prop_assert!(!second.was_repaired(), "second pass changed {:?}", second.provenance);
        prop_assert_eq!(second.record, first.record);
    }

    /// Imputed bedrooms always land in [1, 4].
    #[test]
    fn prop_imputed_bedrooms_clamped(area in 0.1f64..5_000.0) {
        let r =
            Record::new("b", "cdmx", Operation::Rent, PropertyType::House, "roma", area, 10_000.0);
        let bedrooms = RecordRepairer::default().repair(r).record.bedrooms.unwrap();
        prop_assert!((1.0..=4.0).contains(&bedrooms));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Outlier consensus
// ═══════════════════════════════════════════════════════════════════

proptest! {
    /// consensus_count is the exact number of raised method flags.
    #[test]
    fn prop_consensus_is_flag_sum(values in prop::collection::vec(-1.0e6f64..1.0e7, 0..80)) {
        let out =
            OutlierDetector::with_defaults().detect(&values, Variable::Price, Operation::Sale);
        prop_assert_eq!(out.verdicts.len(), values.len());
        for v in &out.verdicts {
            let sum = [v.iqr_flag, v.zscore_flag, v.modified_zscore_flag, v.logical_range_flag]
                .iter()
                .filter(|f| **f)
                .count() as u8;
            prop_assert_eq!(v.consensus_count, sum);
            prop_assert_eq!(v.consensus_outlier, sum >= 2);
            prop_assert!(v.consensus_count <= 4);
        }
        prop_assert!(out.consensus_outlier_count() <= out.outlier_count());
    }

    /// Below the statistical minimum only the logical range can flag.
    #[test]
    fn prop_tiny_groups_logical_only(values in prop::collection::vec(0.0f64..1.0e9, 0..4)) {
        let out =
            OutlierDetector::with_defaults().detect(&values, Variable::Price, Operation::Sale);
        for v in &out.verdicts {
            prop_assert!(!v.iqr_flag && !v.zscore_flag && !v.modified_zscore_flag);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// Selector precedence
// ═══════════════════════════════════════════════════════════════════

proptest! {
    /// n < 5 selects `none` for any values, including non-finite ones.
    #[test]
    fn prop_small_n_always_none(
        values in prop::collection::vec(prop_oneof![any::<f64>(), Just(f64::NAN)], 0..5)
    ) {
        let (_, selection) = RepresentativeSelector::default().evaluate(&values);
        prop_assert_eq!(selection.method, RepresentativeMethod::None);
        prop_assert_eq!(selection.value, None);
    }

    /// Precedence holds on hand-built profiles regardless of the statistics.
    #[test]
    fn prop_small_n_beats_any_profile(
        n in 0usize..5,
        skew in prop::option::of(-10.0f64..10.0),
        cv in prop::option::of(0.0f64..3.0),
        p in prop::option::of(0.0f64..1.0),
    ) {
        let profile = DistributionProfile {
            skewness: skew,
            cv,
            normality_p_value: p,
            mean: Some(1.0),
            median: Some(1.0),
            ..DistributionProfile::with_n(n)
        };
        let rules = default_rules(&SelectorParams::default());
        let first = rules.iter().find(|r| r.matches(&profile)).unwrap();
        prop_assert_eq!(first.method, RepresentativeMethod::None);
    }

    /// A mean is never reported below n = 30.
    #[test]
    fn prop_no_mean_below_thirty(values in prop::collection::vec(1.0f64..1.0e6, 0..30)) {
        let (_, selection) = RepresentativeSelector::default().evaluate(&values);
        prop_assert_ne!(selection.method, RepresentativeMethod::MeanStdDev);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Range symmetry
// ═══════════════════════════════════════════════════════════════════

proptest! {
    /// A field is reported iff it lies outside its inclusive bounds.
    #[test]
    fn prop_range_violation_iff_outside(
        entry_index in 0usize..10,
        area_t in -0.2f64..1.2,
        price_t in -0.2f64..1.2,
    ) {
        let entry = &default_range_table()[entry_index];
        let l = &entry.limits;
        let area = (l.area_min + area_t * (l.area_max - l.area_min)).max(1.0);
        let price = l.price_min + price_t * (l.price_max - l.price_min);
        let property_type = entry.property_type.clone();
        let record = Record::new("r", "cdmx", entry.operation, property_type, "roma", area, price);

        let coherent = CoherenceValidator::default().validate(record.clone()).unwrap();
        let reasons = RangeFilter::new(&RangeConfig::default()).check(&coherent);
        let flagged = |field: Field| reasons.iter().any(|r| r.field == field);

        prop_assert_eq!(flagged(Field::Area), area < l.area_min || area > l.area_max);
        prop_assert_eq!(flagged(Field::Price), price < l.price_min || price > l.price_max);
        let pxm2 = record.price_per_area().unwrap();
        prop_assert_eq!(flagged(Field::PricePerArea), pxm2 < l.pxm2_min || pxm2 > l.pxm2_max);
    }
}

/// Area, price and price-per-area all exactly on an inclusive bound pass;
/// one unit beyond any of them fails.
#[test]
fn range_bounds_inclusive_both_ends() {
    let filter = RangeFilter::new(&RangeConfig::default());
    let check = |area: f64, price: f64| {
        let r =
            Record::new("r", "cdmx", Operation::Sale, PropertyType::Apartment, "roma", area, price);
        filter.check(&CoherenceValidator::default().validate(r).unwrap()).len()
    };

    // 500000 / 40 = 12500: price and price-per-area on their lower bounds.
    assert_eq!(check(40.0, 500_000.0), 0);
    // 25000000 / 200 = 125000: area and price on their upper bounds.
    assert_eq!(check(200.0, 25_000_000.0), 0);
    // 4500000 / 30 = 150000: area on its lower bound, price-per-area on its upper.
    assert_eq!(check(30.0, 4_500_000.0), 0);

    assert_eq!(check(29.0, 4_350_000.0), 1);
    assert_eq!(check(201.0, 25_000_000.0), 1);
    assert_eq!(check(200.0, 25_000_001.0), 1);
    assert_eq!(check(40.0, 499_999.0), 2);
}

// ═══════════════════════════════════════════════════════════════════
// Confidence
// ═══════════════════════════════════════════════════════════════════

proptest! {
    /// Score is clamped and the label always matches it.
    #[test]
    fn prop_confidence_bounded(
        base in 0.0f64..=100.0,
        n in 0usize..500,
        outlier_ratio in 0.0f64..=1.0,
        dispersion in prop::option::of(0.0f64..5.0),
        cv in prop::option::of(0.0f64..5.0),
    ) {
        let a = ConfidenceScorer::new(base).score(&ConfidenceInputs {
            n,
            outlier_ratio,
            dispersion_ratio: dispersion,
            cv,
        });
        prop_assert!((0.0..=100.0).contains(&a.score));
        prop_assert_eq!(a.label, ConfidenceLabel::from_score(a.score));
        let raw = base + a.adjustments.iter().map(|(_, d)| d).sum::<f64>();
        prop_assert!((a.score - raw.clamp(0.0, 100.0)).abs() < 1e-9);
    }

    /// Adjustments do not depend on evaluation order.
    #[test]
    fn prop_adjustments_order_insensitive(
        n in 0usize..300,
        outlier_ratio in 0.0f64..=1.0,
        cv in 0.0f64..2.0,
    ) {
        let inputs = ConfidenceInputs {
            n,
            outlier_ratio,
            dispersion_ratio: Some(0.4),
            cv: Some(cv),
        };
        let forward = ConfidenceScorer::default().score(&inputs);
        let total: f64 = forward.adjustments.iter().rev().map(|(_, d)| d).sum();
        prop_assert!((forward.score - (50.0 + total).clamp(0.0, 100.0)).abs() < 1e-9);
    }
}

#[test]
fn confidence_label_lower_edges_inclusive() {
    for (score, label) in [
        (82.0, ConfidenceLabel::VeryHigh),
        (68.0, ConfidenceLabel::High),
        (50.0, ConfidenceLabel::Medium),
        (35.0, ConfidenceLabel::Low),
        (0.0, ConfidenceLabel::VeryLow),
        (100.0, ConfidenceLabel::VeryHigh),
    ] {
        assert_eq!(ConfidenceLabel::from_score(score), label, "score {score}");
    }
}
