//! Per-(property_type, operation) admissible ranges.

use casa_core::config::{RangeConfig, RangeLimits};
use casa_core::types::collections::{FxHashMap, SmallVec2};
use casa_core::types::{Field, Operation, PropertyType, Record};
use serde::Serialize;
use std::fmt;

use super::coherence::CoherentRecord;

/// A field outside its inclusive bounds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeReason {
    pub field: Field,
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

impl RangeReason {
    /// Reason code without the payload, e.g. `area_out_of_range`.
    pub fn code(&self) -> String {
        format!("{}_out_of_range", self.field)
    }
}

impl fmt::Display for RangeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_out_of_range_{}_{}-{}",
            self.field,
            format_number(self.value),
            format_number(self.min),
            format_number(self.max)
        )
    }
}

/// Integral values print without a decimal point, others with at most two decimals.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        let s = format!("{value:.2}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Range table lookup with a permissive fallback for unmapped combinations.
#[derive(Debug, Clone)]
pub struct RangeFilter {
    table: FxHashMap<(PropertyType, Operation), RangeLimits>,
    default: RangeLimits,
}

impl RangeFilter {
    pub fn new(config: &RangeConfig) -> Self {
        let table = config
            .effective_entries()
            .into_iter()
            .map(|e| ((e.property_type, e.operation), e.limits))
            .collect();
        Self {
            table,
            default: config.effective_default(),
        }
    }

    /// Limits for an exact (type, operation) key, else the fallback row.
    pub fn limits_for(&self, property_type: &PropertyType, operation: Operation) -> &RangeLimits {
        self.table
            .get(&(property_type.clone(), operation))
            .unwrap_or(&self.default)
    }

    pub fn is_mapped(&self, property_type: &PropertyType, operation: Operation) -> bool {
        self.table.contains_key(&(property_type.clone(), operation))
    }

    /// Every violated field, in table order.
    pub fn check(&self, record: &CoherentRecord) -> SmallVec2<RangeReason> {
        let r: &Record = record.record();
        let limits = self.limits_for(&r.property_type, r.operation);
        let mut reasons = SmallVec2::new();

        push_violation(
            &mut reasons,
            Field::Area,
            Some(r.area),
            Some((limits.area_min, limits.area_max)),
        );
        push_violation(
            &mut reasons,
            Field::Price,
            Some(r.price),
            Some((limits.price_min, limits.price_max)),
        );
        push_violation(
            &mut reasons,
            Field::PricePerArea,
            r.price_per_area(),
            Some((limits.pxm2_min, limits.pxm2_max)),
        );
        push_violation(
            &mut reasons,
            Field::Bedrooms,
            r.bedrooms,
            limits.bedrooms_min.zip(limits.bedrooms_max),
        );
        push_violation(
            &mut reasons,
            Field::Bathrooms,
            r.bathrooms,
            limits.bathrooms_min.zip(limits.bathrooms_max),
        );

        if !reasons.is_empty() {
            tracing::debug!(id = %r.id, violations = reasons.len(), "range rejection");
        }
        reasons
    }
}

fn push_violation(
    reasons: &mut SmallVec2<RangeReason>,
    field: Field,
    value: Option<f64>,
    bounds: Option<(f64, f64)>,
) {
    if let (Some(value), Some((min, max))) = (value, bounds) {
        if !(value >= min && value <= max) {
            reasons.push(RangeReason { field, value, min, max });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::CoherenceValidator;

    fn coherent(record: Record) -> CoherentRecord {
        CoherenceValidator::default()
            .validate(record)
            .expect("record should be coherent")
    }

    #[test]
    fn test_area_below_minimum() {
        let filter = RangeFilter::new(&RangeConfig::default());
        let r = Record::new(
            "c",
            "cdmx",
            Operation::Sale,
            PropertyType::Apartment,
            "roma",
            25.0,
            1_000_000.0,
        );
        let reasons = filter.check(&coherent(r));
        assert_eq!(reasons.len(), 1);
        assert_eq!(reasons[0].to_string(), "area_out_of_range_25_30-200");
        assert_eq!(reasons[0].code(), "area_out_of_range");
    }

    #[test]
    fn test_every_violation_enumerated() {
        let filter = RangeFilter::new(&RangeConfig::default());
        let mut r = Record::new(
            "v",
            "cdmx",
            Operation::Sale,
            PropertyType::Apartment,
            "roma",
            250.0,
            400_000.0,
        );
        r.bedrooms = Some(3.0);
        r.bathrooms = Some(4.5);
        let reasons = filter.check(&coherent(r));
        let rendered: Vec<String> = reasons.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec![
                "area_out_of_range_250_30-200",
                "price_out_of_range_400000_500000-25000000",
                "price_per_area_out_of_range_1600_12500-150000",
            ]
        );
    }

    #[test]
    fn test_fractional_values_render_trimmed() {
        let reason = RangeReason { field: Field::Bathrooms, value: 5.5, min: 1.0, max: 4.5 };
        assert_eq!(reason.to_string(), "bathrooms_out_of_range_5.5_1-4.5");
        let reason = RangeReason {
            field: Field::PricePerArea,
            value: 12_345.678,
            min: 12_500.0,
            max: 150_000.0,
        };
        assert_eq!(reason.to_string(), "price_per_area_out_of_range_12345.68_12500-150000");
    }

    #[test]
    fn test_unmapped_combination_uses_permissive_default() {
        let filter = RangeFilter::new(&RangeConfig::default());
        let pt = PropertyType::from_label("bodega");
        assert!(!filter.is_mapped(&pt, Operation::Sale));
        let r = Record::new("b", "cdmx", Operation::Sale, pt, "roma", 900.0, 9_000_000.0);
        assert!(filter.check(&coherent(r)).is_empty());
    }

    #[test]
    fn test_missing_room_counts_not_checked() {
        let filter = RangeFilter::new(&RangeConfig::default());
        let r = Record::new(
            "n",
            "cdmx",
            Operation::Rent,
            PropertyType::Apartment,
            "roma",
            60.0,
            15_000.0,
        );
        assert!(filter.check(&coherent(r)).is_empty());
    }
}
