//! Cross-field coherence rules.

use casa_core::config::CoherenceConfig;
use casa_core::types::collections::SmallVec2;
use casa_core::types::{PropertyType, Record};
use serde::Serialize;
use std::fmt;

/// Resolved coherence constants.
#[derive(Debug, Clone)]
pub struct CoherenceParams {
    pub bathroom_slack: f64,
    pub parking_slack: f64,
    pub min_surface_ratio: f64,
    pub max_surface_ratio: f64,
    pub bedroom_area: f64,
    pub bathroom_area: f64,
    pub half_bathroom_area: f64,
    pub kitchen_area: f64,
    pub living_dining_area: f64,
}

impl From<&CoherenceConfig> for CoherenceParams {
    fn from(config: &CoherenceConfig) -> Self {
        Self {
            bathroom_slack: config.effective_bathroom_slack(),
            parking_slack: config.effective_parking_slack(),
            min_surface_ratio: config.effective_min_surface_ratio(),
            max_surface_ratio: config.effective_max_surface_ratio(),
            bedroom_area: config.effective_bedroom_area(),
            bathroom_area: config.effective_bathroom_area(),
            half_bathroom_area: config.effective_half_bathroom_area(),
            kitchen_area: config.effective_kitchen_area(),
            living_dining_area: config.effective_living_dining_area(),
        }
    }
}

impl Default for CoherenceParams {
    fn default() -> Self {
        Self::from(&CoherenceConfig::default())
    }
}

/// Why a record's field combination is impossible.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum CoherenceReason {
    /// `bathrooms > bedrooms + slack`.
    BathroomsExcessive { bathrooms: f64, limit: f64 },
    /// `parking > bedrooms + slack`.
    ParkingExcessive { parking: f64, limit: f64 },
    /// Reported area is implausible against the room-derived surface.
    SurfaceIncoherent { ratio: f64, theoretical_area: f64 },
}

impl CoherenceReason {
    pub fn code(&self) -> &'static str {
        match self {
            Self::BathroomsExcessive { .. } => "bathrooms_excessive",
            Self::ParkingExcessive { .. } => "parking_excessive",
            Self::SurfaceIncoherent { .. } => "surface_incoherent",
        }
    }
}

impl fmt::Display for CoherenceReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A record that passed every coherence rule.
#[derive(Debug, Clone, PartialEq)]
pub struct CoherentRecord(Record);

impl CoherentRecord {
    pub fn record(&self) -> &Record {
        &self.0
    }

    pub fn into_inner(self) -> Record {
        self.0
    }
}

impl AsRef<Record> for CoherentRecord {
    fn as_ref(&self) -> &Record {
        &self.0
    }
}

/// A record rejected by one or more coherence rules.
#[derive(Debug, Clone, PartialEq)]
pub struct CoherenceRejection {
    pub record: Record,
    pub reasons: SmallVec2<CoherenceReason>,
}

#[derive(Debug, Clone, Default)]
pub struct CoherenceValidator {
    params: CoherenceParams,
}

impl CoherenceValidator {
    pub fn new(params: CoherenceParams) -> Self {
        Self { params }
    }

    /// Evaluate every rule. Rules whose inputs are missing do not fire.
    pub fn check(&self, record: &Record) -> SmallVec2<CoherenceReason> {
        let p = &self.params;
        let mut reasons = SmallVec2::new();

        if let (Some(bathrooms), Some(bedrooms)) = (record.bathrooms, record.bedrooms) {
            let limit = bedrooms + p.bathroom_slack;
            if bathrooms > limit {
                reasons.push(CoherenceReason::BathroomsExcessive { bathrooms, limit });
            }
        }

        if let (Some(parking), Some(bedrooms)) = (record.parking_spots, record.bedrooms) {
            let limit = bedrooms + p.parking_slack;
            if parking > limit {
                reasons.push(CoherenceReason::ParkingExcessive { parking, limit });
            }
        }

        if record.property_type == PropertyType::Apartment {
            if let Some(theoretical_area) = self.theoretical_area(record) {
                let ratio = record.area / theoretical_area;
                if ratio < p.min_surface_ratio || ratio > p.max_surface_ratio {
                    reasons.push(CoherenceReason::SurfaceIncoherent { ratio, theoretical_area });
                }
            }
        }

        reasons
    }

    /// Room-derived surface, `None` without bedroom and bathroom counts.
    pub fn theoretical_area(&self, record: &Record) -> Option<f64> {
        let p = &self.params;
        let bedrooms = record.bedrooms?;
        let bathrooms = record.bathrooms?;
        let whole = bathrooms.floor();
        let mut half = record.half_bathrooms.unwrap_or(0.0);
        if (bathrooms - whole - 0.5).abs() < 1e-9 {
            half += 1.0;
        }
        Some(
            bedrooms * p.bedroom_area
                + whole * p.bathroom_area
                + half * p.half_bathroom_area
                + p.kitchen_area
                + p.living_dining_area,
        )
    }

    pub fn validate(&self, record: Record) -> Result<CoherentRecord, CoherenceRejection> {
        let reasons = self.check(&record);
        if reasons.is_empty() {
            Ok(CoherentRecord(record))
        } else {
            tracing::debug!(
                id = %record.id,
                reasons = %reasons.iter().map(|r| r.code()).collect::<Vec<_>>().join("|"),
                "coherence rejection"
            );
            Err(CoherenceRejection { record, reasons })
        }
    }

    /// Split a batch into coherent records and rejections, preserving order.
    pub fn partition(
        &self,
        records: Vec<Record>,
    ) -> (Vec<CoherentRecord>, Vec<CoherenceRejection>) {
        let mut valid = Vec::with_capacity(records.len());
        let mut rejected = Vec::new();
        for record in records {
            match self.validate(record) {
                Ok(r) => valid.push(r),
                Err(r) => rejected.push(r),
            }
        }
        (valid, rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casa_core::types::Operation;

    fn apartment(area: f64, bedrooms: f64, bathrooms: f64) -> Record {
        let mut r = Record::new(
            "a",
            "cdmx",
            Operation::Sale,
            PropertyType::Apartment,
            "roma",
            area,
            4_000_000.0,
        );
        r.bedrooms = Some(bedrooms);
        r.bathrooms = Some(bathrooms);
        r
    }

    #[test]
    fn test_bathrooms_excessive() {
        let reasons = CoherenceValidator::default().check(&apartment(60.0, 2.0, 6.0));
        assert_eq!(reasons.len(), 1);
        assert_eq!(reasons[0].to_string(), "bathrooms_excessive");
        assert_eq!(
            reasons[0],
            CoherenceReason::BathroomsExcessive { bathrooms: 6.0, limit: 3.5 }
        );
    }

    #[test]
    fn test_boundary_is_not_excessive() {
        let mut r = apartment(60.0, 2.0, 3.5);
        r.parking_spots = Some(3.0);
        assert!(CoherenceValidator::default().check(&r).is_empty());
        r.parking_spots = Some(4.0);
        let reasons = CoherenceValidator::default().check(&r);
        assert_eq!(reasons[0].code(), "parking_excessive");
    }

    #[test]
    fn test_surface_rule_counts_half_bathroom() {
        let validator = CoherenceValidator::default();
        let mut r = apartment(60.0, 2.0, 1.5);
        r.half_bathrooms = Some(1.0);
        let theoretical = validator.theoretical_area(&r).unwrap();
        let expected = 2.0 * 9.45 + 3.96 + 2.0 * 1.5 + 7.5 + 15.75;
        assert!((theoretical - expected).abs() < 1e-9);
    }

    #[test]
    fn test_surface_incoherent_only_for_apartments() {
        let validator = CoherenceValidator::default();
        let tiny = apartment(5.0, 2.0, 1.0);
        assert_eq!(validator.check(&tiny)[0].code(), "surface_incoherent");

        let mut house = tiny.clone();
        house.property_type = PropertyType::House;
        assert!(validator.check(&house).is_empty());

        let huge = apartment(900.0, 1.0, 1.0);
        assert_eq!(validator.check(&huge)[0].code(), "surface_incoherent");
    }

    #[test]
    fn test_missing_fields_skip_rules() {
        let r = Record::new(
            "m",
            "cdmx",
            Operation::Rent,
            PropertyType::Apartment,
            "roma",
            3.0,
            9_000.0,
        );
        assert!(CoherenceValidator::default().check(&r).is_empty());
    }

    #[test]
    fn test_partition_preserves_order() {
        let validator = CoherenceValidator::default();
        let records = vec![
            apartment(60.0, 2.0, 1.0),
            apartment(60.0, 2.0, 6.0),
            apartment(70.0, 2.0, 2.0),
        ];
        let (valid, rejected) = validator.partition(records);
        assert_eq!(valid.len(), 2);
        assert_eq!(valid[1].record().area, 70.0);
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].reasons[0].code(), "bathrooms_excessive");
    }
}
