//! Applies the repair rules to one record in a fixed order.

use casa_core::config::RepairConfig;
use casa_core::types::collections::BTreeMap;
use casa_core::types::{Field, Record};

use super::rules;
use super::types::{Provenance, RepairOutcome};

/// Resolved repair constants.
#[derive(Debug, Clone)]
pub struct RepairParams {
    /// Year used to turn a construction year into an age.
    pub reference_year: i32,
    pub area_per_bedroom: f64,
    pub max_imputed_bedrooms: f64,
    pub max_shifted_parking: f64,
    pub max_shifted_age: f64,
}

impl From<&RepairConfig> for RepairParams {
    fn from(config: &RepairConfig) -> Self {
        Self {
            reference_year: config.effective_reference_year(),
            area_per_bedroom: config.effective_area_per_bedroom(),
            max_imputed_bedrooms: config.effective_max_imputed_bedrooms(),
            max_shifted_parking: config.effective_max_shifted_parking(),
            max_shifted_age: config.effective_max_shifted_age(),
        }
    }
}

impl Default for RepairParams {
    fn default() -> Self {
        Self::from(&RepairConfig::default())
    }
}

/// Per-record imputation and miscapture correction.
///
/// Rules run in this order: bedrooms impute, bathrooms impute, bathrooms
/// decimal shift, parking impute, parking decimal shift, age. Every rule's
/// output is a fixed point of the whole chain, so repairing twice changes
/// nothing the second time.
#[derive(Debug, Clone, Default)]
pub struct RecordRepairer {
    params: RepairParams,
}

impl RecordRepairer {
    pub fn new(params: RepairParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &RepairParams {
        &self.params
    }

    pub fn repair(&self, mut record: Record) -> RepairOutcome {
        let p = &self.params;
        let mut provenance = BTreeMap::new();

        if let Some(v) = rules::impute_bedrooms(
            record.bedrooms,
            record.area,
            p.area_per_bedroom,
            p.max_imputed_bedrooms,
        ) {
            record.bedrooms = Some(v);
            provenance.insert(Field::Bedrooms, Provenance::Imputed);
        }

        if let Some(v) = rules::impute_bathrooms(record.bathrooms, record.bedrooms) {
            record.bathrooms = Some(v);
            provenance.insert(Field::Bathrooms, Provenance::Imputed);
        }
        if let Some(v) = rules::correct_decimal_shift_bathrooms(record.bathrooms) {
            record.bathrooms = Some(v);
            provenance.entry(Field::Bathrooms).or_insert(Provenance::Corrected);
        }

        if let Some(v) = rules::impute_parking(record.parking_spots, record.bedrooms) {
            record.parking_spots = Some(v);
            provenance.insert(Field::ParkingSpots, Provenance::Imputed);
        }
        if let Some(v) =
            rules::correct_decimal_shift_parking(record.parking_spots, p.max_shifted_parking)
        {
            record.parking_spots = Some(v);
            provenance.entry(Field::ParkingSpots).or_insert(Provenance::Corrected);
        }

        if let Some(v) = rules::correct_age(record.age_years, p.reference_year, p.max_shifted_age) {
            record.age_years = Some(v);
            provenance.insert(Field::AgeYears, Provenance::Corrected);
        }

        if !provenance.is_empty() {
            tracing::debug!(id = %record.id, fields = provenance.len(), "record repaired");
        }

        RepairOutcome { record, provenance }
    }
}
