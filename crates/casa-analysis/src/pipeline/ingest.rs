//! Admission of upstream rows into `Record`s.
//!
//! Rows missing a required field, carrying an unknown operation or a
//! non-finite number, or repeating an earlier id never reach repair. Each is
//! reported as a non-fatal `InputError`.

use casa_core::errors::{InputError, PipelineResult};
use casa_core::types::{Operation, PropertyType, Record};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Deserializer};

const UNKNOWN_ID: &str = "<unknown>";

/// One upstream row as scraped. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawListing {
    pub id: Option<String>,
    pub city: Option<String>,
    pub operation: Option<String>,
    pub property_type: Option<String>,
    pub colony: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub area: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub price: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub maintenance_fee: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub bedrooms: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub bathrooms: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub half_bathrooms: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub parking_spots: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub age_years: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub days_listed: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub latitude: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub longitude: Option<f64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberCell {
    Number(f64),
    Text(String),
}

/// Accept `1250000`, `"1250000"`, `"$1,250,000"`; blank or unparseable text is missing.
fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let cell = Option::<NumberCell>::deserialize(deserializer)?;
    Ok(match cell {
        Some(NumberCell::Number(n)) => Some(n),
        Some(NumberCell::Text(text)) => parse_numeric_text(&text),
        None => None,
    })
}

pub fn parse_numeric_text(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | ' ' | '\u{a0}'))
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

fn required_text(
    value: Option<String>,
    id: &str,
    field: &'static str,
) -> Result<String, InputError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| InputError::MissingField {
            id: id.to_string(),
            field,
        })
}

fn required_number(value: Option<f64>, id: &str, field: &'static str) -> Result<f64, InputError> {
    let v = value.ok_or_else(|| InputError::MissingField {
        id: id.to_string(),
        field,
    })?;
    finite(v, id, field)
}

fn finite(value: f64, id: &str, field: &'static str) -> Result<f64, InputError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(InputError::NonFiniteValue {
            id: id.to_string(),
            field,
        })
    }
}

impl RawListing {
    pub fn into_record(self) -> Result<Record, InputError> {
        let id = required_text(self.id, UNKNOWN_ID, "id")?;
        let city = required_text(self.city, &id, "city")?;
        let operation_label = required_text(self.operation, &id, "operation")?;
        let operation =
            Operation::from_label(&operation_label).ok_or_else(|| InputError::InvalidOperation {
                id: id.clone(),
                label: operation_label.clone(),
            })?;
        let property_type = PropertyType::from_label(&required_text(
            self.property_type,
            &id,
            "property_type",
        )?);
        let colony = required_text(self.colony, &id, "colony")?;
        let area = required_number(self.area, &id, "area")?;
        let price = required_number(self.price, &id, "price")?;

        let mut record = Record::new(id, city, operation, property_type, colony, area, price);
        record.maintenance_fee = self.maintenance_fee;
        record.bedrooms = self.bedrooms;
        record.bathrooms = self.bathrooms;
        record.half_bathrooms = self.half_bathrooms;
        record.parking_spots = self.parking_spots;
        record.age_years = self.age_years;
        record.days_listed = self.days_listed;
        record.latitude = self.latitude;
        record.longitude = self.longitude;
        check_finite(&record)?;
        Ok(record)
    }
}

/// Every present numeric field must be finite.
pub fn check_finite(record: &Record) -> Result<(), InputError> {
    let fields = [
        ("area", Some(record.area)),
        ("price", Some(record.price)),
        ("maintenance_fee", record.maintenance_fee),
        ("bedrooms", record.bedrooms),
        ("bathrooms", record.bathrooms),
        ("half_bathrooms", record.half_bathrooms),
        ("parking_spots", record.parking_spots),
        ("age_years", record.age_years),
        ("days_listed", record.days_listed),
        ("latitude", record.latitude),
        ("longitude", record.longitude),
    ];
    for (field, value) in fields {
        if let Some(v) = value {
            finite(v, &record.id, field)?;
        }
    }
    Ok(())
}

/// Keep records that are finite and whose id has not been seen yet.
pub fn screen(records: Vec<Record>) -> PipelineResult<Vec<Record>> {
    let mut result = PipelineResult::new(Vec::with_capacity(records.len()));
    let mut seen: FxHashSet<String> = FxHashSet::default();
    for record in records {
        if let Err(e) = check_finite(&record) {
            result.add_error(e);
            continue;
        }
        if !seen.insert(record.id.clone()) {
            result.add_error(InputError::DuplicateListing { id: record.id });
            continue;
        }
        result.data.push(record);
    }
    result
}

/// Convert upstream rows, dropping and reporting the ones that break the input contract.
pub fn admit(rows: Vec<RawListing>) -> PipelineResult<Vec<Record>> {
    let total = rows.len();
    let mut converted = PipelineResult::new(Vec::with_capacity(total));
    for row in rows {
        match row.into_record() {
            Ok(record) => converted.data.push(record),
            Err(e) => {
                tracing::debug!(id = e.listing_id(), error = %e, "listing dropped");
                converted.add_error(e);
            }
        }
    }

    let mut screened = screen(converted.data);
    let mut errors = converted.errors;
    errors.append(&mut screened.errors);
    screened.errors = errors;
    tracing::info!(
        total,
        admitted = screened.data.len(),
        dropped = screened.error_count(),
        "listings admitted"
    );
    screened
}
