//! The listing record consumed and repaired by the engine.

use serde::{Deserialize, Serialize};

use super::categories::{Operation, PropertyType};
use super::fields::Field;
use super::group_key::GroupKey;

/// One listing. Optional numeric fields are `None` when missing; zero is a
/// real value, never a missing marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub city: String,
    pub operation: Operation,
    pub property_type: PropertyType,
    pub colony: String,
    /// Surface in square meters.
    pub area: f64,
    pub price: f64,
    #[serde(default)]
    pub maintenance_fee: Option<f64>,
    #[serde(default)]
    pub bedrooms: Option<f64>,
    #[serde(default)]
    pub bathrooms: Option<f64>,
    #[serde(default)]
    pub half_bathrooms: Option<f64>,
    #[serde(default)]
    pub parking_spots: Option<f64>,
    #[serde(default)]
    pub age_years: Option<f64>,
    #[serde(default)]
    pub days_listed: Option<f64>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl Record {
    /// Minimal record with every optional field missing.
    pub fn new(
        id: impl Into<String>,
        city: impl Into<String>,
        operation: Operation,
        property_type: PropertyType,
        colony: impl Into<String>,
        area: f64,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            city: city.into(),
            operation,
            property_type,
            colony: colony.into(),
            area,
            price,
            maintenance_fee: None,
            bedrooms: None,
            bathrooms: None,
            half_bathrooms: None,
            parking_spots: None,
            age_years: None,
            days_listed: None,
            latitude: None,
            longitude: None,
        }
    }

    /// Price divided by area, recomputed on every call.
    /// Undefined when the area is not a positive finite number.
    pub fn price_per_area(&self) -> Option<f64> {
        if self.area > 0.0 && self.area.is_finite() && self.price.is_finite() {
            Some(self.price / self.area)
        } else {
            None
        }
    }

    /// Read a numeric field.
    pub fn get(&self, field: Field) -> Option<f64> {
        match field {
            Field::Area => Some(self.area),
            Field::Price => Some(self.price),
            Field::PricePerArea => self.price_per_area(),
            Field::MaintenanceFee => self.maintenance_fee,
            Field::Bedrooms => self.bedrooms,
            Field::Bathrooms => self.bathrooms,
            Field::HalfBathrooms => self.half_bathrooms,
            Field::ParkingSpots => self.parking_spots,
            Field::AgeYears => self.age_years,
            Field::DaysListed => self.days_listed,
            Field::Latitude => self.latitude,
            Field::Longitude => self.longitude,
        }
    }

    /// The (city, operation, property_type, colony) group this record belongs to.
    pub fn group_key(&self) -> GroupKey {
        GroupKey {
            city: self.city.clone(),
            operation: self.operation,
            property_type: self.property_type.clone(),
            colony: self.colony.clone(),
        }
    }
}
