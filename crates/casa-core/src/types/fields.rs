//! Names of numeric listing fields and of the variables the engine analyzes.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::record::Record;

/// A numeric field of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Area,
    Price,
    PricePerArea,
    MaintenanceFee,
    Bedrooms,
    Bathrooms,
    HalfBathrooms,
    ParkingSpots,
    AgeYears,
    DaysListed,
    Latitude,
    Longitude,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Area => "area",
            Self::Price => "price",
            Self::PricePerArea => "price_per_area",
            Self::MaintenanceFee => "maintenance_fee",
            Self::Bedrooms => "bedrooms",
            Self::Bathrooms => "bathrooms",
            Self::HalfBathrooms => "half_bathrooms",
            Self::ParkingSpots => "parking_spots",
            Self::AgeYears => "age_years",
            Self::DaysListed => "days_listed",
            Self::Latitude => "latitude",
            Self::Longitude => "longitude",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A numeric variable analyzed per group by the outlier and selection stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variable {
    Price,
    Area,
    PricePerArea,
    MaintenanceFee,
    Latitude,
    Longitude,
}

impl Variable {
    pub const ALL: [Variable; 6] = [
        Self::Price,
        Self::Area,
        Self::PricePerArea,
        Self::MaintenanceFee,
        Self::Latitude,
        Self::Longitude,
    ];

    /// The listing field this variable reads.
    pub fn field(&self) -> Field {
        match self {
            Self::Price => Field::Price,
            Self::Area => Field::Area,
            Self::PricePerArea => Field::PricePerArea,
            Self::MaintenanceFee => Field::MaintenanceFee,
            Self::Latitude => Field::Latitude,
            Self::Longitude => Field::Longitude,
        }
    }

    pub fn name(&self) -> &'static str {
        self.field().name()
    }

    /// Parse a snake_case variable name as written in config files.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.name() == name)
    }

    /// Value of this variable on a record, `None` when missing or undefined.
    pub fn value_of(&self, record: &Record) -> Option<f64> {
        record.get(self.field())
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
