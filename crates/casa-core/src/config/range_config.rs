//! Admissible-range table per (property_type, operation).
//!
//! The table is data: domain experts edit `[[ranges.entries]]` rows in
//! `casa.toml` without touching the filter logic. With no rows configured the
//! compiled table below applies.

use serde::{Deserialize, Serialize};

use crate::types::{Operation, PropertyType};

/// Inclusive bounds for one (property_type, operation) combination.
/// Bedroom and bathroom bounds are absent for categories without rooms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeLimits {
    pub area_min: f64,
    pub area_max: f64,
    pub price_min: f64,
    pub price_max: f64,
    pub pxm2_min: f64,
    pub pxm2_max: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrooms_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrooms_max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bathrooms_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bathrooms_max: Option<f64>,
}

impl RangeLimits {
    /// Fallback for unmapped combinations: wide enough to only catch nonsense.
    pub fn permissive() -> Self {
        Self {
            area_min: 10.0,
            area_max: 50_000.0,
            price_min: 1_000.0,
            price_max: 1_000_000_000.0,
            pxm2_min: 1.0,
            pxm2_max: 1_000_000.0,
            bedrooms_min: Some(0.0),
            bedrooms_max: Some(20.0),
            bathrooms_min: Some(0.0),
            bathrooms_max: Some(20.0),
        }
    }

    /// Names of the fields whose min exceeds their max.
    pub fn inverted_bounds(&self) -> Vec<&'static str> {
        let mut inverted = Vec::new();
        if self.area_min > self.area_max {
            inverted.push("area");
        }
        if self.price_min > self.price_max {
            inverted.push("price");
        }
        if self.pxm2_min > self.pxm2_max {
            inverted.push("price_per_area");
        }
        if let (Some(lo), Some(hi)) = (self.bedrooms_min, self.bedrooms_max) {
            if lo > hi {
                inverted.push("bedrooms");
            }
        }
        if let (Some(lo), Some(hi)) = (self.bathrooms_min, self.bathrooms_max) {
            if lo > hi {
                inverted.push("bathrooms");
            }
        }
        inverted
    }
}

/// A keyed row of the range table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeEntry {
    pub property_type: PropertyType,
    pub operation: Operation,
    #[serde(flatten)]
    pub limits: RangeLimits,
}

/// Range table configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RangeConfig {
    /// Table rows. Empty means the compiled table.
    pub entries: Vec<RangeEntry>,
    /// Fallback row for unmapped combinations.
    pub default: Option<RangeLimits>,
}

impl RangeConfig {
    pub fn effective_entries(&self) -> Vec<RangeEntry> {
        if self.entries.is_empty() {
            default_range_table()
        } else {
            self.entries.clone()
        }
    }

    pub fn effective_default(&self) -> RangeLimits {
        self.default.clone().unwrap_or_else(RangeLimits::permissive)
    }

    pub(crate) fn merge_from(&mut self, other: &RangeConfig) {
        if !other.entries.is_empty() {
            self.entries = other.entries.clone();
        }
        if other.default.is_some() {
            self.default = other.default.clone();
        }
    }
}

fn entry(
    property_type: PropertyType,
    operation: Operation,
    area: (f64, f64),
    price: (f64, f64),
    pxm2: (f64, f64),
    bedrooms: Option<(f64, f64)>,
    bathrooms: Option<(f64, f64)>,
) -> RangeEntry {
    RangeEntry {
        property_type,
        operation,
        limits: RangeLimits {
            area_min: area.0,
            area_max: area.1,
            price_min: price.0,
            price_max: price.1,
            pxm2_min: pxm2.0,
            pxm2_max: pxm2.1,
            bedrooms_min: bedrooms.map(|b| b.0),
            bedrooms_max: bedrooms.map(|b| b.1),
            bathrooms_min: bathrooms.map(|b| b.0),
            bathrooms_max: bathrooms.map(|b| b.1),
        },
    }
}

/// Compiled range table (prices in local currency, areas in m²).
#[rustfmt::skip]
pub fn default_range_table() -> Vec<RangeEntry> {
    use Operation::{Rent, Sale};
    use PropertyType::{Apartment, CommercialLocal, House, Land, Office};

    vec![
        entry(Apartment, Sale, (30.0, 200.0), (500_000.0, 25_000_000.0), (12_500.0, 150_000.0), Some((1.0, 3.0)), Some((1.0, 4.5))),
        entry(Apartment, Rent, (30.0, 200.0), (4_000.0, 150_000.0), (60.0, 1_200.0), Some((1.0, 3.0)), Some((1.0, 4.5))),
        entry(House, Sale, (60.0, 800.0), (800_000.0, 60_000_000.0), (8_000.0, 120_000.0), Some((1.0, 6.0)), Some((1.0, 6.5))),
        entry(House, Rent, (60.0, 800.0), (6_000.0, 250_000.0), (40.0, 900.0), Some((1.0, 6.0)), Some((1.0, 6.5))),
        entry(CommercialLocal, Sale, (15.0, 2_000.0), (400_000.0, 80_000_000.0), (8_000.0, 200_000.0), None, Some((0.0, 6.0))),
        entry(CommercialLocal, Rent, (15.0, 2_000.0), (3_000.0, 600_000.0), (50.0, 2_000.0), None, Some((0.0, 6.0))),
        entry(Office, Sale, (20.0, 3_000.0), (600_000.0, 150_000_000.0), (10_000.0, 150_000.0), None, Some((0.0, 10.0))),
        entry(Office, Rent, (20.0, 3_000.0), (4_000.0, 1_500_000.0), (80.0, 1_500.0), None, Some((0.0, 10.0))),
        entry(Land, Sale, (80.0, 20_000.0), (300_000.0, 150_000_000.0), (2_000.0, 100_000.0), None, None),
        entry(Land, Rent, (80.0, 20_000.0), (5_000.0, 500_000.0), (5.0, 500.0), None, None),
    ]
}
