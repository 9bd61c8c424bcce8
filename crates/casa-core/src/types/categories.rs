//! Operation and property-type categories with label normalization.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Listing operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Sale,
    Rent,
}

impl Operation {
    /// Normalize an upstream label (`"Venta"`, `"renta"`, `"sale"`...).
    /// Returns `None` for labels that name neither operation.
    pub fn from_label(label: &str) -> Option<Self> {
        match normalize_label(label).as_str() {
            "sale" | "venta" | "sell" | "compra" | "for_sale" => Some(Self::Sale),
            "rent" | "renta" | "alquiler" | "arriendo" | "for_rent" => Some(Self::Rent),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sale => "sale",
            Self::Rent => "rent",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Property category. Unknown categories keep their normalized label.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PropertyType {
    Apartment,
    House,
    CommercialLocal,
    Office,
    Land,
    Other(String),
}

impl PropertyType {
    /// Normalize an upstream label (`"Departamento"`, `"Local comercial"`...).
    pub fn from_label(label: &str) -> Self {
        let normalized = normalize_label(label);
        match normalized.as_str() {
            "apartment" | "departamento" | "depto" | "flat" | "condo" => Self::Apartment,
            "house" | "casa" | "casa_en_condominio" => Self::House,
            "commercial_local" | "local" | "local_comercial" | "commercial" => {
                Self::CommercialLocal
            }
            "office" | "oficina" => Self::Office,
            "land" | "terreno" | "lote" => Self::Land,
            _ => Self::Other(normalized),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Apartment => "apartment",
            Self::House => "house",
            Self::CommercialLocal => "commercial_local",
            Self::Office => "office",
            Self::Land => "land",
            Self::Other(label) => label,
        }
    }
}

impl From<String> for PropertyType {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl From<PropertyType> for String {
    fn from(value: PropertyType) -> Self {
        value.name().to_string()
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lowercase, strip Spanish accents, and collapse separators into `_`.
pub fn normalize_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut pending_sep = false;
    for c in label.trim().chars().flat_map(char::to_lowercase) {
        let c = match c {
            'á' | 'à' | 'ä' => 'a',
            'é' | 'è' | 'ë' => 'e',
            'í' | 'ì' | 'ï' => 'i',
            'ó' | 'ò' | 'ö' => 'o',
            'ú' | 'ù' | 'ü' => 'u',
            'ñ' => 'n',
            other => other,
        };
        if c.is_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('_');
            }
            pending_sep = false;
            out.push(c);
        } else {
            pending_sep = true;
        }
    }
    out
}
