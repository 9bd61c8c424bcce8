//! Input contract violations found while admitting upstream rows.

use super::error_code::{self, CasaErrorCode};

/// A row that cannot become a `Record`. The row is dropped before repair.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("Listing {id}: required field `{field}` is missing")]
    MissingField { id: String, field: &'static str },

    #[error("Listing {id}: unknown operation `{label}`")]
    InvalidOperation { id: String, label: String },

    #[error("Listing {id}: field `{field}` is not a finite number")]
    NonFiniteValue { id: String, field: &'static str },

    #[error("Listing {id}: duplicate id, first occurrence kept")]
    DuplicateListing { id: String },
}

impl InputError {
    /// Identifier of the offending listing (`"<unknown>"` when the id itself was absent).
    pub fn listing_id(&self) -> &str {
        match self {
            Self::MissingField { id, .. }
            | Self::InvalidOperation { id, .. }
            | Self::NonFiniteValue { id, .. }
            | Self::DuplicateListing { id } => id,
        }
    }
}

impl CasaErrorCode for InputError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => error_code::MISSING_FIELD,
            Self::InvalidOperation { .. } => error_code::INVALID_OPERATION,
            Self::NonFiniteValue { .. } => error_code::NON_FINITE_VALUE,
            Self::DuplicateListing { .. } => error_code::DUPLICATE_LISTING,
        }
    }
}
