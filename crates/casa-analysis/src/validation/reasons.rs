//! Rejection reasons across both validation families.

use serde::{Serialize, Serializer};
use std::fmt;

use super::coherence::CoherenceReason;
use super::ranges::RangeReason;

/// Delimiter between reasons when several fire for one record.
pub const REASON_DELIMITER: &str = "|";

/// A terminal rejection, tagged with the family that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum RejectionReason {
    Coherence(CoherenceReason),
    Range(RangeReason),
}

impl RejectionReason {
    pub fn family(&self) -> &'static str {
        match self {
            Self::Coherence(_) => "coherence",
            Self::Range(_) => "range",
        }
    }

    /// Payload-free reason code used for tallies.
    pub fn code(&self) -> String {
        match self {
            Self::Coherence(r) => r.code().to_string(),
            Self::Range(r) => r.code(),
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Coherence(r) => r.fmt(f),
            Self::Range(r) => r.fmt(f),
        }
    }
}

impl From<CoherenceReason> for RejectionReason {
    fn from(reason: CoherenceReason) -> Self {
        Self::Coherence(reason)
    }
}

impl From<RangeReason> for RejectionReason {
    fn from(reason: RangeReason) -> Self {
        Self::Range(reason)
    }
}

/// Reports consume the rendered string, not the payload.
impl Serialize for RejectionReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

pub fn join_reasons(reasons: &[RejectionReason]) -> String {
    reasons
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(REASON_DELIMITER)
}
