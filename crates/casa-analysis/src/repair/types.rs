//! Repair provenance types.

use casa_core::types::collections::BTreeMap;
use casa_core::types::{Field, Record};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a field's final value came to be. Unchanged fields carry no entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Filled in from other fields because it was missing or non-positive.
    Imputed,
    /// Rewritten because the captured value was a recognizable typo.
    Corrected,
}

impl Provenance {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Imputed => "imputed",
            Self::Corrected => "corrected",
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A record after repair plus the provenance of every changed field.
#[derive(Debug, Clone, PartialEq)]
pub struct RepairOutcome {
    pub record: Record,
    pub provenance: BTreeMap<Field, Provenance>,
}

impl RepairOutcome {
    pub fn was_repaired(&self) -> bool {
        !self.provenance.is_empty()
    }

    pub fn count(&self, kind: Provenance) -> usize {
        self.provenance.values().filter(|p| **p == kind).count()
    }
}
