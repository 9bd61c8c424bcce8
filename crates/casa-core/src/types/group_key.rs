//! Group identity: (city, operation, property_type, colony).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::categories::{Operation, PropertyType};

/// Key of a statistical group. Ordering is total so group output is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupKey {
    pub city: String,
    pub operation: Operation,
    pub property_type: PropertyType,
    pub colony: String,
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.city, self.operation, self.property_type, self.colony
        )
    }
}
