//! Core data types shared by every engine stage.

pub mod categories;
pub mod collections;
pub mod fields;
pub mod group_key;
pub mod record;

pub use categories::{Operation, PropertyType};
pub use fields::{Field, Variable};
pub use group_key::GroupKey;
pub use record::Record;
