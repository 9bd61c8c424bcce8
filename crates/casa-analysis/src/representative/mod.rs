//! Representative-value selection: an ordered rule list evaluated top-down.

pub mod rules;
pub mod selector;
pub mod types;

pub use rules::{default_rules, SelectionPredicate, SelectionRule};
pub use selector::{RepresentativeSelector, SelectorParams};
pub use types::{RepresentativeMethod, Selection};
