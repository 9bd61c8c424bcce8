//! Re-exports of performance-oriented collection types.

pub use rustc_hash::{FxHashMap, FxHashSet};
pub use smallvec::SmallVec;
pub use std::collections::BTreeMap;

/// SmallVec for rejection reasons (usually 0–2 per record).
pub type SmallVec2<T> = SmallVec<[T; 2]>;
