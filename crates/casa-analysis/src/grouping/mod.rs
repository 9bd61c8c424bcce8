//! Group arena and per-group statistics.

pub mod arena;
pub mod statistics;

pub use arena::{Group, GroupArena};
pub use statistics::{GroupReport, GroupStatistics};
