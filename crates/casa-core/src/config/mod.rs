//! Configuration system for casa.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.
//!
//! Scalar knobs are `Option` so layers merge field by field; components read
//! the `effective_*` accessors, which carry the compiled defaults.

pub mod coherence_config;
pub mod confidence_config;
pub mod engine_config;
pub mod outlier_config;
pub mod pipeline_config;
pub mod range_config;
pub mod repair_config;
pub mod selector_config;

pub use coherence_config::CoherenceConfig;
pub use confidence_config::ConfidenceConfig;
pub use engine_config::{CliOverrides, EngineConfig};
pub use outlier_config::{default_logical_bounds, LogicalBound, OutlierConfig};
pub use pipeline_config::PipelineConfig;
pub use range_config::{default_range_table, RangeConfig, RangeEntry, RangeLimits};
pub use repair_config::RepairConfig;
pub use selector_config::{NormalityTestKind, SelectorConfig, MEAN_SAMPLE_FLOOR};
