//! casa-core: shared foundation for the listing validation engine.
//!
//! - `types`: listing records, categorical keys, numeric field/variable names
//! - `errors`: one `thiserror` enum per subsystem plus error codes
//! - `config`: TOML configuration with layered resolution
//! - `tracing`: subscriber setup driven by `CASA_LOG`

pub mod config;
pub mod errors;
pub mod tracing;
pub mod types;

pub use config::EngineConfig;
pub use types::{Field, GroupKey, Operation, PropertyType, Record, Variable};
