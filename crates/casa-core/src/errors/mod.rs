//! Error handling for casa.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.
//!
//! Coherence and range rejections are not errors: they travel as typed
//! reasons on each record outcome and never abort a run.

pub mod config_error;
pub mod error_code;
pub mod input_error;
pub mod pipeline_error;

pub use config_error::ConfigError;
pub use error_code::CasaErrorCode;
pub use input_error::InputError;
pub use pipeline_error::{PipelineError, PipelineResult};
