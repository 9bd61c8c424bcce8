//! Pipeline errors and non-fatal error collection.

use super::error_code::CasaErrorCode;
use super::{ConfigError, InputError};

/// Errors that can occur around a pipeline run.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl CasaErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Input(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}

/// Result of a pipeline stage that accumulates non-fatal errors.
/// Allows the batch to continue when individual rows fail.
#[derive(Debug, Default)]
pub struct PipelineResult<T: Default = ()> {
    /// The successful result data.
    pub data: T,
    /// Non-fatal errors collected during the stage.
    pub errors: Vec<PipelineError>,
}

impl<T: Default> PipelineResult<T> {
    /// Create a new result with no errors.
    pub fn new(data: T) -> Self {
        Self {
            data,
            errors: Vec::new(),
        }
    }

    /// Add a non-fatal error to the result.
    pub fn add_error(&mut self, error: impl Into<PipelineError>) {
        self.errors.push(error.into());
    }

    /// Returns true if there are no non-fatal errors.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of non-fatal errors.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}
