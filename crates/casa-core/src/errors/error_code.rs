//! CasaErrorCode trait for structured error reporting.

/// Every error enum implements this to expose a stable code string
/// that report consumers can match on without parsing messages.
pub trait CasaErrorCode {
    /// Returns the error code string (e.g., "CONFIG_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const MISSING_FIELD: &str = "MISSING_FIELD";
pub const INVALID_OPERATION: &str = "INVALID_OPERATION";
pub const NON_FINITE_VALUE: &str = "NON_FINITE_VALUE";
pub const DUPLICATE_LISTING: &str = "DUPLICATE_LISTING";
