//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Only structural problems become errors; everything recoverable is
/// collected as a [`crate::types::Diagnostic`] instead (best-effort
/// output over abort-on-first-problem).
#[derive(Debug, Error)]
pub enum AppError {
    /// A required ledger table is missing from the store.
    #[error("Required table missing: {0}")]
    MissingTable(String),

    /// The ledger store rejected a read or write.
    #[error("Store error: {0}")]
    Store(String),

    /// Configuration could not be loaded or is inconsistent.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Returns the error code for embedders that report errors by code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::MissingTable(_) => "MISSING_TABLE",
            Self::Store(_) => "STORE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::MissingTable(String::new()).error_code(),
            "MISSING_TABLE"
        );
        assert_eq!(AppError::Store(String::new()).error_code(), "STORE_ERROR");
        assert_eq!(AppError::Config(String::new()).error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::MissingTable("Income".into()).to_string(),
            "Required table missing: Income"
        );
        assert_eq!(
            AppError::Store("msg".into()).to_string(),
            "Store error: msg"
        );
        assert_eq!(
            AppError::Config("msg".into()).to_string(),
            "Configuration error: msg"
        );
    }
}
