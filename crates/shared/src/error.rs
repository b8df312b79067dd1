//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Process-level error types.
///
/// Lifecycle failures have their own richer type in the core crate; this enum
/// covers process bootstrap.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded or is inconsistent.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Configuration(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error() {
        let err = AppError::Configuration("missing server.port".into());
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
        assert_eq!(
            err.to_string(),
            "Configuration error: missing server.port"
        );
    }

    #[test]
    fn test_from_config_error() {
        let err: AppError = config::ConfigError::NotFound("payroll".into()).into();
        assert!(matches!(err, AppError::Configuration(_)));
        assert!(err.to_string().contains("payroll"));
    }
}
