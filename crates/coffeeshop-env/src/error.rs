//! Error types for configuration loading and validation

use thiserror::Error;

/// Errors raised while loading, parsing or validating an environment configuration
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Missing required configuration field: {field}")]
    MissingField { field: String },

    #[error("Invalid URL for {field} ({value}): {reason}")]
    InvalidUrl {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Failed to parse configuration: {details}")]
    ParseError { details: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigurationError {
    pub(crate) fn missing(field: &str) -> Self {
        Self::MissingField {
            field: field.to_string(),
        }
    }

    pub(crate) fn invalid_url(field: &str, value: &str, reason: impl ToString) -> Self {
        Self::InvalidUrl {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn invalid_value(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<figment::Error> for ConfigurationError {
    fn from(err: figment::Error) -> Self {
        Self::ParseError {
            details: err.to_string(),
        }
    }
}

/// Result type alias for configuration operations
pub type Result<T> = std::result::Result<T, ConfigurationError>;
