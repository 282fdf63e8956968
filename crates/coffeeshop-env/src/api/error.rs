//! Error types for the backend API client

use crate::error::ConfigurationError;
use reqwest::StatusCode;
use thiserror::Error;

/// Errors returned by [`ApiClient`](super::ApiClient)
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Authentication required: {message}")]
    MissingAuthentication { message: String },

    #[error("Request failed with status {status}: {message}")]
    Http { status: StatusCode, message: String },

    #[error("API reported failure: {message}")]
    Unsuccessful { message: String },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigurationError),
}

impl ApiError {
    /// HTTP status of the failed request, when the server answered
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::HttpClient(err) => err.status(),
            _ => None,
        }
    }
}

/// Result type alias for API operations
pub type Result<T> = std::result::Result<T, ApiError>;
