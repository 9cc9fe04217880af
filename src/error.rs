use std::time::Duration;

use thiserror::Error;

use crate::types::outcome::FallbackReason;

/// Internal error type for a single content request.
///
/// These never reach callers of the generator: every variant is converted into
/// a [`FallbackReason`] and the kind's fallback value is returned instead.
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} error: {message}")]
    Status { status: u16, message: String },

    #[error("Completion request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Completion returned no usable text")]
    EmptyResponse,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ContentError>;

impl ContentError {
    /// Which fallback path this error takes.
    pub fn fallback_reason(&self) -> FallbackReason {
        match self {
            ContentError::Config(_) => FallbackReason::MissingCredential,
            ContentError::Http(_) => FallbackReason::Transport,
            ContentError::Status { .. } => FallbackReason::Status,
            ContentError::Timeout(_) => FallbackReason::Timeout,
            ContentError::EmptyResponse => FallbackReason::EmptyResponse,
            ContentError::Serialization(_) | ContentError::Decode(_) => FallbackReason::Decode,
            ContentError::Validation(_) => FallbackReason::ShapeMismatch,
        }
    }

    /// Get the error code for structured logs and CLI output
    pub fn error_code(&self) -> &'static str {
        match self {
            ContentError::Config(_) => "CONFIG_ERROR",
            ContentError::Http(_) => "HTTP_ERROR",
            ContentError::Status { .. } => "STATUS_ERROR",
            ContentError::Timeout(_) => "TIMEOUT_ERROR",
            ContentError::EmptyResponse => "EMPTY_RESPONSE",
            ContentError::Serialization(_) => "SERIALIZATION_ERROR",
            ContentError::Decode(_) => "DECODE_ERROR",
            ContentError::Validation(_) => "VALIDATION_ERROR",
        }
    }

    /// Convert to a structured error payload
    pub fn to_error_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
                "fallback": self.fallback_reason().as_str()
            }
        })
    }
}
