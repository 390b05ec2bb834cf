/**
 * Backend Error Types
 *
 * This module defines the error taxonomy for the backend server. Every
 * request-terminal failure is one of these variants, and each variant maps to
 * exactly one HTTP status code.
 *
 * # Error Categories
 *
 * - Client input errors (bad channel name, empty content, wrong content
 *   type, malformed JSON) map to 400
 * - Oversized bodies map to 413
 * - Missing files and pages map to 404
 * - A generated artifact that is still absent after its script ran maps
 *   to 500
 * - I/O and other internal failures map to 500
 *
 * Nothing is retried. Best-effort side effects (git commits, script spawn
 * failures) are not represented here; their `Result`s are logged and dropped
 * at the call site because they are non-fatal by contract.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::shared::validate::ValidationError;

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use corkboard::backend::error::BackendError;
///
/// let err = BackendError::invalid_request("Invalid content type");
/// let err = BackendError::not_found("css/missing.css");
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Malformed or invalid client input
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// Human-readable error message, safe to echo to the client
        message: String,
    },

    /// Request body exceeded the configured limit
    #[error("Request entity too large")]
    PayloadTooLarge,

    /// Requested file or page does not exist
    #[error("File not found: {path}")]
    NotFound {
        /// The requested path, relative to the content root
        path: String,
    },

    /// HTTP method not supported for this path
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// A rendering script ran but the expected artifact never appeared
    #[error("Failed to generate {artifact}")]
    GenerationFailed {
        /// Artifact filename that should have been produced
        artifact: String,
    },

    /// Filesystem failure while serving or storing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other internal failure
    #[error("Internal error: {message}")]
    Internal {
        /// Diagnostic detail, logged but never sent to the client
        message: String,
    },
}

impl BackendError {
    /// Create a new invalid-request error (HTTP 400)
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Create a new not-found error (HTTP 404)
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Create a new generation-failure error (HTTP 500)
    pub fn generation_failed(artifact: impl Into<String>) -> Self {
        Self::GenerationFailed {
            artifact: artifact.into(),
        }
    }

    /// Create a new internal error (HTTP 500)
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::GenerationFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Io(_) | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the message sent to the client.
    ///
    /// Internal detail (I/O errors, internal messages) is replaced with a
    /// generic message; the full error is logged server-side instead.
    pub fn client_message(&self) -> String {
        match self {
            Self::InvalidRequest { message } => message.clone(),
            Self::PayloadTooLarge => "Request entity too large".to_string(),
            Self::NotFound { path } => format!("File not found: {}", path),
            Self::MethodNotAllowed => "Method not allowed".to_string(),
            Self::GenerationFailed { artifact } => format!("Failed to generate {}", artifact),
            Self::Io(_) | Self::Internal { .. } => "Internal server error".to_string(),
        }
    }
}

impl From<ValidationError> for BackendError {
    fn from(err: ValidationError) -> Self {
        Self::invalid_request(err.to_string())
    }
}
