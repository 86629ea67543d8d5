//! Typed error handling for the registration surface
//!
//! HTTP-facing failures are expressed as [`ApiError`], which knows its own
//! status code and wire code and renders the `{ "error": { code, message } }`
//! envelope. Non-HTTP layers (configuration, mail, form provider) have their
//! own error enums.
//!
//! # Error Categories
//!
//! - [`ApiError`]: Errors returned by the confirmation endpoint
//! - [`ConfigError`]: Errors related to configuration loading
//! - [`MailError`]: Errors raised while composing or sending email
//! - [`FormError`]: Errors raised by the form provider or schema loading
//!
//! # Example
//!
//! ```rust,ignore
//! match service.confirm(email, name).await {
//!     Ok(user) => Json(user).into_response(),
//!     Err(ApiError::EmailNotFound) => { /* no prior ticket */ }
//!     Err(e) => e.into_response(),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Errors surfaced by the confirmation endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The endpoint was called with a method other than POST
    MethodUnknown,

    /// The submitted email is malformed
    BadEmail,

    /// No ticket exists for the submitted email
    EmailNotFound,

    /// The confirm step could not be completed
    RegistrationNotCompleted,

    /// The request body could not be parsed
    InvalidBody { message: String },

    /// Unexpected failure in a collaborator
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::MethodUnknown => write!(f, "This endpoint only responds to POST"),
            ApiError::BadEmail => write!(f, "Invalid email"),
            ApiError::EmailNotFound => write!(f, "User not registered"),
            ApiError::RegistrationNotCompleted => write!(f, "Registration not completed"),
            ApiError::InvalidBody { message } => write!(f, "Invalid request body: {}", message),
            ApiError::Internal(_) => write!(f, "Internal server error"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Inner part of the error envelope
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

/// Error envelope written on the wire: `{ "error": { code, message } }`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MethodUnknown => StatusCode::NOT_IMPLEMENTED,
            ApiError::BadEmail => StatusCode::BAD_REQUEST,
            ApiError::EmailNotFound => StatusCode::NOT_FOUND,
            ApiError::RegistrationNotCompleted => StatusCode::NOT_FOUND,
            ApiError::InvalidBody { .. } => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::MethodUnknown => "method_unknown",
            ApiError::BadEmail => "bad_email",
            ApiError::EmailNotFound => "email_not_found",
            ApiError::RegistrationNotCompleted => "registration_not_completed",
            ApiError::InvalidBody { .. } => "invalid_body",
            ApiError::Internal(_) => "internal_error",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: ErrorBody {
                code: self.error_code().to_string(),
                message: self.to_string(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(detail) = &self {
            tracing::error!(detail = %detail, "internal error while handling request");
        }
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to parse a configuration document
    #[error("Failed to parse config '{source_name}': {message}")]
    ParseError {
        source_name: String,
        message: String,
    },

    /// Invalid value in configuration
    #[error("Invalid value '{value}' for '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// Configuration file exists but could not be read
    #[error("Failed to read config '{path}': {message}")]
    ReadError { path: String, message: String },
}

// =============================================================================
// Mail Errors
// =============================================================================

/// Errors raised while composing or sending email
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// Template rendering failed
    #[error("Failed to render email template '{template}': {message}")]
    Template { template: String, message: String },

    /// An address could not be parsed
    #[error("Invalid email address '{address}'")]
    InvalidAddress { address: String },

    /// Message could not be assembled
    #[error("Failed to build email message: {0}")]
    Build(String),

    /// The transport rejected or failed to deliver the message
    #[error("Mail transport error: {0}")]
    Transport(String),
}

// =============================================================================
// Form Errors
// =============================================================================

/// Errors raised by the form provider or schema loading
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// Schema document could not be read or parsed
    #[error("Invalid form schema: {0}")]
    Schema(String),

    /// The provider refused the submission
    #[error("Form provider rejected submission with status {status}")]
    Rejected { status: u16 },

    /// The provider could not be reached
    #[error("Form provider unreachable: {0}")]
    Unreachable(String),

    /// The chained confirmation step failed
    #[error("{0}")]
    Confirmation(String),
}

impl From<serde_json::Error> for FormError {
    fn from(err: serde_json::Error) -> Self {
        FormError::Schema(err.to_string())
    }
}

impl From<std::io::Error> for FormError {
    fn from(err: std::io::Error) -> Self {
        FormError::Schema(err.to_string())
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for endpoint operations
pub type ApiResult<T> = Result<T, ApiError>;
