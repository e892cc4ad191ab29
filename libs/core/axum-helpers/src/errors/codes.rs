//! Type-safe error codes for structured logging.
//!
//! Every [`AppError`](super::AppError) is logged with one of these codes as the
//! `error_code` field so failures can be counted and alerted on without
//! parsing messages. Codes never appear in response bodies.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::ValidationError;
//! assert_eq!(code.as_str(), "VALIDATION_ERROR");
//! assert_eq!(code.code(), 1001);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// One or more request fields failed validation
    ValidationError,

    /// Request body is not valid JSON for the target type
    InvalidJson,

    /// Query string could not be parsed
    InvalidQuery,

    /// Malformed request that is not a field validation failure
    BadRequest,

    NotFound,

    /// Credential missing or rejected
    Unauthorized,

    // Server errors
    InternalError,

    ServiceUnavailable,

    // Storage errors (2000-2999)
    /// Storage was unreachable or failed unexpectedly
    DatabaseError,

    /// Storage refused a write (constraint violation, document validation)
    DatabaseWriteRejected,
}

impl ErrorCode {
    /// Machine-readable identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidJson => "INVALID_JSON",
            Self::InvalidQuery => "INVALID_QUERY",
            Self::BadRequest => "BAD_REQUEST",
            Self::NotFound => "NOT_FOUND",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::DatabaseWriteRejected => "DATABASE_WRITE_REJECTED",
        }
    }

    /// Integer code for logs and metrics.
    ///
    /// - 1000-1999: request and server errors
    /// - 2000-2999: storage errors
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidJson => 1002,
            Self::InvalidQuery => 1003,
            Self::NotFound => 1004,
            Self::InternalError => 1005,
            Self::Unauthorized => 1006,
            Self::BadRequest => 1007,
            Self::ServiceUnavailable => 1011,
            Self::DatabaseError => 2001,
            Self::DatabaseWriteRejected => 2002,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Validation failed",
            Self::InvalidJson => "Invalid JSON body",
            Self::InvalidQuery => "Invalid query string",
            Self::BadRequest => "Bad request",
            Self::NotFound => "Resource not found",
            Self::Unauthorized => "Unauthorized",
            Self::InternalError => "Something went wrong!",
            Self::ServiceUnavailable => "Service is temporarily unavailable",
            Self::DatabaseError => "Something went wrong!",
            Self::DatabaseWriteRejected => "Write rejected by storage",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
