pub mod codes;
pub mod handlers;
pub mod messages;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Serialize, Serializer, ser::SerializeMap};
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Body for every error response except field validation.
///
/// ```json
/// { "message": "Product not found" }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}

/// Body for field validation failures, one entry per violated field.
///
/// ```json
/// { "errors": [ { "name": "Name is required" }, { "price": "Price must be greater than 0" } ] }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationErrorResponse {
    #[schema(value_type = Vec<Object>)]
    pub errors: Vec<FieldError>,
}

/// A single violated field. Serializes as a one-entry object `{field: message}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl Serialize for FieldError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.field, &self.message)?;
        map.end()
    }
}

/// Flatten `validator` output into one [`FieldError`] per field, sorted by
/// field name. When a field breaks several rules the first message wins.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let message = errs
                .first()
                .and_then(|e| e.message.as_ref())
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Invalid value for {}", field));
            FieldError::new(field.to_string(), message)
        })
        .collect();
    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}

/// Application error type that can be converted to HTTP responses.
///
/// Client errors (4xx) carry a message that is safe to return. Server errors
/// (5xx) carry diagnostic detail that is logged and replaced by a generic
/// message in the response.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Query extraction error: {0}")]
    QueryExtractorRejection(#[from] QueryRejection),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    /// Storage refused a write; the storage message is returned to the client.
    #[error("Write rejected: {0}")]
    WriteRejected(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(field_errors(&errors))
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::JsonExtractorRejection(_)
            | AppError::QueryExtractorRejection(_)
            | AppError::BadRequest(_)
            | AppError::WriteRejected(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn error_code(&self) -> ErrorCode {
        match self {
            AppError::Validation(_) => ErrorCode::ValidationError,
            AppError::JsonExtractorRejection(_) => ErrorCode::InvalidJson,
            AppError::QueryExtractorRejection(_) => ErrorCode::InvalidQuery,
            AppError::BadRequest(_) => ErrorCode::BadRequest,
            AppError::Unauthorized(_) => ErrorCode::Unauthorized,
            AppError::NotFound(_) => ErrorCode::NotFound,
            AppError::WriteRejected(_) => ErrorCode::DatabaseWriteRejected,
            AppError::Database(_) => ErrorCode::DatabaseError,
            AppError::InternalServerError(_) => ErrorCode::InternalError,
            AppError::ServiceUnavailable(_) => ErrorCode::ServiceUnavailable,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.error_code();

        let message = match self {
            AppError::Validation(errors) => {
                tracing::info!(error_code = code.code(), ?errors, "Validation failed");
                return (status, Json(ValidationErrorResponse { errors })).into_response();
            }
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!(error_code = code.code(), "JSON extraction error: {}", e);
                e.body_text()
            }
            AppError::QueryExtractorRejection(e) => {
                tracing::warn!(error_code = code.code(), "Query extraction error: {}", e);
                e.body_text()
            }
            AppError::BadRequest(msg) => {
                tracing::info!(error_code = code.code(), "Bad request: {}", msg);
                msg
            }
            AppError::Unauthorized(msg) => {
                tracing::info!(error_code = code.code(), "Unauthorized: {}", msg);
                msg
            }
            AppError::NotFound(msg) => {
                tracing::info!(error_code = code.code(), "Not found: {}", msg);
                msg
            }
            AppError::WriteRejected(msg) => {
                tracing::warn!(error_code = code.code(), "Write rejected: {}", msg);
                msg
            }
            AppError::Database(detail) => {
                tracing::error!(error_code = code.code(), "Database error: {}", detail);
                messages::INTERNAL_ERROR.to_string()
            }
            AppError::InternalServerError(detail) => {
                tracing::error!(error_code = code.code(), "Internal server error: {}", detail);
                messages::INTERNAL_ERROR.to_string()
            }
            AppError::ServiceUnavailable(detail) => {
                tracing::warn!(error_code = code.code(), "Service unavailable: {}", detail);
                code.default_message().to_string()
            }
        };

        error_response(status, message)
    }
}

/// Build a `{message}` error response.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let body = Json(ErrorResponse {
        message: message.into(),
    });
    (status, body).into_response()
}
