use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, FieldError};
use mongodb::error::ErrorKind;
use thiserror::Error;

pub const NOT_FOUND_MESSAGE: &str = "Product not found";
pub const MISSING_SEARCH_TERM_MESSAGE: &str = "Name query param is required";

/// Mongo server error codes for writes the server refused on their merits
/// (duplicate key, document validation) as opposed to availability failures.
const DUPLICATE_KEY: i32 = 11000;
const DOCUMENT_VALIDATION_FAILURE: i32 = 121;

#[derive(Debug, Error)]
pub enum ProductError {
    /// Unknown or malformed id
    #[error("Product not found: {0}")]
    NotFound(String),

    #[error("Invalid input on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("Search term is missing")]
    MissingSearchTerm,

    /// Storage refused a write
    #[error("Write rejected: {0}")]
    Persistence(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl ProductError {
    /// Classify a driver error raised by an insert or update.
    pub fn from_write(err: mongodb::error::Error) -> Self {
        match err.kind.as_ref() {
            ErrorKind::Write(_) => ProductError::Persistence(err.to_string()),
            ErrorKind::Command(cmd)
                if matches!(cmd.code, DUPLICATE_KEY | DOCUMENT_VALIDATION_FAILURE) =>
            {
                ProductError::Persistence(cmd.message.clone())
            }
            _ => ProductError::Database(err.to_string()),
        }
    }
}

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(_) => AppError::NotFound(NOT_FOUND_MESSAGE.to_string()),
            ProductError::Validation(errors) => AppError::Validation(errors),
            ProductError::MissingSearchTerm => {
                AppError::BadRequest(MISSING_SEARCH_TERM_MESSAGE.to_string())
            }
            ProductError::Persistence(msg) => AppError::WriteRejected(msg),
            ProductError::Database(msg) => AppError::Database(msg),
            ProductError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        ProductError::Database(err.to_string())
    }
}
