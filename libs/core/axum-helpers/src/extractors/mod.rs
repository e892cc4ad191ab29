//! Custom extractors for Axum handlers.
//!
//! Both extractors reject with [`AppError`](crate::errors::AppError) so that
//! malformed input and rule violations share the service's error body shapes.

pub mod validated_json;
pub mod validated_query;

pub use validated_json::ValidatedJson;
pub use validated_query::ValidatedQuery;
