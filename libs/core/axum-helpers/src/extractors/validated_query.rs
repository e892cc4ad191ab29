//! Query-string extractor with validation.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Like [`ValidatedJson`](super::ValidatedJson) but for the query string.
///
/// Unparseable values (e.g. `page=abc`) reject with
/// [`AppError::QueryExtractorRejection`]; values that parse but break a rule
/// (e.g. `page=0`) reject with [`AppError::Validation`].
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(data) = Query::<T>::from_request_parts(parts, state).await?;
        data.validate()?;
        Ok(ValidatedQuery(data))
    }
}
