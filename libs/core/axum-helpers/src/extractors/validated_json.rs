//! JSON extractor with automatic validation using the validator crate.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor with automatic validation.
///
/// A body that is not JSON, or does not fit `T`, is rejected with
/// [`AppError::JsonExtractorRejection`]. A body that parses but breaks a
/// `validator` rule is rejected with [`AppError::Validation`], one entry per
/// offending field.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::post;
/// use axum_helpers::extractors::ValidatedJson;
/// use serde::Deserialize;
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct CreateTag {
///     #[validate(length(min = 1, message = "Label is required"))]
///     label: String,
/// }
///
/// async fn create_tag(ValidatedJson(payload): ValidatedJson<CreateTag>) -> String {
///     format!("Creating tag: {}", payload.label)
/// }
///
/// let app = Router::new().route("/tags", post(create_tag));
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        data.validate()?;
        Ok(ValidatedJson(data))
    }
}
