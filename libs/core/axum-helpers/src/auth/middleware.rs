use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::verifier::CredentialVerifier;
use crate::errors::{AppError, messages};

/// Credential gate.
///
/// Runs before any extractor of the wrapped routes, so a rejected request
/// never has its body read and never reaches a handler.
///
/// ```ignore
/// let verifier: Arc<dyn CredentialVerifier> = Arc::new(StaticApiKey::from_config(&cfg)?);
/// let routes = routes.layer(axum::middleware::from_fn_with_state(verifier, require_credential));
/// ```
pub async fn require_credential(
    State(verifier): State<Arc<dyn CredentialVerifier>>,
    request: Request,
    next: Next,
) -> Response {
    if !verifier.verify(request.headers()) {
        tracing::debug!(
            method = %request.method(),
            path = %request.uri().path(),
            "Rejected request without valid credential"
        );
        return AppError::Unauthorized(messages::UNAUTHORIZED.to_string()).into_response();
    }

    next.run(request).await
}
