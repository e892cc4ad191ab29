use axum::{http::StatusCode, response::Response};

use super::{error_response, messages};

/// Fallback for unmatched routes.
pub async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, messages::ROUTE_NOT_FOUND)
}
