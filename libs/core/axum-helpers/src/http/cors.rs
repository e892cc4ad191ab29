use axum::http::{HeaderName, HeaderValue, Method, header, header::InvalidHeaderValue};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Parse a comma-separated origin list such as
/// `http://localhost:5173, https://shop.example`. Blank entries are skipped.
pub fn parse_origins(origins: &str) -> Result<Vec<HeaderValue>, InvalidHeaderValue> {
    origins
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(HeaderValue::from_str)
        .collect()
}

/// CORS for an explicit list of origins.
///
/// Allows the methods the API exposes plus the header that carries the API
/// key, so browser clients can pass the credential gate.
pub fn create_cors_layer(
    allowed_origins: Vec<HeaderValue>,
    credential_header: HeaderName,
) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, credential_header])
        .max_age(Duration::from_secs(3600))
}
