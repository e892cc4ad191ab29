//! # Axum Helpers
//!
//! Shared building blocks for the HTTP services in this workspace.
//!
//! - **[`auth`]**: credential gate with a pluggable [`CredentialVerifier`]
//! - **[`errors`]**: [`AppError`] and the JSON error bodies it renders
//! - **[`extractors`]**: [`ValidatedJson`] and [`ValidatedQuery`]
//! - **[`http`]**: CORS and security-header middleware
//! - **[`server`]**: router assembly, health checks, graceful shutdown

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use auth::{ApiKeyConfig, CredentialVerifier, StaticApiKey, require_credential};

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks, shutdown_signal,
};

pub use http::{create_cors_layer, parse_origins, security_headers};

pub use errors::{
    AppError, ErrorCode, ErrorResponse, FieldError, ValidationErrorResponse, field_errors,
};

pub use extractors::{ValidatedJson, ValidatedQuery};
