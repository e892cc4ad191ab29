//! Request authentication.
//!
//! Routes are protected by a [`CredentialVerifier`] mounted once ahead of a
//! route group with [`require_credential`]. The shipped verifier,
//! [`StaticApiKey`], compares one request header against a single configured
//! secret. Other schemes plug in by implementing the trait.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use axum_helpers::auth::{ApiKeyConfig, CredentialVerifier, StaticApiKey, require_credential};
//! use core_config::FromEnv;
//!
//! let config = ApiKeyConfig::from_env()?;
//! let verifier: Arc<dyn CredentialVerifier> = Arc::new(StaticApiKey::from_config(&config)?);
//!
//! let protected = Router::new()
//!     .route("/api/things", get(handler))
//!     .layer(axum::middleware::from_fn_with_state(verifier, require_credential));
//! ```

pub mod config;
pub mod middleware;
pub mod verifier;

pub use config::{ApiKeyConfig, DEFAULT_API_KEY_HEADER};
pub use middleware::require_credential;
pub use verifier::{CredentialVerifier, StaticApiKey};
