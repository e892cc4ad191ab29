//! API key configuration.

use core_config::{ConfigError, FromEnv, env_or_default, env_required};

pub const DEFAULT_API_KEY_HEADER: &str = "x-api-key";

/// Shared-secret API key configuration.
///
/// Loaded from environment variables:
/// - `API_KEY` (required, non-empty)
/// - `API_KEY_HEADER` (default: `x-api-key`)
#[derive(Clone)]
pub struct ApiKeyConfig {
    /// Request header that carries the key
    pub header: String,
    pub key: String,
}

impl ApiKeyConfig {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            header: DEFAULT_API_KEY_HEADER.to_string(),
            key: key.into(),
        }
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }
}

impl std::fmt::Debug for ApiKeyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyConfig")
            .field("header", &self.header)
            .field("key", &"[REDACTED]")
            .finish()
    }
}

impl FromEnv for ApiKeyConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let key = env_required("API_KEY")?;
        if key.is_empty() {
            return Err(ConfigError::ParseError {
                key: "API_KEY".to_string(),
                details: "must not be empty".to_string(),
            });
        }

        let header = env_or_default("API_KEY_HEADER", DEFAULT_API_KEY_HEADER);

        Ok(Self { header, key })
    }
}
