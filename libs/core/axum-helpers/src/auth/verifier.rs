use axum::http::{HeaderMap, HeaderName, header::InvalidHeaderName};
use subtle::ConstantTimeEq;

use super::config::ApiKeyConfig;

/// Decides whether a request carries acceptable credentials.
///
/// Only headers are visible; a verifier never sees the body and never touches
/// storage.
pub trait CredentialVerifier: Send + Sync + 'static {
    fn verify(&self, headers: &HeaderMap) -> bool;
}

/// Accepts requests whose key header exactly matches one configured value.
///
/// Header lookup is case-insensitive (HTTP header names are); the value
/// comparison is case-sensitive and constant time.
#[derive(Clone)]
pub struct StaticApiKey {
    header: HeaderName,
    key: Vec<u8>,
}

impl StaticApiKey {
    pub fn new(header: HeaderName, key: impl Into<String>) -> Self {
        Self {
            header,
            key: key.into().into_bytes(),
        }
    }

    pub fn from_config(config: &ApiKeyConfig) -> Result<Self, InvalidHeaderName> {
        let header = HeaderName::from_bytes(config.header.to_ascii_lowercase().as_bytes())?;
        Ok(Self::new(header, config.key.clone()))
    }

    pub fn header(&self) -> &HeaderName {
        &self.header
    }
}

impl std::fmt::Debug for StaticApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticApiKey")
            .field("header", &self.header)
            .finish_non_exhaustive()
    }
}

impl CredentialVerifier for StaticApiKey {
    fn verify(&self, headers: &HeaderMap) -> bool {
        let Some(presented) = headers.get(&self.header) else {
            return false;
        };
        presented.as_bytes().ct_eq(&self.key).into()
    }
}
