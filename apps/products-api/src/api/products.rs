//! Products API routes

use std::sync::Arc;

use axum::{Router, middleware};
use axum_helpers::{CredentialVerifier, StaticApiKey, require_credential};
use domain_products::{MongoProductRepository, ProductService, handlers};

use crate::state::AppState;

/// Products router; every route sits behind the API key gate.
pub fn router(state: &AppState) -> eyre::Result<Router> {
    let verifier: Arc<dyn CredentialVerifier> =
        Arc::new(StaticApiKey::from_config(&state.config.api_key)?);

    let repository = MongoProductRepository::new(&state.db);
    let service = ProductService::new(repository);

    Ok(handlers::router(service).layer(middleware::from_fn_with_state(
        verifier,
        require_credential,
    )))
}

/// Initialize products indexes
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    let repository = MongoProductRepository::new(&state.db);
    repository.init_indexes().await?;
    Ok(())
}
