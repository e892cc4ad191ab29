//! API routes module

pub mod health;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Routes mounted under `/api`
pub fn routes(state: &AppState) -> eyre::Result<Router> {
    Ok(Router::new().nest("/products", products::router(state)?))
}

/// Initialize database indexes
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    products::init_indexes(state).await
}
