//! Health check endpoints

use axum::{Router, extract::State, response::Response, routing::get};
use axum_helpers::{HealthCheckFuture, health_router, run_health_checks};
use database::mongodb::check_health;

use crate::state::AppState;

/// Readiness: 200 when MongoDB answers a ping, 503 otherwise.
async fn ready(State(state): State<AppState>) -> Response {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
        "database",
        Box::pin(async {
            check_health(&state.mongo_client)
                .await
                .map_err(|e| e.to_string())
        }),
    )];
    run_health_checks(checks).await
}

/// `/health` (liveness) and `/ready` (readiness), mounted at the root.
pub fn router(state: AppState) -> Router {
    let app = state.config.app;
    Router::new()
        .route("/ready", get(ready))
        .with_state(state)
        .merge(health_router(app))
}
