use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::not_found;
use crate::http::security::security_headers;
use axum::{Router, middleware};
use core_config::server::ServerConfig;
use std::future::Future;
use std::io;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";
pub const SWAGGER_UI_PATH: &str = "/api-docs";

/// Assemble the full application router.
///
/// - `apis` is nested under `/api` (domain routers carry their own state)
/// - `health_routes` is merged at the root (`/health`, `/ready`)
/// - Swagger UI is served at `/api-docs`, the document at `/api-docs/openapi.json`
/// - unmatched paths get a `{message}` 404
///
/// Every route, health routes included, passes through request tracing, security
/// headers, optional CORS and response compression.
pub fn create_router<T>(apis: Router, health_routes: Router, cors: Option<CorsLayer>) -> Router
where
    T: OpenApi + 'static,
{
    let router = Router::new()
        .merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, T::openapi()))
        .merge(health_routes)
        .nest("/api", apis)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers));

    let router = match cors {
        Some(cors) => router.layer(cors),
        None => router,
    };

    router.layer(CompressionLayer::new())
}

/// Serve `router` until SIGINT/SIGTERM, then run `cleanup` bounded by
/// `server_config.shutdown_timeout`.
///
/// ```ignore
/// let client = state.mongo.clone();
/// create_production_app(router, &config.server, async move {
///     client.shutdown().await;
/// })
/// .await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (coordinator, _rx) = ShutdownCoordinator::new();
    let signal_handle = coordinator.clone();
    let cleanup_handle = coordinator.clone();
    let shutdown_timeout = server_config.shutdown_timeout;

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    tokio::spawn(async move { signal_handle.wait_for_signal().await });

    let cleanup_task = tokio::spawn(async move {
        cleanup_handle.wait().await;

        info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
        match tokio::time::timeout(shutdown_timeout, cleanup).await {
            Ok(()) => info!("Cleanup completed successfully"),
            Err(_) => tracing::warn!(
                "Cleanup exceeded timeout of {:?}, forcing shutdown",
                shutdown_timeout
            ),
        }
    });

    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move { coordinator.wait().await })
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    if cleanup_task.await.is_err() {
        tracing::error!("Cleanup task panicked");
    }

    serve_result
}
