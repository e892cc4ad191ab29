//! Server infrastructure: router assembly, health checks and graceful
//! shutdown.
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//! use core_config::app_info;
//!
//! let health_routes = health_router(app_info!()).merge(ready_routes);
//! let router = create_router::<ApiDoc>(api_routes, health_routes, cors);
//! create_production_app(router, &config.server, cleanup).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{OPENAPI_JSON_PATH, SWAGGER_UI_PATH, create_production_app, create_router};
pub use health::{HealthCheckFuture, HealthResponse, health_router, run_health_checks};
pub use shutdown::{ShutdownCoordinator, shutdown_signal};
