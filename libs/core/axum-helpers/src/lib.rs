//! # Axum Helpers
//!
//! Utilities, middleware and helpers shared by the Axum services in this
//! workspace.
//!
//! ## Modules
//!
//! - **[`server`]**: Router setup with API docs, health checks, graceful shutdown
//! - **[`http`]**: HTTP middleware (CORS allow-list, security headers)
//! - **[`errors`]**: Structured error responses with error codes
//! - **[`validation`]**: Declarative per-request rules and the validation gate
//! - **[`extractors`]**: The [`Validated`] extractor
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_production_app, create_router};
//! use core_config::server::ServerConfig;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let config = ServerConfig::default();
//!     let router = create_router::<ApiDoc>(Router::new(), &[config.local_origin()])?;
//!     create_production_app(router, &config, std::time::Duration::from_secs(30), async {}).await
//! }
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;
pub mod validation;

// Re-export server types
pub use server::{
    HealthCheckFuture, HealthResponse, OPENAPI_JSON_PATH, create_production_app, create_router,
    health_router, run_health_checks, shutdown_signal,
};

// Re-export HTTP middleware
pub use http::{AllowedOrigins, create_cors_layer, origin_guard, security_headers};

// Re-export error types
pub use errors::{
    AppError, ErrorCode, ErrorResponse, error_response,
    responses::{
        BadRequestValidationResponse, InternalServerErrorResponse, NotFoundResponse,
    },
};

// Re-export validation and extractors
pub use extractors::Validated;
pub use validation::{FieldError, Location, RequestFields, Rule, ValidatedRequest, rules};
