use super::shutdown::shutdown_signal;
use crate::errors::handlers::not_found;
use crate::http::{AllowedOrigins, create_cors_layer, origin_guard, security_headers};
use axum::{Router, middleware};
use core_config::server::ServerConfig;
use std::future::Future;
use std::io;
use std::time::Duration;
use tower::Layer;
use tower_http::compression::CompressionLayer;
use tower_http::normalize_path::NormalizePathLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable as RedocServable};
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

/// Path of the generated OpenAPI document.
pub const OPENAPI_JSON_PATH: &str = "/docs/openapi.json";

/// Creates a configured Axum router with common middleware and documentation.
///
/// Sets up:
/// - Swagger UI at `/docs` (document at [`OPENAPI_JSON_PATH`]), ReDoc at
///   `/redoc` and Scalar at `/scalar`
/// - API routes nested under `/api`, with a trailing slash ignored
/// - Tracing, security headers and the CORS allow-list
/// - 404 fallback handler
///
/// Requests whose `Origin` is not in `allowed_origins` are answered with 403
/// before routing. Health endpoints should be merged by the app using
/// `health_router()` and its own ready handler.
///
/// # Errors
/// Returns `InvalidInput` if `allowed_origins` is empty or holds an invalid
/// header value.
///
/// # Example
/// ```ignore
/// let api_routes = Router::new().nest("/products", domain_products::router(service));
/// let origins = cors_config.allowed_origins(&server_config);
/// let router = create_router::<ApiDoc>(api_routes, &origins)?;
/// ```
pub fn create_router<T>(apis: Router, allowed_origins: &[String]) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    let allowed = AllowedOrigins::new(allowed_origins)?;
    info!(
        "CORS configured with allowed origins: {}",
        allowed_origins.join(", ")
    );

    let router = Router::new()
        .merge(SwaggerUi::new("/docs").url(OPENAPI_JSON_PATH, T::openapi()))
        .merge(Redoc::with_url("/redoc", T::openapi()))
        .merge(Scalar::with_url("/scalar", T::openapi()))
        .nest_service(
            "/api",
            NormalizePathLayer::trim_trailing_slash().layer(apis.fallback(not_found)),
        )
        .fallback(not_found)
        .layer(middleware::from_fn(security_headers))
        .layer(create_cors_layer(&allowed))
        // Disallowed origins never reach the CORS layer or the routes
        .layer(middleware::from_fn_with_state(allowed, origin_guard))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CompressionLayer::new());

    Ok(router)
}

/// Serves `router` until SIGINT/SIGTERM, drains in-flight requests, then runs
/// `cleanup` bounded by `shutdown_timeout`.
///
/// # Example
/// ```ignore
/// let cleanup = async move {
///     db.close().await.ok();
/// };
///
/// create_production_app(router, &config, Duration::from_secs(30), cleanup).await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send,
{
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
    match tokio::time::timeout(shutdown_timeout, cleanup).await {
        Ok(()) => info!("Cleanup completed successfully"),
        Err(_) => tracing::warn!(
            "Cleanup exceeded timeout of {:?}, forcing shutdown",
            shutdown_timeout
        ),
    }

    serve_result
}
