use super::health::health_router;
use super::shutdown::shutdown_signal;
use crate::errors::handlers::not_found;
use crate::http::security::security_headers;
use axum::{Router, middleware};
use core_config::AppInfo;
use core_config::server::ServerConfig;
use std::future::IntoFuture;
use std::io;
use std::sync::Arc;
use tokio::sync::Notify;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Starts the Axum server with graceful shutdown.
///
/// After SIGINT/SIGTERM the server stops accepting connections and waits for
/// in-flight requests, but no longer than `server_config.shutdown_timeout`.
///
/// # Errors
/// Returns an error if the TCP listener fails to bind to the configured
/// address or the server fails while running.
pub async fn create_app(router: Router, server_config: &ServerConfig) -> io::Result<()> {
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let signalled = Arc::new(Notify::new());
    let notify = signalled.clone();

    let server = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            notify.notify_one();
        })
        .into_future();

    let timeout = server_config.shutdown_timeout;
    let drain_deadline = async {
        signalled.notified().await;
        tokio::time::sleep(timeout).await;
    };

    tokio::select! {
        result = server => {
            result.inspect_err(|e| tracing::error!("Server encountered an error: {:?}", e))?;
            info!("Server stopped");
        }
        _ = drain_deadline => {
            warn!("Graceful shutdown exceeded {:?}, forcing exit", timeout);
        }
    }

    Ok(())
}

/// Creates a configured Axum router with common middleware and documentation.
///
/// This function sets up:
/// - Swagger UI at `/swagger-ui` serving `/api-docs/openapi.json`
/// - API routes nested under `/api`
/// - `GET /` and `GET /health` from [`super::health_router`]
/// - A JSON 404 fallback
/// - Request tracing, security headers and the given CORS layer, applied to
///   every route above
///
/// # Type Parameters
/// * `T` - A type implementing `utoipa::OpenApi` for API documentation
///
/// # Example
/// ```ignore
/// let api_routes = Router::new().nest("/estimate", estimate_router);
/// let router = create_router::<ApiDoc>(api_routes, app_info!(), create_permissive_cors_layer());
/// ```
pub fn create_router<T>(apis: Router, app_info: AppInfo, cors_layer: CorsLayer) -> Router
where
    T: OpenApi + 'static,
{
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .nest("/api", apis)
        .merge(health_router(app_info))
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(cors_layer)
}
