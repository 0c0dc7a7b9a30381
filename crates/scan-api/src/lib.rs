//! scan-api - HTTP layer of the scan proxy
//!
//! Accepts a multipart upload, forwards the file to a `ScanBackend` and
//! answers with the reshaped `ScanResult`. The crate is backend-agnostic;
//! the daemon plugs in the HTTP scanner client.
//!
//! # Usage
//!
//! ```ignore
//! use scan_api::{create_router, AppState};
//! use scan_client::ScannerClient;
//!
//! let backend = ScannerClient::new(&backend_url)?;
//! let state = AppState::new(Arc::new(backend));
//! let router = create_router(state);
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod state;

pub use config::{resolve_backend_url, ApiLimits};
pub use error::ApiError;
pub use state::AppState;

use axum::error_handling::HandleErrorLayer;
use axum::extract::DefaultBodyLimit;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{BoxError, Router};
use tower::timeout::error::Elapsed;
use tower::timeout::TimeoutLayer;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the router with default limits
pub fn create_router(state: AppState) -> Router {
    create_router_with_limits(state, ApiLimits::default())
}

/// Create the router with explicit upload and duration limits
pub fn create_router_with_limits(state: AppState, limits: ApiLimits) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Scan routes; /api/scan is the path existing clients post to
        .route(
            "/scan",
            post(handlers::scan::scan_file).get(handlers::scan::scan_usage),
        )
        .route(
            "/api/scan",
            post(handlers::scan::scan_file).get(handlers::scan::scan_usage),
        )
        // Middleware
        .layer(DefaultBodyLimit::max(limits.max_upload_bytes))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_timeout))
                .layer(TimeoutLayer::new(limits.request_timeout)),
        )
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Map a request that ran past the duration limit to a JSON 408
async fn handle_timeout(err: BoxError) -> ApiError {
    if err.is::<Elapsed>() {
        ApiError::Timeout(error::TIMEOUT_MESSAGE.to_string())
    } else {
        ApiError::Unexpected(err.to_string())
    }
}

/// Turn a handler panic into the same JSON error body as any other failure
fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        String::new()
    };

    ApiError::Unexpected(message).into_response()
}
