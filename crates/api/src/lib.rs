//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - the media upload gateway (`POST /upload`)
//! - the catalog query gateway (`POST /db`)
//! - the admin credential extractor
//! - the JSON error response

pub mod error;
pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::header::AUTHORIZATION;
use toonshelf_core::query::QueryGateway;
use toonshelf_core::storage::StorageService;
use toonshelf_core::upload::UploadValidator;
use toonshelf_shared::AdminGate;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Admin credential gate.
    pub gate: Arc<AdminGate>,
    /// Upload request validator.
    pub validator: Arc<UploadValidator>,
    /// Storage writer. `None` when the storage zone is not configured.
    pub storage: Option<Arc<StorageService>>,
    /// Catalog query gateway. `None` when no database is configured.
    pub queries: Option<Arc<QueryGateway>>,
    /// Largest request body accepted, in bytes.
    pub body_limit: usize,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.body_limit;

    Router::new()
        .merge(routes::api_routes())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(SetSensitiveRequestHeadersLayer::new([AUTHORIZATION]))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
