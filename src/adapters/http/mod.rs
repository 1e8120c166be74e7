//! HTTP adapters - REST API implementations.
//!
//! Each area has its own dto/handlers/routes trio. [`router`] assembles
//! them under the API version prefix and puts the admin-only routes behind
//! [`middleware::admin_middleware`].

pub mod accounts;
pub mod certifications;
pub mod error;
pub mod middleware;
pub mod state;
pub mod users;

pub use error::{ApiError, ErrorResponse};
pub use state::{AppState, HandlerSettings};

use std::time::Duration;

use axum::{http::StatusCode, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::domain::foundation::{Pagination, DEFAULT_PAGE_SIZE};

/// Page selection from optional query parameters; page numbers start at 1.
pub(crate) fn page_selection(page: Option<u32>, page_size: Option<u32>) -> Pagination {
    Pagination::new(page.unwrap_or(1), page_size.unwrap_or(DEFAULT_PAGE_SIZE))
}

async fn health() -> StatusCode {
    StatusCode::OK
}

/// Builds the complete service router.
///
/// Every API route lives under `/{api_version}`; `/health` stays at the root.
pub fn router(state: AppState, api_version: &str, request_timeout: Duration) -> Router {
    let admin_routes = Router::new()
        .merge(users::user_admin_routes())
        .merge(certifications::certification_admin_routes())
        .route_layer(axum::middleware::from_fn_with_state(
            state.tokens.clone(),
            middleware::admin_middleware,
        ));

    let api = Router::new()
        .merge(accounts::account_routes())
        .merge(users::user_routes())
        .merge(certifications::certification_routes())
        .merge(admin_routes)
        .with_state(state);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest(&format!("/{}", api_version.trim_matches('/')), api)
        .route("/health", get(health))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
