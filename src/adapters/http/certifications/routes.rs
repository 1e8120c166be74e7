//! Axum router configuration for certification endpoints.

use axum::{
    routing::{get, patch},
    Router,
};

use crate::adapters::http::state::AppState;

use super::handlers::{create_certification, get_certifications, update_certification};

/// Create the certification API router.
///
/// # Routes
/// - `POST /certifications` - Request certification
/// - `GET /certifications` - List certifications (`user_id`, `status`, paging)
pub fn certification_routes() -> Router<AppState> {
    Router::new().route(
        "/certifications",
        get(get_certifications).post(create_certification),
    )
}

/// Create the admin-only certification router.
///
/// Must be mounted behind `admin_middleware`.
///
/// # Routes
/// - `PATCH /certifications/:certification_id?status=` - Approve or deny
pub fn certification_admin_routes() -> Router<AppState> {
    Router::new().route(
        "/certifications/:certification_id",
        patch(update_certification),
    )
}
