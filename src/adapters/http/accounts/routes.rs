//! Axum router configuration for account endpoints.

use axum::{routing::post, Router};

use crate::adapters::http::state::AppState;

use super::handlers::{
    admin_login, admin_register, finish_register, notify_login, notify_password_recover,
    register, send_verification_pin, verify_pin,
};

/// Create the account API router.
///
/// # Routes
///
/// ## Signup and verification
/// - `POST /users/register` - Create a login
/// - `POST /users/:user_id/finish-register` - Create the directory profile
/// - `POST /users/:user_id/verification/pin` - Send a verification pin
/// - `POST /users/:user_id/verification/verify` - Check a verification pin
///
/// ## Metrics notifications
/// - `POST /users/login?method=` - Record a login
/// - `POST /users/password-recover` - Record a password recovery
///
/// ## Administrators
/// - `POST /admin/register` - Create an administrator
/// - `POST /admin/login` - Obtain an admin bearer token
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/users/register", post(register))
        .route("/users/:user_id/finish-register", post(finish_register))
        .route("/users/:user_id/verification/pin", post(send_verification_pin))
        .route("/users/:user_id/verification/verify", post(verify_pin))
        .route("/users/login", post(notify_login))
        .route("/users/password-recover", post(notify_password_recover))
        .route("/admin/register", post(admin_register))
        .route("/admin/login", post(admin_login))
}
