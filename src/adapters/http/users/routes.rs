//! Axum router configuration for user directory and follow graph endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::adapters::http::state::AppState;

use super::handlers::{
    delete_user, disable_user, enable_user, follow_user, get_closest_users, get_followed,
    get_followers, get_user, get_users, reconcile_trainer_flag, unfollow_user, update_user,
};

/// Create the user API router.
///
/// # Routes
///
/// ## Directory
/// - `GET /users` - Search users, or fetch one by `?nickname=`
/// - `GET /users/:user_id` - Fetch one user
/// - `PATCH /users/:user_id` - Update a profile
/// - `DELETE /users/:user_id` - Delete a user
/// - `GET /users/:user_id/closest?km=` - Nearby users
///
/// ## Follow graph
/// - `POST /users/:user_id/followers?follower_id=` - Follow
/// - `DELETE /users/:user_id/followers/:follower_id` - Unfollow
/// - `GET /users/:user_id/followers` - List followers
/// - `GET /users/:user_id/followed` - List followed users
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(get_users))
        .route(
            "/users/:user_id",
            get(get_user).patch(update_user).delete(delete_user),
        )
        .route("/users/:user_id/closest", get(get_closest_users))
        .route(
            "/users/:user_id/followers",
            get(get_followers).post(follow_user),
        )
        .route(
            "/users/:user_id/followers/:follower_id",
            delete(unfollow_user),
        )
        .route("/users/:user_id/followed", get(get_followed))
}

/// Create the admin-only user router.
///
/// Must be mounted behind `admin_middleware`.
///
/// # Routes
/// - `POST /users/:user_id/disable` - Block a user
/// - `POST /users/:user_id/enable` - Unblock a user
/// - `POST /users/:user_id/trainer-flag/reconcile` - Repair the trainer flag
pub fn user_admin_routes() -> Router<AppState> {
    Router::new()
        .route("/users/:user_id/disable", post(disable_user))
        .route("/users/:user_id/enable", post(enable_user))
        .route(
            "/users/:user_id/trainer-flag/reconcile",
            post(reconcile_trainer_flag),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::state::test_support::test_app;

    #[test]
    fn user_routes_creates_router() {
        let _: Router<()> = user_routes().with_state(test_app().state);
    }

    #[test]
    fn user_admin_routes_creates_router() {
        let _: Router<()> = user_admin_routes().with_state(test_app().state);
    }
}
