//! HTTP handlers for the user directory and follow graph.

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAdmin;
use crate::adapters::http::page_selection;
use crate::adapters::http::state::AppState;
use crate::application::handlers::certification::ReconcileTrainerFlagCommand;
use crate::application::handlers::user::{
    DeleteUserCommand, FollowDirection, FollowUserCommand, GetClosestUsersQuery, GetUserQuery,
    ListFollowsQuery, SearchUsersQuery, SetUserAccessCommand, UnfollowUserCommand,
    UpdateUserCommand,
};
use crate::domain::foundation::UserId;
use crate::domain::user::{UserError, UserPatch};
use crate::ports::UserSearch;

use super::dto::{
    ClosestQuery, FollowQuery, FollowResponse, PageQuery, ReconcileResponse, UnfollowResponse,
    UpdateUserRequest, UserResponse, UsersQuery,
};

// ════════════════════════════════════════════════════════════════════════════════
// Directory Queries
// ════════════════════════════════════════════════════════════════════════════════

/// GET /users - Search the directory, or look up one user by `nickname`
pub async fn get_users(
    State(state): State<AppState>,
    Query(query): Query<UsersQuery>,
) -> Result<Response, ApiError> {
    if let Some(nickname) = query.nickname.filter(|n| !n.trim().is_empty()) {
        let result = state
            .get_user_handler()
            .handle(GetUserQuery::ByNickname(nickname))
            .await?;
        return Ok(Json(result.user).into_response());
    }

    let result = state
        .search_users_handler()
        .handle(SearchUsersQuery {
            filter: UserSearch {
                name: query.name,
                is_verified: query.is_verified,
                disabled: query.disabled,
            },
            pagination: page_selection(query.page, query.page_size),
        })
        .await?;

    Ok(Json(result.users).into_response())
}

/// GET /users/:user_id - Fetch one profile
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .get_user_handler()
        .handle(GetUserQuery::ById(UserId::new(user_id)?))
        .await?;
    Ok(Json(result.user))
}

/// GET /users/:user_id/closest?km= - Users near the caller, nearest first
pub async fn get_closest_users(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<ClosestQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .closest_users_handler()
        .handle(GetClosestUsersQuery {
            user_id: UserId::new(user_id)?,
            radius_km: query.km,
            pagination: page_selection(query.page, query.page_size),
        })
        .await?;
    Ok(Json(result.users))
}

// ════════════════════════════════════════════════════════════════════════════════
// Directory Commands
// ════════════════════════════════════════════════════════════════════════════════

/// PATCH /users/:user_id - Partially update a profile
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let patch = UserPatch::try_from(request).map_err(UserError::from)?;
    let result = state
        .update_user_handler()
        .handle(UpdateUserCommand {
            user_id: UserId::new(user_id)?,
            patch,
        })
        .await?;
    Ok(Json(UserResponse { user: result.user }))
}

/// DELETE /users/:user_id - Remove the profile and its login
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .delete_user_handler()
        .handle(DeleteUserCommand {
            user_id: UserId::new(user_id)?,
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /users/:user_id/disable - Block a user (admin only)
pub async fn disable_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .disable_user_handler()
        .handle(SetUserAccessCommand {
            user_id: UserId::new(user_id)?,
        })
        .await?;
    tracing::info!(admin = %admin.sub, user_id = %result.user.id, "User disabled");
    Ok(Json(UserResponse { user: result.user }))
}

/// POST /users/:user_id/enable - Unblock a user (admin only)
pub async fn enable_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .enable_user_handler()
        .handle(SetUserAccessCommand {
            user_id: UserId::new(user_id)?,
        })
        .await?;
    tracing::info!(admin = %admin.sub, user_id = %result.user.id, "User enabled");
    Ok(Json(UserResponse { user: result.user }))
}

/// POST /users/:user_id/trainer-flag/reconcile - Repair the trainer flag (admin only)
pub async fn reconcile_trainer_flag(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .reconcile_trainer_flag_handler()
        .handle(ReconcileTrainerFlagCommand {
            user_id: UserId::new(user_id)?,
        })
        .await?;
    Ok(Json(ReconcileResponse {
        user: result.user,
        repaired: result.repaired,
    }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Follow Graph
// ════════════════════════════════════════════════════════════════════════════════

/// POST /users/:user_id/followers?follower_id= - `follower_id` starts following `user_id`
pub async fn follow_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<FollowQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .follow_user_handler()
        .handle(FollowUserCommand {
            followed_id: UserId::new(user_id)?,
            follower_id: UserId::new(query.follower_id)?,
        })
        .await?;

    let status = if result.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(FollowResponse {
        created: result.created,
    })))
}

/// DELETE /users/:user_id/followers/:follower_id - Remove a follow edge
pub async fn unfollow_user(
    State(state): State<AppState>,
    Path((user_id, follower_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .unfollow_user_handler()
        .handle(UnfollowUserCommand {
            followed_id: UserId::new(user_id)?,
            follower_id: UserId::new(follower_id)?,
        })
        .await?;
    Ok(Json(UnfollowResponse {
        removed: result.removed,
    }))
}

/// GET /users/:user_id/followers - Users following `user_id`
pub async fn get_followers(
    state: State<AppState>,
    user_id: Path<String>,
    query: Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    list_follows(state, user_id, query, FollowDirection::Followers).await
}

/// GET /users/:user_id/followed - Users `user_id` follows
pub async fn get_followed(
    state: State<AppState>,
    user_id: Path<String>,
    query: Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    list_follows(state, user_id, query, FollowDirection::Followed).await
}

async fn list_follows(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<PageQuery>,
    direction: FollowDirection,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .list_follows_handler()
        .handle(ListFollowsQuery {
            user_id: UserId::new(user_id)?,
            direction,
            pagination: page_selection(query.page, query.page_size),
        })
        .await?;
    Ok(Json(result.users))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::state::test_support::{test_app, TestApp};
    use crate::domain::admin::AdminClaims;
    use crate::domain::foundation::{AdminId, Page, Timestamp};
    use crate::domain::metrics::MetricEvent;
    use crate::domain::user::{test_support, PublicProfile};
    use crate::ports::UserRepository;

    async fn app_with_users(ids: &[(&str, &str)]) -> TestApp {
        let app = test_app();
        for (id, nickname) in ids {
            app.directory
                .create(&test_support::user(id, nickname))
                .await
                .unwrap();
        }
        app
    }

    fn admin() -> RequireAdmin {
        RequireAdmin(AdminClaims::new(AdminId::new(), Timestamp::now(), 1))
    }

    fn status(result: Result<impl IntoResponse, ApiError>) -> StatusCode {
        match result {
            Ok(ok) => ok.into_response().status(),
            Err(err) => err.into_response().status(),
        }
    }

    async fn body<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Directory Query Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn get_user_returns_404_for_unknown_id() {
        let app = test_app();
        let result = get_user(State(app.state), Path("ghost".to_string())).await;
        assert_eq!(status(result), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn nickname_lookup_ignores_other_filters() {
        let app = app_with_users(&[("u1", "runner"), ("u2", "sprinter")]).await;

        let response = get_users(
            State(app.state),
            Query(UsersQuery {
                nickname: Some("sprinter".to_string()),
                name: Some("runner".to_string()),
                ..Default::default()
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let user: serde_json::Value = body(response).await;
        assert_eq!(user["id"], "u2");
        assert!(user["picture_url"].is_string());
    }

    #[tokio::test]
    async fn unknown_nickname_is_404() {
        let app = test_app();
        let result = get_users(
            State(app.state),
            Query(UsersQuery {
                nickname: Some("ghost".to_string()),
                ..Default::default()
            }),
        )
        .await;
        assert_eq!(status(result), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn search_pages_results() {
        let app = app_with_users(&[("u1", "runa"), ("u2", "runb"), ("u3", "runc")]).await;

        let response = get_users(
            State(app.state),
            Query(UsersQuery {
                name: Some("run".to_string()),
                page: Some(2),
                page_size: Some(2),
                ..Default::default()
            }),
        )
        .await
        .unwrap();

        let page: serde_json::Value = body(response).await;
        assert_eq!(page["total_rows"], 3);
        assert_eq!(page["items"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn closest_rejects_non_positive_radius() {
        let app = app_with_users(&[("u1", "runner")]).await;
        let result = get_closest_users(
            State(app.state),
            Path("u1".to_string()),
            Query(ClosestQuery {
                km: 0.0,
                page: None,
                page_size: None,
            }),
        )
        .await;
        assert_eq!(status(result), StatusCode::BAD_REQUEST);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Directory Command Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn update_with_taken_nickname_is_409() {
        let app = app_with_users(&[("u1", "runner"), ("u2", "sprinter")]).await;

        let result = update_user(
            State(app.state),
            Path("u1".to_string()),
            Json(UpdateUserRequest {
                nickname: Some("sprinter".to_string()),
                ..Default::default()
            }),
        )
        .await;

        assert_eq!(status(result), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn update_with_unknown_interest_is_400() {
        let app = app_with_users(&[("u1", "runner")]).await;

        let result = update_user(
            State(app.state),
            Path("u1".to_string()),
            Json(UpdateUserRequest {
                interests: Some(vec!["chess".to_string()]),
                ..Default::default()
            }),
        )
        .await;

        let err = result.err().unwrap();
        assert_eq!(err.code(), crate::domain::foundation::ErrorCode::InvalidInterest);
    }

    #[tokio::test]
    async fn delete_user_is_204_then_404() {
        let app = app_with_users(&[("u1", "runner")]).await;

        let first = delete_user(State(app.state.clone()), Path("u1".to_string())).await;
        assert_eq!(status(first), StatusCode::NO_CONTENT);

        let second = delete_user(State(app.state), Path("u1".to_string())).await;
        assert_eq!(status(second), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn disable_then_enable_round_trips_and_emits_blocked() {
        let app = app_with_users(&[("u1", "runner")]).await;

        let disabled =
            disable_user(State(app.state.clone()), admin(), Path("u1".to_string())).await;
        assert_eq!(status(disabled), StatusCode::OK);
        assert!(app.identity.is_disabled(&UserId::new("u1").unwrap()).await);
        assert!(app.metrics.events().contains(&MetricEvent::Blocked));

        let again = disable_user(State(app.state.clone()), admin(), Path("u1".to_string())).await;
        assert_eq!(status(again), StatusCode::CONFLICT);

        let enabled = enable_user(State(app.state), admin(), Path("u1".to_string())).await;
        assert_eq!(status(enabled), StatusCode::OK);
    }

    #[tokio::test]
    async fn reconcile_without_approved_certification_repairs_nothing() {
        let app = app_with_users(&[("u1", "runner")]).await;

        let response = reconcile_trainer_flag(State(app.state), admin(), Path("u1".to_string()))
            .await
            .unwrap()
            .into_response();

        let body: serde_json::Value = body(response).await;
        assert_eq!(body["repaired"], false);
        assert_eq!(body["user"]["is_verified_trainer"], false);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Follow Graph Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn follow_is_201_then_200_on_repeat() {
        let app = app_with_users(&[("u1", "runner"), ("u2", "sprinter")]).await;
        let follow = |state: AppState| {
            follow_user(
                State(state),
                Path("u1".to_string()),
                Query(FollowQuery {
                    follower_id: "u2".to_string(),
                }),
            )
        };

        assert_eq!(status(follow(app.state.clone()).await), StatusCode::CREATED);
        assert_eq!(status(follow(app.state.clone()).await), StatusCode::OK);
    }

    #[tokio::test]
    async fn self_follow_is_400() {
        let app = app_with_users(&[("u1", "runner")]).await;
        let result = follow_user(
            State(app.state),
            Path("u1".to_string()),
            Query(FollowQuery {
                follower_id: "u1".to_string(),
            }),
        )
        .await;
        assert_eq!(status(result), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn followers_and_followed_are_listed() {
        let app = app_with_users(&[("u1", "runner"), ("u2", "sprinter")]).await;
        follow_user(
            State(app.state.clone()),
            Path("u1".to_string()),
            Query(FollowQuery {
                follower_id: "u2".to_string(),
            }),
        )
        .await
        .unwrap();

        let followers = get_followers(
            State(app.state.clone()),
            Path("u1".to_string()),
            Query(PageQuery::default()),
        )
        .await
        .unwrap()
        .into_response();
        let followers: Page<PublicProfile> = body(followers).await;
        assert_eq!(followers.items.len(), 1);
        assert_eq!(followers.items[0].id.as_str(), "u2");

        let followed = get_followed(
            State(app.state),
            Path("u2".to_string()),
            Query(PageQuery::default()),
        )
        .await
        .unwrap()
        .into_response();
        let followed: Page<PublicProfile> = body(followed).await;
        assert_eq!(followed.items[0].id.as_str(), "u1");
    }

    #[tokio::test]
    async fn unfollow_missing_edge_reports_not_removed() {
        let app = app_with_users(&[("u1", "runner"), ("u2", "sprinter")]).await;

        let response = unfollow_user(
            State(app.state),
            Path(("u1".to_string(), "u2".to_string())),
        )
        .await
        .unwrap()
        .into_response();

        let body: UnfollowResponse = body(response).await;
        assert!(!body.removed);
    }
}
