//! HTTP handlers for the trainer certification workflow.

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAdmin;
use crate::adapters::http::page_selection;
use crate::adapters::http::state::AppState;
use crate::application::handlers::certification::{
    CreateCertificationCommand, GetCertificationsQuery, UpdateCertificationCommand,
};
use crate::domain::certification::{CertificationError, CertificationFilter, CertificationStatus};
use crate::domain::foundation::{CertificationId, UserId};

use super::dto::{
    CertificationsQuery, CreateCertificationRequest, UpdateCertificationQuery,
    UpdateCertificationResponse,
};

fn parse_status(raw: &str) -> Result<CertificationStatus, CertificationError> {
    raw.parse()
        .map_err(|_| CertificationError::invalid_status(raw))
}

/// POST /certifications - Request trainer certification
pub async fn create_certification(
    State(state): State<AppState>,
    Json(request): Json<CreateCertificationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .create_certification_handler()
        .handle(CreateCertificationCommand {
            user_id: UserId::new(request.user_id)?,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(result.certification)))
}

/// GET /certifications - List certifications with owner and video, newest first
pub async fn get_certifications(
    State(state): State<AppState>,
    Query(query): Query<CertificationsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = CertificationFilter {
        user_id: query.user_id.map(UserId::new).transpose()?,
        status: query.status.as_deref().map(parse_status).transpose()?,
    };

    let result = state
        .get_certifications_handler()
        .handle(GetCertificationsQuery {
            filter,
            pagination: page_selection(query.page, query.page_size),
        })
        .await?;
    Ok(Json(result.certifications))
}

/// PATCH /certifications/:certification_id?status= - Approve or deny (admin only)
pub async fn update_certification(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(certification_id): Path<String>,
    Query(query): Query<UpdateCertificationQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let certification_id: CertificationId = certification_id
        .parse()
        .map_err(|_| ApiError::bad_request("certification_id", "not a valid id"))?;
    let status = parse_status(&query.status)?;

    let result = state
        .update_certification_handler()
        .handle(UpdateCertificationCommand {
            certification_id,
            status,
        })
        .await?;

    tracing::info!(
        admin = %admin.sub,
        certification_id = %certification_id,
        status = %status,
        changed = result.changed,
        "Certification reviewed"
    );
    Ok(Json(UpdateCertificationResponse {
        certification: result.certification,
        changed: result.changed,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::state::test_support::{test_app, TestApp};
    use crate::domain::admin::AdminClaims;
    use crate::domain::foundation::{AdminId, Timestamp};
    use crate::domain::user::test_support;
    use crate::ports::UserRepository;
    use axum::response::Response;

    async fn app_with_user(id: &str) -> TestApp {
        let app = test_app();
        app.directory
            .create(&test_support::user(id, "runner"))
            .await
            .unwrap();
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

    async fn json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn create(app: &TestApp, user_id: &str) -> serde_json::Value {
        let response = create_certification(
            State(app.state.clone()),
            Json(CreateCertificationRequest {
                user_id: user_id.to_string(),
            }),
        )
        .await
        .unwrap()
        .into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
        json(response).await
    }

    #[tokio::test]
    async fn create_for_unknown_user_is_404() {
        let app = test_app();
        let result = create_certification(
            State(app.state),
            Json(CreateCertificationRequest {
                user_id: "ghost".to_string(),
            }),
        )
        .await;
        assert_eq!(status(result), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn second_pending_request_is_409() {
        let app = app_with_user("u1").await;
        create(&app, "u1").await;

        let result = create_certification(
            State(app.state),
            Json(CreateCertificationRequest {
                user_id: "u1".to_string(),
            }),
        )
        .await;
        assert_eq!(status(result), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn listing_filters_by_status() {
        let app = app_with_user("u1").await;
        create(&app, "u1").await;

        let pending = get_certifications(
            State(app.state.clone()),
            Query(CertificationsQuery {
                status: Some("pending".to_string()),
                ..Default::default()
            }),
        )
        .await
        .unwrap()
        .into_response();
        let page = json(pending).await;
        assert_eq!(page["total_rows"], 1);
        assert_eq!(page["items"][0]["user"]["id"], "u1");
        assert!(page["items"][0]["video_url"].is_string());

        let approved = get_certifications(
            State(app.state),
            Query(CertificationsQuery {
                status: Some("approved".to_string()),
                ..Default::default()
            }),
        )
        .await
        .unwrap()
        .into_response();
        assert_eq!(json(approved).await["total_rows"], 0);
    }

    #[tokio::test]
    async fn listing_with_unknown_status_is_400() {
        let app = test_app();
        let result = get_certifications(
            State(app.state),
            Query(CertificationsQuery {
                status: Some("maybe".to_string()),
                ..Default::default()
            }),
        )
        .await;
        assert_eq!(status(result), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn approval_marks_owner_as_trainer() {
        let app = app_with_user("u1").await;
        let created = create(&app, "u1").await;
        let id = created["id"].as_str().unwrap().to_string();

        let response = update_certification(
            State(app.state.clone()),
            admin(),
            Path(id.clone()),
            Query(UpdateCertificationQuery {
                status: "approved".to_string(),
            }),
        )
        .await
        .unwrap()
        .into_response();

        let body = json(response).await;
        assert_eq!(body["status"], "approved");
        assert_eq!(body["changed"], true);

        let owner = app
            .directory
            .find_by_id(&UserId::new("u1").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert!(owner.is_verified_trainer);
    }

    #[tokio::test]
    async fn malformed_certification_id_is_400() {
        let app = test_app();
        let result = update_certification(
            State(app.state),
            admin(),
            Path("not-a-uuid".to_string()),
            Query(UpdateCertificationQuery {
                status: "approved".to_string(),
            }),
        )
        .await;
        assert_eq!(status(result), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_certification_is_404() {
        let app = test_app();
        let result = update_certification(
            State(app.state),
            admin(),
            Path(CertificationId::new().to_string()),
            Query(UpdateCertificationQuery {
                status: "denied".to_string(),
            }),
        )
        .await;
        assert_eq!(status(result), StatusCode::NOT_FOUND);
    }
}
