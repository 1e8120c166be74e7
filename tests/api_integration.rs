//! Integration tests for the REST API over in-memory adapters.
//!
//! These tests drive the full router the binary serves:
//! 1. Signup, profile completion and phone verification
//! 2. Follow graph mutations and listings
//! 3. Certification review behind administrator tokens
//! 4. Account moderation

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use secrecy::SecretString;
use serde_json::{json, Value};
use tower::ServiceExt;

use fiufit_users::adapters::http::{router, AppState, HandlerSettings};
use fiufit_users::adapters::memory::{
    InMemoryAdminStore, InMemoryCertificationStore, InMemoryDirectory, InMemoryIdentityProvider,
    InMemoryVerificationPinStore, RecordingMessagingChannel, RecordingMetricsSink,
    RecordingNotificationSink,
};
use fiufit_users::adapters::security::{Argon2Hasher, JwtTokenIssuer};
use fiufit_users::domain::metrics::MetricEvent;

// =============================================================================
// Test Infrastructure
// =============================================================================

struct TestServer {
    app: Router,
    identity: Arc<InMemoryIdentityProvider>,
    messaging: Arc<RecordingMessagingChannel>,
    metrics: Arc<RecordingMetricsSink>,
    notifications: Arc<RecordingNotificationSink>,
}

impl TestServer {
    fn new() -> Self {
        let directory = Arc::new(InMemoryDirectory::new());
        let identity = Arc::new(InMemoryIdentityProvider::new("https://media.fiufit.test"));
        let messaging = Arc::new(RecordingMessagingChannel::new());
        let metrics = Arc::new(RecordingMetricsSink::new());
        let notifications = Arc::new(RecordingNotificationSink::new());

        let state = AppState {
            users: directory.clone(),
            follows: directory,
            certifications: Arc::new(InMemoryCertificationStore::new()),
            pins: Arc::new(InMemoryVerificationPinStore::new()),
            admins: Arc::new(InMemoryAdminStore::new()),
            identity: identity.clone(),
            notifications: notifications.clone(),
            metrics: metrics.clone(),
            messaging: messaging.clone(),
            hasher: Arc::new(Argon2Hasher::new()),
            tokens: Arc::new(JwtTokenIssuer::new(&SecretString::new(
                "integration-signing-key-0123456789abcdef".to_string(),
            ))),
            settings: HandlerSettings::default(),
        };

        Self {
            app: router(state, "v1", std::time::Duration::from_secs(10)),
            identity,
            messaging,
            metrics,
            notifications,
        }
    }

    async fn call(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    /// Registers and completes a profile, returning the new user id.
    async fn signup(&self, email: &str, nickname: &str, latitude: f64) -> String {
        let (status, body) = self
            .call(
                Method::POST,
                "/v1/users/register",
                Some(json!({"email": email, "password": "hunter22"})),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        let user_id = body["user_id"].as_str().unwrap().to_string();

        let (status, _) = self
            .call(
                Method::POST,
                &format!("/v1/users/{}/finish-register", user_id),
                Some(json!({
                    "nickname": nickname,
                    "display_name": nickname.to_uppercase(),
                    "is_male": false,
                    "birth_date": "1995-06-15T00:00:00Z",
                    "height": 168,
                    "weight": 61,
                    "latitude": latitude,
                    "longitude": -58.38,
                    "interests": ["lose weight"]
                })),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        user_id
    }

    /// Registers an administrator and returns a bearer token.
    async fn admin_token(&self) -> String {
        let credentials = json!({"email": "admin@fiufit.com", "password": "s3cret-pass"});
        let (status, _) = self
            .call(
                Method::POST,
                "/v1/admin/register",
                Some(credentials.clone()),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = self
            .call(Method::POST, "/v1/admin/login", Some(credentials), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }
}

// =============================================================================
// Accounts
// =============================================================================

#[tokio::test]
async fn signup_and_phone_verification() {
    let server = TestServer::new();
    let user_id = server.signup("runner@fiufit.com", "runner", -34.60).await;

    let (status, user) = server
        .call(Method::GET, &format!("/v1/users/{}", user_id), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["nickname"], "runner");
    assert_eq!(user["is_verified_trainer"], false);
    assert!(user["picture_url"]
        .as_str()
        .unwrap()
        .starts_with("https://media.fiufit.test/"));

    let phone = "+5491155550000";
    let (status, body) = server
        .call(
            Method::POST,
            &format!("/v1/users/{}/verification/pin", user_id),
            Some(json!({"phone_number": phone})),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["expires_at"].is_string());

    let pin = server.messaging.last_pin_for(phone).unwrap();
    let verify_uri = format!("/v1/users/{}/verification/verify", user_id);
    let (status, body) = server
        .call(
            Method::POST,
            &verify_uri,
            Some(json!({"pin": pin.to_string()})),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["verified"], true);

    // Pins are single-use.
    let (status, _) = server
        .call(
            Method::POST,
            &verify_uri,
            Some(json!({"pin": pin.to_string()})),
            None,
        )
        .await;
    assert_ne!(status, StatusCode::OK);

    assert!(server.metrics.events().contains(&MetricEvent::Register));
}

#[tokio::test]
async fn nickname_lookup_and_conflicts() {
    let server = TestServer::new();
    let user_id = server.signup("runner@fiufit.com", "runner", -34.60).await;

    let (status, user) = server
        .call(Method::GET, "/v1/users?nickname=runner", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["id"], user_id.as_str());

    let (status, body) = server
        .call(
            Method::PATCH,
            &format!("/v1/users/{}", user_id),
            Some(json!({"latitude": 10.0})),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "VALIDATION_FAILED");

    let other = server.signup("swimmer@fiufit.com", "swimmer", -34.61).await;
    let (status, _) = server
        .call(
            Method::PATCH,
            &format!("/v1/users/{}", other),
            Some(json!({"nickname": "runner"})),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let server = TestServer::new();
    let (status, body) = server
        .call(Method::GET, "/v1/users/nobody", None, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].is_string());
}

// =============================================================================
// Follow Graph
// =============================================================================

#[tokio::test]
async fn follow_list_and_unfollow() {
    let server = TestServer::new();
    let alice = server.signup("alice@fiufit.com", "alice", -34.60).await;
    let bob = server.signup("bob@fiufit.com", "bob", -34.61).await;

    let follow_uri = format!("/v1/users/{}/followers?follower_id={}", bob, alice);
    let (status, body) = server.call(Method::POST, &follow_uri, None, None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["created"], true);

    // Repeating the follow is a no-op with no second notification.
    let (status, body) = server.call(Method::POST, &follow_uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["created"], false);
    assert_eq!(server.notifications.sent().len(), 1);

    let (status, page) = server
        .call(Method::GET, &format!("/v1/users/{}/followers", bob), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total_rows"], 1);
    assert_eq!(page["items"][0]["id"], alice.as_str());

    let (_, page) = server
        .call(Method::GET, &format!("/v1/users/{}/followed", alice), None, None)
        .await;
    assert_eq!(page["items"][0]["id"], bob.as_str());

    let (status, body) = server
        .call(
            Method::DELETE,
            &format!("/v1/users/{}/followers/{}", bob, alice),
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["removed"], true);

    let (_, page) = server
        .call(Method::GET, &format!("/v1/users/{}/followers", bob), None, None)
        .await;
    assert_eq!(page["total_rows"], 0);
}

#[tokio::test]
async fn self_follow_is_rejected() {
    let server = TestServer::new();
    let alice = server.signup("alice@fiufit.com", "alice", -34.60).await;

    let (status, _) = server
        .call(
            Method::POST,
            &format!("/v1/users/{}/followers?follower_id={}", alice, alice),
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn closest_users_excludes_the_caller() {
    let server = TestServer::new();
    let alice = server.signup("alice@fiufit.com", "alice", -34.600).await;
    let bob = server.signup("bob@fiufit.com", "bob", -34.605).await;
    server.signup("far@fiufit.com", "faraway", 10.0).await;

    let (status, page) = server
        .call(
            Method::GET,
            &format!("/v1/users/{}/closest?km=5", alice),
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total_rows"], 1);
    assert_eq!(page["items"][0]["id"], bob.as_str());
}

// =============================================================================
// Certifications
// =============================================================================

#[tokio::test]
async fn approved_certification_makes_a_trainer() {
    let server = TestServer::new();
    let user_id = server.signup("coach@fiufit.com", "coach", -34.60).await;

    let (status, certification) = server
        .call(
            Method::POST,
            "/v1/certifications",
            Some(json!({"user_id": user_id})),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(certification["status"], "pending");
    let review_uri = format!(
        "/v1/certifications/{}?status=approved",
        certification["id"].as_str().unwrap()
    );

    let (status, _) = server.call(Method::PATCH, &review_uri, None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = server.admin_token().await;
    let (status, reviewed) = server
        .call(Method::PATCH, &review_uri, None, Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reviewed["status"], "approved");
    assert_eq!(reviewed["changed"], true);

    let (_, user) = server
        .call(Method::GET, &format!("/v1/users/{}", user_id), None, None)
        .await;
    assert_eq!(user["is_verified_trainer"], true);

    // Re-approving changes nothing.
    let (status, reviewed) = server
        .call(Method::PATCH, &review_uri, None, Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reviewed["changed"], false);

    let (_, page) = server
        .call(
            Method::GET,
            &format!("/v1/certifications?user_id={}&status=approved", user_id),
            None,
            None,
        )
        .await;
    assert_eq!(page["total_rows"], 1);
    assert_eq!(page["items"][0]["user"]["nickname"], "coach");
}

#[tokio::test]
async fn approved_certification_cannot_be_denied() {
    let server = TestServer::new();
    let user_id = server.signup("coach@fiufit.com", "coach", -34.60).await;
    let token = server.admin_token().await;

    let (_, certification) = server
        .call(
            Method::POST,
            "/v1/certifications",
            Some(json!({"user_id": user_id})),
            None,
        )
        .await;
    let id = certification["id"].as_str().unwrap().to_string();

    let (status, _) = server
        .call(
            Method::PATCH,
            &format!("/v1/certifications/{}?status=approved", id),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = server
        .call(
            Method::PATCH,
            &format!("/v1/certifications/{}?status=denied", id),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

// =============================================================================
// Moderation
// =============================================================================

#[tokio::test]
async fn admin_disables_and_enables_a_user() {
    let server = TestServer::new();
    let user_id = server.signup("runner@fiufit.com", "runner", -34.60).await;
    let token = server.admin_token().await;

    let disable_uri = format!("/v1/users/{}/disable", user_id);
    let (status, _) = server.call(Method::POST, &disable_uri, None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = server
        .call(Method::POST, &disable_uri, None, Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["disabled"], true);
    assert!(server.metrics.events().contains(&MetricEvent::Blocked));

    let (status, _) = server
        .call(Method::POST, &disable_uri, None, Some(&token))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = server
        .call(
            Method::POST,
            &format!("/v1/users/{}/enable", user_id),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["disabled"], false);
}

#[tokio::test]
async fn deleted_user_loses_login() {
    let server = TestServer::new();
    let user_id = server.signup("runner@fiufit.com", "runner", -34.60).await;
    let id = fiufit_users::domain::foundation::UserId::new(user_id.clone()).unwrap();
    assert!(server.identity.has_login(&id).await);

    let (status, _) = server
        .call(Method::DELETE, &format!("/v1/users/{}", user_id), None, None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(!server.identity.has_login(&id).await);

    let (status, _) = server
        .call(Method::GET, &format!("/v1/users/{}", user_id), None, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
