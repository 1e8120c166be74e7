//! HTTP handlers for signup, phone verification, login metrics and admin access.

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::state::AppState;
use crate::application::handlers::account::{
    AdminLoginCommand, AdminRegisterCommand, FinishRegisterCommand, NotifyLoginCommand,
    RegisterCommand, SendVerificationPinCommand, VerifyPinCommand,
};
use crate::domain::foundation::{Timestamp, UserId};

use super::dto::{
    AdminLoginResponse, AdminResponse, CredentialsRequest, FinishRegisterRequest, LoginQuery,
    PinSentResponse, RegisterResponse, SendPinRequest, UserResponse, VerifiedResponse,
    VerifyPinRequest,
};

// ════════════════════════════════════════════════════════════════════════════════
// Signup
// ════════════════════════════════════════════════════════════════════════════════

/// POST /users/register - Create a login with the identity provider
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .register_handler()
        .handle(RegisterCommand {
            email: request.email,
            password: request.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user_id: result.user_id.to_string(),
        }),
    ))
}

/// POST /users/:user_id/finish-register - Create the directory profile
pub async fn finish_register(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<FinishRegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = FinishRegisterCommand {
        user_id: UserId::new(user_id)?,
        nickname: request.nickname,
        display_name: request.display_name,
        is_male: request.is_male,
        born_at: Timestamp::from_datetime(request.birth_date),
        height: request.height,
        weight: request.weight,
        latitude: request.latitude,
        longitude: request.longitude,
        interests: request.interests,
    };

    let result = state.finish_register_handler().handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(UserResponse { user: result.user })))
}

// ════════════════════════════════════════════════════════════════════════════════
// Phone Verification
// ════════════════════════════════════════════════════════════════════════════════

/// POST /users/:user_id/verification/pin - Send a fresh pin to the phone
pub async fn send_verification_pin(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<SendPinRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .send_verification_pin_handler()
        .handle(SendVerificationPinCommand {
            user_id: UserId::new(user_id)?,
            phone_number: request.phone_number,
        })
        .await?;

    Ok(Json(PinSentResponse {
        expires_at: result.pin.expires_at,
    }))
}

/// POST /users/:user_id/verification/verify - Check a pin and mark the user verified
pub async fn verify_pin(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<VerifyPinRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .verify_pin_handler()
        .handle(VerifyPinCommand {
            user_id: UserId::new(user_id)?,
            pin: request.pin.into_string(),
        })
        .await?;

    Ok(Json(VerifiedResponse { verified: true }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Login Metrics
// ════════════════════════════════════════════════════════════════════════════════

/// POST /users/login?method= - Record a login for the metrics service
pub async fn notify_login(
    State(state): State<AppState>,
    Query(query): Query<LoginQuery>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .notify_login_handler()
        .handle(NotifyLoginCommand {
            method: query.method,
        })
        .await?;
    Ok(StatusCode::OK)
}

/// POST /users/password-recover - Record a password recovery request
pub async fn notify_password_recover(State(state): State<AppState>) -> impl IntoResponse {
    state.notify_password_recover_handler().handle().await;
    StatusCode::OK
}

// ════════════════════════════════════════════════════════════════════════════════
// Administrators
// ════════════════════════════════════════════════════════════════════════════════

/// POST /admin/register - Create an administrator account
pub async fn admin_register(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .admin_register_handler()
        .handle(AdminRegisterCommand {
            email: request.email,
            password: request.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(AdminResponse::from(result.admin))))
}

/// POST /admin/login - Exchange admin credentials for a bearer token
pub async fn admin_login(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .admin_login_handler()
        .handle(AdminLoginCommand {
            email: request.email,
            password: request.password,
        })
        .await?;

    Ok(Json(AdminLoginResponse {
        token: result.token,
        expires_at: result.claims.exp,
    }))
}
