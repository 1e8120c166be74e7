//! Error responses shared by every HTTP endpoint.
//!
//! Module errors all expose a stable [`ErrorCode`] and a message. The status
//! is picked from the code's [`ErrorKind`]:
//!
//! | Kind | HTTP Status |
//! |------|-------------|
//! | Validation | 400 |
//! | InvalidCredential | 401 |
//! | NotFound | 404 |
//! | Conflict | 409 |
//! | Internal | 500 |
//!
//! Internal failures are logged here and answered with a generic message so
//! storage and collaborator details never reach the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::domain::admin::AdminError;
use crate::domain::certification::CertificationError;
use crate::domain::foundation::{ErrorCode, ErrorKind, ValidationError};
use crate::domain::user::UserError;
use crate::domain::verification::VerificationError;

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
        }
    }
}

/// An error on its way out as an HTTP response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// A malformed path or query value.
    pub fn bad_request(field: &str, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ValidationFailed,
            format!("Validation failed for '{}': {}", field, message.into()),
        )
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn status(&self) -> StatusCode {
        status_for(self.code.kind())
    }
}

/// HTTP status for an error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::InvalidCredential => StatusCode::UNAUTHORIZED,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if self.code.kind() == ErrorKind::Internal {
            tracing::error!(error_code = %self.code, error = %self.message, "Request failed");
            "Internal server error".to_string()
        } else {
            self.message
        };
        let body = ErrorResponse::new(self.code.to_string(), message);
        (status, Json(body)).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        Self::new(err.code(), err.message())
    }
}

impl From<CertificationError> for ApiError {
    fn from(err: CertificationError) -> Self {
        Self::new(err.code(), err.message())
    }
}

impl From<VerificationError> for ApiError {
    fn from(err: VerificationError) -> Self {
        Self::new(err.code(), err.message())
    }
}

impl From<AdminError> for ApiError {
    fn from(err: AdminError) -> Self {
        Self::new(err.code(), err.message())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::new(ErrorCode::ValidationFailed, err.to_string())
    }
}
