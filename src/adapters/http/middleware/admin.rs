//! Administrator authentication middleware and extractor.
//!
//! Back-office routes (certification review, blocking users) sit behind
//! [`admin_middleware`]. It validates the bearer token issued by admin login
//! through the `TokenIssuer` port and stores the claims in the request
//! extensions, where [`RequireAdmin`] picks them up.
//!
//! ```text
//! Request → admin_middleware → injects AdminClaims into extensions
//!                                      ↓
//!                              Handler → RequireAdmin extractor reads from extensions
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::admin::AdminClaims;
use crate::ports::TokenIssuer;

/// Middleware state - the token issuer used to validate bearer tokens.
pub type AdminAuthState = Arc<dyn TokenIssuer>;

/// Rejects the request unless it carries a valid administrator token.
///
/// Expects `Authorization: Bearer <token>`.
pub async fn admin_middleware(
    State(tokens): State<AdminAuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    let Some(token) = token else {
        return AdminRejection::Unauthenticated.into_response();
    };

    match tokens.decode(token) {
        Ok(claims) if claims.is_admin => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Ok(claims) => {
            tracing::warn!(sub = %claims.sub, "Token without admin role rejected");
            AdminRejection::InvalidToken.into_response()
        }
        Err(error) => {
            tracing::debug!(error = %error, "Admin token rejected");
            AdminRejection::InvalidToken.into_response()
        }
    }
}

/// Extractor for handlers that only administrators may call.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AdminClaims);

impl<S> axum::extract::FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AdminRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<AdminClaims>()
                .cloned()
                .map(RequireAdmin)
                .ok_or(AdminRejection::Unauthenticated)
        })
    }
}

/// Rejection type for administrator authentication failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminRejection {
    /// No bearer token was provided.
    Unauthenticated,
    /// The token is malformed, expired or not an admin token.
    InvalidToken,
}

impl IntoResponse for AdminRejection {
    fn into_response(self) -> Response {
        let (message, code) = match self {
            AdminRejection::Unauthenticated => ("Authentication required", "UNAUTHENTICATED"),
            AdminRejection::InvalidToken => ("Invalid token", "INVALID_TOKEN"),
        };

        (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({
                "error_code": code,
                "message": message
            })),
        )
            .into_response()
    }
}
