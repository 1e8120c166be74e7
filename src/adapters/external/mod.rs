//! HTTP clients for the remote collaborators.
//!
//! - `HttpIdentityProvider` - accounts service plus the media bucket
//! - `HttpNotificationSink` - push notification service
//! - `HttpMetricsSink` - business metrics service
//! - `TwilioWhatsAppChannel` - verification pin delivery

mod identity_client;
mod metrics_client;
mod notification_client;
mod twilio;

pub use identity_client::{HttpIdentityProvider, IdentityClientConfig};
pub use metrics_client::HttpMetricsSink;
pub use notification_client::HttpNotificationSink;
pub use twilio::{TwilioConfig, TwilioWhatsAppChannel};

use crate::domain::foundation::DomainError;

fn network_error(service: &str, e: reqwest::Error) -> DomainError {
    DomainError::external(service, format!("request failed: {}", e))
}

/// Turns a non-2xx response into an external-service error carrying the body.
async fn ensure_success(
    service: &str,
    response: reqwest::Response,
) -> Result<reqwest::Response, DomainError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    tracing::error!(service, status = status.as_u16(), body = %body, "Remote call failed");
    Err(DomainError::external(
        service,
        format!("HTTP {}: {}", status.as_u16(), body),
    ))
}
