//! Best-effort side effects.
//!
//! Notifications, metrics and storage URL lookups never decide the outcome
//! of a use case. They are awaited inline under a deadline and any failure
//! is logged at `warn`.

use std::future::Future;
use std::time::Duration;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::metrics::MetricEvent;
use crate::ports::{IdentityProvider, MetricsSink};

/// Deadline applied to each best-effort call unless configured otherwise.
pub const DEFAULT_SIDE_EFFECT_TIMEOUT: Duration = Duration::from_secs(2);

/// Awaits `effect`, logging instead of returning any failure or timeout.
pub(crate) async fn best_effort<F>(timeout: Duration, operation: &'static str, effect: F)
where
    F: Future<Output = Result<(), DomainError>>,
{
    match tokio::time::timeout(timeout, effect).await {
        Ok(Ok(())) => {}
        Ok(Err(error)) => {
            tracing::warn!(operation, error = %error, "Side effect failed");
        }
        Err(_) => {
            tracing::warn!(
                operation,
                timeout_ms = timeout.as_millis() as u64,
                "Side effect timed out"
            );
        }
    }
}

/// Emits a metric, dropping it if the sink does not answer in time.
pub(crate) async fn emit_metric(sink: &dyn MetricsSink, timeout: Duration, event: MetricEvent) {
    let metric_type = event.metric_type();
    if tokio::time::timeout(timeout, sink.emit(event)).await.is_err() {
        tracing::warn!(metric_type, "Metric emission timed out");
    }
}

/// Resolves a storage URL, returning `None` when the lookup fails.
pub(crate) async fn lookup_url<F>(timeout: Duration, user_id: &UserId, lookup: F) -> Option<String>
where
    F: Future<Output = Result<String, DomainError>>,
{
    match tokio::time::timeout(timeout, lookup).await {
        Ok(Ok(url)) => Some(url),
        Ok(Err(error)) => {
            tracing::warn!(user_id = %user_id, error = %error, "Storage URL lookup failed");
            None
        }
        Err(_) => {
            tracing::warn!(user_id = %user_id, "Storage URL lookup timed out");
            None
        }
    }
}

/// Profile picture URL for a user, if the identity provider answers.
pub(crate) async fn picture_url(
    identity: &dyn IdentityProvider,
    timeout: Duration,
    user_id: &UserId,
) -> Option<String> {
    lookup_url(timeout, user_id, identity.get_user_picture_url(user_id)).await
}
