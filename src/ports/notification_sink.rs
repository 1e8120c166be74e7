//! Push notification port.
//!
//! Callers treat every call as best-effort: a failure is logged and the
//! surrounding operation still succeeds.

use async_trait::async_trait;

use crate::domain::certification::CertificationStatus;
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::User;

#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Tells `followed` that `follower` started following them.
    async fn send_follow_notification(
        &self,
        follower: &User,
        followed: &User,
    ) -> Result<(), DomainError>;

    /// Tells the owner a reviewer approved or denied their certification.
    async fn send_certification_outcome_notification(
        &self,
        user_id: &UserId,
        status: CertificationStatus,
    ) -> Result<(), DomainError>;
}
