//! Verification pin storage port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::verification::VerificationPin;

/// One pin record per user.
#[async_trait]
pub trait VerificationPinRepository: Send + Sync {
    /// Inserts the pin, replacing any existing record for the same user.
    async fn upsert(&self, pin: &VerificationPin) -> Result<(), DomainError>;

    async fn find_by_user(&self, user_id: &UserId)
        -> Result<Option<VerificationPin>, DomainError>;

    /// Removes the user's pin. Missing records are not an error.
    async fn delete(&self, user_id: &UserId) -> Result<(), DomainError>;
}
