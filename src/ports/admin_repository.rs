//! Administrator storage port.

use async_trait::async_trait;

use crate::domain::admin::Administrator;
use crate::domain::foundation::DomainError;

#[async_trait]
pub trait AdminRepository: Send + Sync {
    /// Persists a new administrator.
    ///
    /// # Errors
    ///
    /// - `AdminAlreadyExists` if the email is registered
    async fn create(&self, admin: &Administrator) -> Result<(), DomainError>;

    /// Looks up an administrator by normalized email.
    async fn find_by_email(&self, email: &str) -> Result<Option<Administrator>, DomainError>;
}
