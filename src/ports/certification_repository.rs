//! Certification storage port.
//!
//! # Design
//!
//! - **No deletes**: certifications only change status
//! - **Pending uniqueness**: storage must reject a second pending request
//!   for the same user with `PendingCertificationExists`

use async_trait::async_trait;

use crate::domain::certification::{Certification, CertificationFilter, CertificationStatus};
use crate::domain::foundation::{CertificationId, DomainError, Page, Pagination, UserId};

#[async_trait]
pub trait CertificationRepository: Send + Sync {
    /// Persists a new certification.
    ///
    /// # Errors
    ///
    /// - `PendingCertificationExists` if the user already has a pending one
    /// - `DatabaseError` on persistence failure
    async fn create(&self, certification: &Certification) -> Result<(), DomainError>;

    /// Writes the status of an existing certification.
    ///
    /// # Errors
    ///
    /// - `CertificationNotFound` if it doesn't exist
    /// - `PendingCertificationExists` if reopening collides with another pending one
    async fn update(&self, certification: &Certification) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &CertificationId)
        -> Result<Option<Certification>, DomainError>;

    /// Lists certifications matching the filter, newest first.
    async fn list(
        &self,
        filter: &CertificationFilter,
        pagination: Pagination,
    ) -> Result<Page<Certification>, DomainError>;

    /// True if the user has any certification in `status`.
    async fn exists_with_status(
        &self,
        user_id: &UserId,
        status: CertificationStatus,
    ) -> Result<bool, DomainError>;
}
