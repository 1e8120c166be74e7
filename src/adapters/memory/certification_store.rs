//! In-memory certification store.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::certification::{Certification, CertificationFilter, CertificationStatus};
use crate::domain::foundation::{CertificationId, DomainError, ErrorCode, Page, Pagination, UserId};
use crate::ports::CertificationRepository;

/// In-memory `CertificationRepository`.
///
/// Rejects a second pending certification per user the same way the
/// partial unique index does in Postgres.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCertificationStore {
    certifications: Arc<RwLock<Vec<Certification>>>,
}

impl InMemoryCertificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn pending_conflict(
        all: &[Certification],
        certification: &Certification,
    ) -> Option<DomainError> {
        let clash = certification.is_pending()
            && all.iter().any(|c| {
                c.id != certification.id && c.user_id == certification.user_id && c.is_pending()
            });
        clash.then(|| {
            DomainError::new(
                ErrorCode::PendingCertificationExists,
                "User already has a pending certification",
            )
            .with_detail("user_id", certification.user_id.as_str())
        })
    }
}

#[async_trait]
impl CertificationRepository for InMemoryCertificationStore {
    async fn create(&self, certification: &Certification) -> Result<(), DomainError> {
        let mut all = self.certifications.write().await;
        if let Some(err) = Self::pending_conflict(&all, certification) {
            return Err(err);
        }
        all.push(certification.clone());
        Ok(())
    }

    async fn update(&self, certification: &Certification) -> Result<(), DomainError> {
        let mut all = self.certifications.write().await;
        if let Some(err) = Self::pending_conflict(&all, certification) {
            return Err(err);
        }
        let existing = all
            .iter_mut()
            .find(|c| c.id == certification.id)
            .ok_or_else(|| {
                DomainError::new(ErrorCode::CertificationNotFound, "Certification not found")
            })?;
        *existing = certification.clone();
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &CertificationId,
    ) -> Result<Option<Certification>, DomainError> {
        let all = self.certifications.read().await;
        Ok(all.iter().find(|c| &c.id == id).cloned())
    }

    async fn list(
        &self,
        filter: &CertificationFilter,
        pagination: Pagination,
    ) -> Result<Page<Certification>, DomainError> {
        let all = self.certifications.read().await;
        let matching: Vec<Certification> =
            all.iter().rev().filter(|c| filter.matches(c)).cloned().collect();
        let total = matching.len() as u64;
        Ok(Page::new(pagination.slice(&matching), pagination, total))
    }

    async fn exists_with_status(
        &self,
        user_id: &UserId,
        status: CertificationStatus,
    ) -> Result<bool, DomainError> {
        let all = self.certifications.read().await;
        Ok(all.iter().any(|c| &c.user_id == user_id && c.status == status))
    }
}
