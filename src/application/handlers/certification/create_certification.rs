//! CreateCertificationHandler - opens a trainer certification request.

use std::sync::Arc;

use crate::domain::certification::{Certification, CertificationError, CertificationStatus};
use crate::domain::foundation::UserId;
use crate::ports::{CertificationRepository, UserRepository};

#[derive(Debug, Clone)]
pub struct CreateCertificationCommand {
    pub user_id: UserId,
}

#[derive(Debug, Clone)]
pub struct CreateCertificationResult {
    pub certification: Certification,
}

/// Opens a pending request for an existing, not yet certified user.
///
/// No notification is sent on creation.
pub struct CreateCertificationHandler {
    users: Arc<dyn UserRepository>,
    certifications: Arc<dyn CertificationRepository>,
}

impl CreateCertificationHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        certifications: Arc<dyn CertificationRepository>,
    ) -> Self {
        Self {
            users,
            certifications,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateCertificationCommand,
    ) -> Result<CreateCertificationResult, CertificationError> {
        // 1. Owner must exist
        self.users
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(|| CertificationError::user_not_found(cmd.user_id.clone()))?;

        // 2. Approved is terminal
        if self
            .certifications
            .exists_with_status(&cmd.user_id, CertificationStatus::Approved)
            .await?
        {
            return Err(CertificationError::already_certified(cmd.user_id));
        }

        // 3. One request under review at a time
        if self
            .certifications
            .exists_with_status(&cmd.user_id, CertificationStatus::Pending)
            .await?
        {
            return Err(CertificationError::pending_exists(cmd.user_id));
        }

        // 4. Persist; storage re-checks pending uniqueness under concurrency
        let certification = Certification::request(cmd.user_id);
        self.certifications.create(&certification).await?;

        tracing::info!(
            certification_id = %certification.id,
            user_id = %certification.user_id,
            "Certification requested"
        );

        Ok(CreateCertificationResult { certification })
    }
}
