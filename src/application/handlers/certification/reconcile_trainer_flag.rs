//! ReconcileTrainerFlagHandler - read-repair for `is_verified_trainer`.
//!
//! Re-derives the flag from the certification store: a user is a verified
//! trainer exactly when they hold an approved certification.

use std::sync::Arc;

use crate::domain::certification::{CertificationError, CertificationStatus};
use crate::domain::foundation::UserId;
use crate::domain::user::User;
use crate::ports::{CertificationRepository, UserRepository};

#[derive(Debug, Clone)]
pub struct ReconcileTrainerFlagCommand {
    pub user_id: UserId,
}

#[derive(Debug, Clone)]
pub struct ReconcileTrainerFlagResult {
    pub user: User,
    /// True when the stored flag disagreed and was rewritten.
    pub repaired: bool,
}

pub struct ReconcileTrainerFlagHandler {
    users: Arc<dyn UserRepository>,
    certifications: Arc<dyn CertificationRepository>,
}

impl ReconcileTrainerFlagHandler {
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
        cmd: ReconcileTrainerFlagCommand,
    ) -> Result<ReconcileTrainerFlagResult, CertificationError> {
        let mut user = self
            .users
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(|| CertificationError::user_not_found(cmd.user_id.clone()))?;

        let certified = self
            .certifications
            .exists_with_status(&user.id, CertificationStatus::Approved)
            .await?;

        if user.is_verified_trainer == certified {
            return Ok(ReconcileTrainerFlagResult {
                user,
                repaired: false,
            });
        }

        self.users.set_verified_trainer(&user.id, certified).await?;
        user.is_verified_trainer = certified;

        tracing::warn!(
            user_id = %user.id,
            is_verified_trainer = certified,
            "Repaired trainer flag"
        );

        Ok(ReconcileTrainerFlagResult {
            user,
            repaired: true,
        })
    }
}
