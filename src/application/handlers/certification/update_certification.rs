//! UpdateCertificationHandler - reviewer decision on a certification.
//!
//! The certification row is the source of truth and is written first.
//! The owner's trainer flag is then brought in line; if that write fails
//! the error is returned but the status change stays, and
//! `ReconcileTrainerFlagHandler` can repair the user later.

use std::sync::Arc;
use std::time::Duration;

use crate::application::handlers::side_effects::{
    best_effort, emit_metric, lookup_url, DEFAULT_SIDE_EFFECT_TIMEOUT,
};
use crate::domain::certification::{CertificationError, CertificationStatus, StatusChange};
use crate::domain::foundation::{CertificationId, UserId};
use crate::domain::metrics::MetricEvent;
use crate::domain::user::User;
use crate::ports::{
    CertificationRepository, IdentityProvider, MetricsSink, NotificationSink, UserRepository,
};

use super::CertificationDetails;

#[derive(Debug, Clone)]
pub struct UpdateCertificationCommand {
    pub certification_id: CertificationId,
    pub status: CertificationStatus,
}

#[derive(Debug, Clone)]
pub struct UpdateCertificationResult {
    pub certification: CertificationDetails,
    /// False for an idempotent re-approval.
    pub changed: bool,
}

/// Applies a reviewer decision. Callers must already be authorized.
pub struct UpdateCertificationHandler {
    users: Arc<dyn UserRepository>,
    certifications: Arc<dyn CertificationRepository>,
    identity: Arc<dyn IdentityProvider>,
    notifications: Arc<dyn NotificationSink>,
    metrics: Arc<dyn MetricsSink>,
    side_effect_timeout: Duration,
}

impl UpdateCertificationHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        certifications: Arc<dyn CertificationRepository>,
        identity: Arc<dyn IdentityProvider>,
        notifications: Arc<dyn NotificationSink>,
        metrics: Arc<dyn MetricsSink>,
    ) -> Self {
        Self {
            users,
            certifications,
            identity,
            notifications,
            metrics,
            side_effect_timeout: DEFAULT_SIDE_EFFECT_TIMEOUT,
        }
    }

    pub fn with_side_effect_timeout(mut self, timeout: Duration) -> Self {
        self.side_effect_timeout = timeout;
        self
    }

    pub async fn handle(
        &self,
        cmd: UpdateCertificationCommand,
    ) -> Result<UpdateCertificationResult, CertificationError> {
        // 1. Load the certification
        let mut certification = self
            .certifications
            .find_by_id(&cmd.certification_id)
            .await?
            .ok_or_else(|| CertificationError::not_found(cmd.certification_id))?;

        // 2. Apply the decision (approved is terminal)
        let change = certification.apply_status(cmd.status)?;
        if change == StatusChange::Unchanged {
            let owner = self.users.find_by_id(&certification.user_id).await?;
            let video_url = self.video_url(&certification.user_id).await;
            return Ok(UpdateCertificationResult {
                certification: CertificationDetails {
                    certification,
                    user: owner.map(|u| u.public_profile(None)),
                    video_url,
                },
                changed: false,
            });
        }

        // 3. A certification without an owner is a data-integrity violation
        let mut user = self
            .users
            .find_by_id(&certification.user_id)
            .await?
            .ok_or_else(|| CertificationError::user_not_found(certification.user_id.clone()))?;

        // 4. Write the status (source of truth)
        self.certifications.update(&certification).await?;

        tracing::info!(
            certification_id = %certification.id,
            user_id = %user.id,
            status = %certification.status,
            "Certification status updated"
        );

        // 5. Propagate approval to the owner
        if certification.is_approved() {
            self.mark_trainer(&mut user).await?;
        }

        // 6. Tell the owner about the outcome
        if certification.status.is_outcome() {
            best_effort(
                self.side_effect_timeout,
                "certification_notification",
                self.notifications
                    .send_certification_outcome_notification(&user.id, certification.status),
            )
            .await;
            emit_metric(
                self.metrics.as_ref(),
                self.side_effect_timeout,
                MetricEvent::CertificationOutcome(certification.status),
            )
            .await;
        }

        let video_url = self.video_url(&user.id).await;
        Ok(UpdateCertificationResult {
            certification: CertificationDetails {
                certification,
                user: Some(user.public_profile(None)),
                video_url,
            },
            changed: true,
        })
    }

    async fn mark_trainer(&self, user: &mut User) -> Result<(), CertificationError> {
        self.users
            .set_verified_trainer(&user.id, true)
            .await
            .map_err(|error| {
                tracing::error!(
                    user_id = %user.id,
                    error = %error,
                    "Certification approved but trainer flag not persisted"
                );
                CertificationError::from(error)
            })?;
        user.mark_verified_trainer();
        Ok(())
    }

    async fn video_url(&self, user_id: &UserId) -> Option<String> {
        lookup_url(
            self.side_effect_timeout,
            user_id,
            self.identity.get_certification_video_url(user_id),
        )
        .await
    }
}
