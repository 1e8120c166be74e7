//! Certification aggregate.
//!
//! # Design Decisions
//!
//! - **Never deleted**: a request lives forever; its status is its lifecycle.
//! - **Approved is terminal**: re-approving is a no-op, anything else is a conflict.
//! - **One pending per user**: checked by the workflow and backed by a
//!   partial unique index in storage.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CertificationId, StateMachine, Timestamp, UserId};

use super::{CertificationError, CertificationStatus};

/// A trainer certification request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certification {
    pub id: CertificationId,
    pub user_id: UserId,
    pub status: CertificationStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Result of applying a reviewer decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChange {
    /// Re-approval of an approved request; nothing to persist.
    Unchanged,

    /// Status was written.
    Changed {
        from: CertificationStatus,
        to: CertificationStatus,
    },
}

impl Certification {
    /// Opens a new pending request for a user.
    pub fn request(user_id: UserId) -> Self {
        let now = Timestamp::now();
        Self {
            id: CertificationId::new(),
            user_id,
            status: CertificationStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a reviewer decision.
    ///
    /// # Errors
    ///
    /// - `AlreadyCertified` if the request is approved and `target` is not
    pub fn apply_status(
        &mut self,
        target: CertificationStatus,
    ) -> Result<StatusChange, CertificationError> {
        if self.status == CertificationStatus::Approved && target == CertificationStatus::Approved
        {
            return Ok(StatusChange::Unchanged);
        }

        let from = self.status;
        let to = from
            .transition_to(target)
            .map_err(|_| CertificationError::already_certified(self.user_id.clone()))?;

        self.status = to;
        self.updated_at = Timestamp::now();
        Ok(StatusChange::Changed { from, to })
    }

    pub fn is_pending(&self) -> bool {
        self.status == CertificationStatus::Pending
    }

    pub fn is_approved(&self) -> bool {
        self.status == CertificationStatus::Approved
    }
}

/// Optional filters for listing certifications.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CertificationFilter {
    pub user_id: Option<UserId>,
    pub status: Option<CertificationStatus>,
}

impl CertificationFilter {
    /// True when the certification satisfies every set filter.
    pub fn matches(&self, certification: &Certification) -> bool {
        self.user_id
            .as_ref()
            .map_or(true, |id| *id == certification.user_id)
            && self.status.map_or(true, |s| s == certification.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserId {
        UserId::new("trainer-1").unwrap()
    }

    #[test]
    fn request_starts_pending() {
        let cert = Certification::request(user());
        assert!(cert.is_pending());
        assert_eq!(cert.created_at, cert.updated_at);
    }

    #[test]
    fn approving_pending_reports_change() {
        let mut cert = Certification::request(user());
        let change = cert.apply_status(CertificationStatus::Approved).unwrap();
        assert_eq!(
            change,
            StatusChange::Changed {
                from: CertificationStatus::Pending,
                to: CertificationStatus::Approved
            }
        );
        assert!(cert.is_approved());
    }

    #[test]
    fn reapproval_is_unchanged() {
        let mut cert = Certification::request(user());
        cert.apply_status(CertificationStatus::Approved).unwrap();
        let before = cert.clone();

        let change = cert.apply_status(CertificationStatus::Approved).unwrap();

        assert_eq!(change, StatusChange::Unchanged);
        assert_eq!(cert, before);
    }

    #[test]
    fn approved_cannot_be_denied() {
        let mut cert = Certification::request(user());
        cert.apply_status(CertificationStatus::Approved).unwrap();

        let err = cert.apply_status(CertificationStatus::Denied).unwrap_err();

        assert!(matches!(err, CertificationError::AlreadyCertified(_)));
        assert!(cert.is_approved());
    }

    #[test]
    fn denied_can_be_reopened() {
        let mut cert = Certification::request(user());
        cert.apply_status(CertificationStatus::Denied).unwrap();
        assert!(cert.apply_status(CertificationStatus::Pending).is_ok());
    }

    #[test]
    fn filter_matches_on_all_set_fields() {
        let cert = Certification::request(user());
        assert!(CertificationFilter::default().matches(&cert));
        assert!(CertificationFilter {
            user_id: Some(user()),
            status: Some(CertificationStatus::Pending),
        }
        .matches(&cert));
        assert!(!CertificationFilter {
            user_id: None,
            status: Some(CertificationStatus::Approved),
        }
        .matches(&cert));
    }
}
