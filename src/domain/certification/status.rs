//! Certification status state machine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{StateMachine, ValidationError};

/// Lifecycle status of a trainer certification request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificationStatus {
    /// Awaiting review. At most one per user.
    Pending,

    /// Rejected by a reviewer. Does not block a new request.
    Denied,

    /// Accepted. Terminal: only re-approval is allowed.
    Approved,
}

impl CertificationStatus {
    pub const ALL: [CertificationStatus; 3] = [
        CertificationStatus::Pending,
        CertificationStatus::Denied,
        CertificationStatus::Approved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CertificationStatus::Pending => "pending",
            CertificationStatus::Denied => "denied",
            CertificationStatus::Approved => "approved",
        }
    }

    /// True for review outcomes the owner gets notified about.
    pub fn is_outcome(&self) -> bool {
        !matches!(self, CertificationStatus::Pending)
    }
}

impl StateMachine for CertificationStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use CertificationStatus::*;
        match self {
            Approved => *target == Approved,
            Pending | Denied => true,
        }
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use CertificationStatus::*;
        match self {
            Pending => vec![Pending, Denied, Approved],
            Denied => vec![Pending, Denied, Approved],
            Approved => vec![Approved],
        }
    }

    fn is_terminal(&self) -> bool {
        matches!(self, CertificationStatus::Approved)
    }
}

impl fmt::Display for CertificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CertificationStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(CertificationStatus::Pending),
            "denied" => Ok(CertificationStatus::Denied),
            "approved" => Ok(CertificationStatus::Approved),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown certification status '{}'", other),
            )),
        }
    }
}
