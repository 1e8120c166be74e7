//! Certification workflow error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound / UserNotFound | 404 |
//! | AlreadyCertified / PendingExists | 409 |
//! | InvalidStatus / ValidationFailed | 400 |
//! | External / Infrastructure | 500 |

use crate::domain::foundation::{CertificationId, DomainError, ErrorCode, ErrorKind, UserId};

/// Certification workflow errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CertificationError {
    /// Certification was not found.
    NotFound(CertificationId),

    /// Owning user does not exist.
    UserNotFound(UserId),

    /// User already holds an approved certification.
    AlreadyCertified(UserId),

    /// User already has a request under review.
    PendingExists(UserId),

    /// Status string outside pending/denied/approved.
    InvalidStatus(String),

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// A remote collaborator failed.
    External(String),

    /// Storage failure.
    Infrastructure(String),
}

impl CertificationError {
    pub fn not_found(id: CertificationId) -> Self {
        CertificationError::NotFound(id)
    }

    pub fn user_not_found(user_id: UserId) -> Self {
        CertificationError::UserNotFound(user_id)
    }

    pub fn already_certified(user_id: UserId) -> Self {
        CertificationError::AlreadyCertified(user_id)
    }

    pub fn pending_exists(user_id: UserId) -> Self {
        CertificationError::PendingExists(user_id)
    }

    pub fn invalid_status(status: impl Into<String>) -> Self {
        CertificationError::InvalidStatus(status.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        CertificationError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        CertificationError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            CertificationError::NotFound(_) => ErrorCode::CertificationNotFound,
            CertificationError::UserNotFound(_) => ErrorCode::UserNotFound,
            CertificationError::AlreadyCertified(_) => ErrorCode::UserAlreadyCertified,
            CertificationError::PendingExists(_) => ErrorCode::PendingCertificationExists,
            CertificationError::InvalidStatus(_) => ErrorCode::InvalidStatus,
            CertificationError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            CertificationError::External(_) => ErrorCode::ExternalServiceError,
            CertificationError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.code().kind()
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            CertificationError::NotFound(id) => format!("Certification not found: {}", id),
            CertificationError::UserNotFound(user_id) => format!("User not found: {}", user_id),
            CertificationError::AlreadyCertified(user_id) => {
                format!("User {} is already a certified trainer", user_id)
            }
            CertificationError::PendingExists(user_id) => {
                format!("User {} already has a pending certification", user_id)
            }
            CertificationError::InvalidStatus(status) => {
                format!("Invalid certification status: {}", status)
            }
            CertificationError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            CertificationError::External(msg) => format!("External service error: {}", msg),
            CertificationError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for CertificationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for CertificationError {}

impl From<DomainError> for CertificationError {
    fn from(err: DomainError) -> Self {
        let user_id = || {
            err.details
                .get("user_id")
                .and_then(|id| UserId::new(id.clone()).ok())
        };
        match err.code {
            ErrorCode::PendingCertificationExists => match user_id() {
                Some(id) => CertificationError::PendingExists(id),
                None => CertificationError::Infrastructure(err.to_string()),
            },
            ErrorCode::UserAlreadyCertified => match user_id() {
                Some(id) => CertificationError::AlreadyCertified(id),
                None => CertificationError::Infrastructure(err.to_string()),
            },
            ErrorCode::InvalidStatus => CertificationError::InvalidStatus(err.message),
            ErrorCode::ValidationFailed => CertificationError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            ErrorCode::ExternalServiceError => CertificationError::External(err.to_string()),
            _ => CertificationError::Infrastructure(err.to_string()),
        }
    }
}

impl From<CertificationError> for DomainError {
    fn from(err: CertificationError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
