//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        actual: i64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: i64, max: i64, actual: i64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyField { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

/// Coarse error taxonomy shared by every module.
///
/// Callers pick a response code from the kind; the concrete error carries the detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    InvalidCredential,
    Validation,
    Internal,
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    InvalidInterest,
    InvalidStatus,

    // Not found errors
    UserNotFound,
    CertificationNotFound,
    VerificationPinNotFound,
    AdminNotFound,

    // Conflict errors
    UserAlreadyExists,
    NicknameTaken,
    UserAlreadyCertified,
    PendingCertificationExists,
    UserAlreadyVerified,
    UserAlreadyDisabled,
    UserNotDisabled,
    AdminAlreadyExists,

    // Credential errors
    InvalidPassword,
    InvalidVerificationPin,
    VerificationPinExpired,

    // Infrastructure errors
    DatabaseError,
    ExternalServiceError,
    InternalError,
}

impl ErrorCode {
    /// Returns the taxonomy bucket for this code.
    pub fn kind(&self) -> ErrorKind {
        use ErrorCode::*;
        match self {
            ValidationFailed | InvalidInterest | InvalidStatus => ErrorKind::Validation,
            UserNotFound | CertificationNotFound | VerificationPinNotFound | AdminNotFound => {
                ErrorKind::NotFound
            }
            UserAlreadyExists
            | NicknameTaken
            | UserAlreadyCertified
            | PendingCertificationExists
            | UserAlreadyVerified
            | UserAlreadyDisabled
            | UserNotDisabled
            | AdminAlreadyExists => ErrorKind::Conflict,
            InvalidPassword | InvalidVerificationPin | VerificationPinExpired => {
                ErrorKind::InvalidCredential
            }
            DatabaseError | ExternalServiceError | InternalError => ErrorKind::Internal,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::InvalidInterest => "INVALID_INTEREST",
            ErrorCode::InvalidStatus => "INVALID_STATUS",
            ErrorCode::UserNotFound => "USER_NOT_FOUND",
            ErrorCode::CertificationNotFound => "CERTIFICATION_NOT_FOUND",
            ErrorCode::VerificationPinNotFound => "VERIFICATION_PIN_NOT_FOUND",
            ErrorCode::AdminNotFound => "ADMIN_NOT_FOUND",
            ErrorCode::UserAlreadyExists => "USER_ALREADY_EXISTS",
            ErrorCode::NicknameTaken => "NICKNAME_TAKEN",
            ErrorCode::UserAlreadyCertified => "USER_ALREADY_CERTIFIED",
            ErrorCode::PendingCertificationExists => "PENDING_CERTIFICATION_EXISTS",
            ErrorCode::UserAlreadyVerified => "USER_ALREADY_VERIFIED",
            ErrorCode::UserAlreadyDisabled => "USER_ALREADY_DISABLED",
            ErrorCode::UserNotDisabled => "USER_NOT_DISABLED",
            ErrorCode::AdminAlreadyExists => "ADMIN_ALREADY_EXISTS",
            ErrorCode::InvalidPassword => "INVALID_PASSWORD",
            ErrorCode::InvalidVerificationPin => "INVALID_VERIFICATION_PIN",
            ErrorCode::VerificationPinExpired => "VERIFICATION_PIN_EXPIRED",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::ExternalServiceError => "EXTERNAL_SERVICE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
///
/// This is the error type every port returns; use-case handlers narrow it
/// into their module-specific enums.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message).with_detail("field", field.into())
    }

    /// Creates a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Creates an error for a failed external collaborator call.
    pub fn external(service: &str, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ExternalServiceError, message).with_detail("service", service)
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Returns the taxonomy bucket of this error.
    pub fn kind(&self) -> ErrorKind {
        self.code.kind()
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let field = err.field().to_string();
        DomainError::validation(field, err.to_string())
    }
}
