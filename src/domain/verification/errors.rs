//! Verification pin error types.

use crate::domain::foundation::{DomainError, ErrorCode, ErrorKind, UserId, ValidationError};

/// Phone verification errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    /// No pin was issued for this user.
    PinNotFound(UserId),

    /// Identity provider already reports the user as verified.
    AlreadyVerified(UserId),

    /// Supplied pin does not match the stored hash.
    InvalidPin,

    /// Pin matched but its lifetime has passed.
    Expired,

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// Identity provider or messaging channel failed.
    External(String),

    /// Storage or hashing failure.
    Infrastructure(String),
}

impl VerificationError {
    pub fn pin_not_found(user_id: UserId) -> Self {
        VerificationError::PinNotFound(user_id)
    }

    pub fn already_verified(user_id: UserId) -> Self {
        VerificationError::AlreadyVerified(user_id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        VerificationError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        VerificationError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            VerificationError::PinNotFound(_) => ErrorCode::VerificationPinNotFound,
            VerificationError::AlreadyVerified(_) => ErrorCode::UserAlreadyVerified,
            VerificationError::InvalidPin => ErrorCode::InvalidVerificationPin,
            VerificationError::Expired => ErrorCode::VerificationPinExpired,
            VerificationError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            VerificationError::External(_) => ErrorCode::ExternalServiceError,
            VerificationError::Infrastructure(_) => ErrorCode::InternalError,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.code().kind()
    }

    pub fn message(&self) -> String {
        match self {
            VerificationError::PinNotFound(user_id) => {
                format!("No verification pin issued for user {}", user_id)
            }
            VerificationError::AlreadyVerified(user_id) => {
                format!("User {} is already verified", user_id)
            }
            VerificationError::InvalidPin => "Invalid verification pin".to_string(),
            VerificationError::Expired => "Verification pin has expired".to_string(),
            VerificationError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            VerificationError::External(msg) => format!("External service error: {}", msg),
            VerificationError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for VerificationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for VerificationError {}

impl From<ValidationError> for VerificationError {
    fn from(err: ValidationError) -> Self {
        VerificationError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for VerificationError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ExternalServiceError => VerificationError::External(err.to_string()),
            ErrorCode::ValidationFailed => VerificationError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => VerificationError::Infrastructure(err.to_string()),
        }
    }
}

impl From<VerificationError> for DomainError {
    fn from(err: VerificationError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
