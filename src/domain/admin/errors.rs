//! Administrator error types.

use crate::domain::foundation::{DomainError, ErrorCode, ErrorKind, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminError {
    /// No administrator with this email.
    NotFound(String),

    /// Email already registered.
    AlreadyExists(String),

    /// Password does not match.
    InvalidPassword,

    ValidationFailed { field: String, message: String },

    Infrastructure(String),
}

impl AdminError {
    pub fn not_found(email: impl Into<String>) -> Self {
        AdminError::NotFound(email.into())
    }

    pub fn already_exists(email: impl Into<String>) -> Self {
        AdminError::AlreadyExists(email.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AdminError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        AdminError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AdminError::NotFound(_) => ErrorCode::AdminNotFound,
            AdminError::AlreadyExists(_) => ErrorCode::AdminAlreadyExists,
            AdminError::InvalidPassword => ErrorCode::InvalidPassword,
            AdminError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            AdminError::Infrastructure(_) => ErrorCode::InternalError,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.code().kind()
    }

    pub fn message(&self) -> String {
        match self {
            AdminError::NotFound(email) => format!("Administrator not found: {}", email),
            AdminError::AlreadyExists(email) => {
                format!("Administrator {} already exists", email)
            }
            AdminError::InvalidPassword => "Invalid password".to_string(),
            AdminError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            AdminError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for AdminError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AdminError {}

impl From<ValidationError> for AdminError {
    fn from(err: ValidationError) -> Self {
        AdminError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for AdminError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::AdminAlreadyExists => AdminError::AlreadyExists(
                err.details.get("email").cloned().unwrap_or_default(),
            ),
            ErrorCode::ValidationFailed => AdminError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => AdminError::Infrastructure(err.to_string()),
        }
    }
}

impl From<AdminError> for DomainError {
    fn from(err: AdminError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
