//! User directory error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound / NicknameNotFound | 404 |
//! | AlreadyExists / NicknameTaken | 409 |
//! | AlreadyDisabled / NotDisabled | 409 |
//! | InvalidInterest / ValidationFailed | 400 |
//! | External / Infrastructure | 500 |

use crate::domain::foundation::{DomainError, ErrorCode, ErrorKind, UserId, ValidationError};

/// User directory errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserError {
    /// No profile with this id.
    NotFound(UserId),

    /// No profile with this nickname.
    NicknameNotFound(String),

    /// A profile already exists for this id.
    AlreadyExists(String),

    /// Another profile already uses this nickname.
    NicknameTaken(String),

    /// User is already blocked.
    AlreadyDisabled(UserId),

    /// User is not blocked.
    NotDisabled(UserId),

    /// Interest tag outside the allowed set.
    InvalidInterest(String),

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// A remote collaborator (identity provider, storage) failed.
    External(String),

    /// Storage failure.
    Infrastructure(String),
}

impl UserError {
    pub fn not_found(id: UserId) -> Self {
        UserError::NotFound(id)
    }

    pub fn nickname_not_found(nickname: impl Into<String>) -> Self {
        UserError::NicknameNotFound(nickname.into())
    }

    pub fn already_exists(id: impl Into<String>) -> Self {
        UserError::AlreadyExists(id.into())
    }

    pub fn nickname_taken(nickname: impl Into<String>) -> Self {
        UserError::NicknameTaken(nickname.into())
    }

    pub fn already_disabled(id: UserId) -> Self {
        UserError::AlreadyDisabled(id)
    }

    pub fn not_disabled(id: UserId) -> Self {
        UserError::NotDisabled(id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        UserError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn external(message: impl Into<String>) -> Self {
        UserError::External(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        UserError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            UserError::NotFound(_) | UserError::NicknameNotFound(_) => ErrorCode::UserNotFound,
            UserError::AlreadyExists(_) => ErrorCode::UserAlreadyExists,
            UserError::NicknameTaken(_) => ErrorCode::NicknameTaken,
            UserError::AlreadyDisabled(_) => ErrorCode::UserAlreadyDisabled,
            UserError::NotDisabled(_) => ErrorCode::UserNotDisabled,
            UserError::InvalidInterest(_) => ErrorCode::InvalidInterest,
            UserError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            UserError::External(_) => ErrorCode::ExternalServiceError,
            UserError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.code().kind()
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            UserError::NotFound(id) => format!("User not found: {}", id),
            UserError::NicknameNotFound(nickname) => {
                format!("No user with nickname '{}'", nickname)
            }
            UserError::AlreadyExists(id) => format!("User {} already exists", id),
            UserError::NicknameTaken(nickname) => {
                format!("Nickname '{}' is already taken", nickname)
            }
            UserError::AlreadyDisabled(id) => format!("User {} is already disabled", id),
            UserError::NotDisabled(id) => format!("User {} is not disabled", id),
            UserError::InvalidInterest(reason) => format!("Invalid interest: {}", reason),
            UserError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            UserError::External(msg) => format!("External service error: {}", msg),
            UserError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for UserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for UserError {}

impl From<ValidationError> for UserError {
    fn from(err: ValidationError) -> Self {
        if err.field() == "interests" {
            return UserError::InvalidInterest(err.to_string());
        }
        UserError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for UserError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::UserNotFound => match err.details.get("user_id").map(UserId::new) {
                Some(Ok(id)) => UserError::NotFound(id),
                _ => UserError::NicknameNotFound(
                    err.details.get("nickname").cloned().unwrap_or_default(),
                ),
            },
            ErrorCode::UserAlreadyExists => {
                UserError::AlreadyExists(err.details.get("user_id").cloned().unwrap_or_default())
            }
            ErrorCode::NicknameTaken => {
                UserError::NicknameTaken(err.details.get("nickname").cloned().unwrap_or_default())
            }
            ErrorCode::InvalidInterest => UserError::InvalidInterest(err.message),
            ErrorCode::ValidationFailed => UserError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            ErrorCode::ExternalServiceError => UserError::External(err.to_string()),
            _ => UserError::Infrastructure(err.to_string()),
        }
    }
}

impl From<UserError> for DomainError {
    fn from(err: UserError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user_id() -> UserId {
        UserId::new("user-test-123").unwrap()
    }

    #[test]
    fn not_found_maps_to_not_found_kind() {
        let err = UserError::not_found(test_user_id());
        assert_eq!(err.code(), ErrorCode::UserNotFound);
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.message().contains("user-test-123"));
    }

    #[test]
    fn disabled_conflicts_are_conflicts() {
        assert_eq!(
            UserError::already_disabled(test_user_id()).kind(),
            ErrorKind::Conflict
        );
        assert_eq!(
            UserError::not_disabled(test_user_id()).kind(),
            ErrorKind::Conflict
        );
    }

    #[test]
    fn interest_validation_error_becomes_invalid_interest() {
        let err: UserError = ValidationError::invalid_format("interests", "unknown 'yoga'").into();
        assert!(matches!(err, UserError::InvalidInterest(_)));
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn nickname_conflict_from_storage_keeps_nickname() {
        let domain = DomainError::new(ErrorCode::NicknameTaken, "duplicate")
            .with_detail("nickname", "runner");
        assert_eq!(
            UserError::from(domain),
            UserError::NicknameTaken("runner".to_string())
        );
    }

    #[test]
    fn missing_user_from_storage_keeps_id() {
        let domain = DomainError::new(ErrorCode::UserNotFound, "gone")
            .with_detail("user_id", "user-test-123");
        assert_eq!(UserError::from(domain), UserError::NotFound(test_user_id()));
    }

    #[test]
    fn database_error_becomes_infrastructure() {
        let err = UserError::from(DomainError::database("connection reset"));
        assert!(matches!(err, UserError::Infrastructure(_)));
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn converts_back_into_domain_error() {
        let domain: DomainError = UserError::nickname_taken("runner").into();
        assert_eq!(domain.code, ErrorCode::NicknameTaken);
    }
}
