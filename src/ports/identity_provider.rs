//! Identity provider port.
//!
//! The identity provider owns credentials, the email-verified flag, the
//! enabled/disabled state of the login, and the storage bucket holding
//! profile pictures and certification videos.

use async_trait::async_trait;
use secrecy::SecretString;

use crate::domain::foundation::{DomainError, UserId};

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Creates a login and returns the id it was issued.
    ///
    /// # Errors
    ///
    /// - `UserAlreadyExists` if the email is registered and verified
    /// - `ExternalServiceError` on provider failure
    async fn register(&self, email: &str, password: &SecretString) -> Result<UserId, DomainError>;

    async fn delete_user(&self, user_id: &UserId) -> Result<(), DomainError>;

    async fn enable_user(&self, user_id: &UserId) -> Result<(), DomainError>;

    async fn disable_user(&self, user_id: &UserId) -> Result<(), DomainError>;

    /// Whether the user's phone/email has been verified.
    async fn user_is_verified(&self, user_id: &UserId) -> Result<bool, DomainError>;

    /// Marks the user verified.
    async fn verify_user(&self, user_id: &UserId) -> Result<(), DomainError>;

    /// Public URL of the user's profile picture.
    async fn get_user_picture_url(&self, user_id: &UserId) -> Result<String, DomainError>;

    /// Public URL of the user's certification evidence video.
    async fn get_certification_video_url(&self, user_id: &UserId) -> Result<String, DomainError>;
}
