//! In-memory identity provider for local development and tests.

use async_trait::async_trait;
use secrecy::SecretString;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::adapters::storage_objects::{
    certification_video_object, object_url, picture_object, DEFAULT_PICTURE_OBJECT,
};
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::IdentityProvider;

#[derive(Debug, Default)]
struct IdentityState {
    logins: HashMap<String, UserId>,
    verified: HashSet<UserId>,
    disabled: HashSet<UserId>,
    pictures: HashSet<UserId>,
}

/// In-memory `IdentityProvider`.
///
/// Storage URLs are built under `storage_base_url`; users without an
/// uploaded picture get the default one.
#[derive(Debug, Clone)]
pub struct InMemoryIdentityProvider {
    storage_base_url: String,
    state: Arc<RwLock<IdentityState>>,
}

impl InMemoryIdentityProvider {
    pub fn new(storage_base_url: impl Into<String>) -> Self {
        Self {
            storage_base_url: storage_base_url.into(),
            state: Arc::new(RwLock::new(IdentityState::default())),
        }
    }

    /// Records that the user uploaded a profile picture.
    pub async fn set_picture(&self, user_id: &UserId) {
        self.state.write().await.pictures.insert(user_id.clone());
    }

    pub async fn is_disabled(&self, user_id: &UserId) -> bool {
        self.state.read().await.disabled.contains(user_id)
    }

    pub async fn has_login(&self, user_id: &UserId) -> bool {
        self.state.read().await.logins.values().any(|id| id == user_id)
    }

    fn url(&self, object: &str) -> String {
        object_url(&self.storage_base_url, object)
    }
}

impl Default for InMemoryIdentityProvider {
    fn default() -> Self {
        Self::new("http://localhost:9199/fiufit")
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn register(&self, email: &str, _password: &SecretString) -> Result<UserId, DomainError> {
        let email = email.trim().to_lowercase();
        let mut state = self.state.write().await;

        if let Some(existing) = state.logins.get(&email).cloned() {
            if state.verified.contains(&existing) {
                return Err(DomainError::new(
                    ErrorCode::UserAlreadyExists,
                    "Email already registered",
                )
                .with_detail("user_id", existing.as_str()));
            }
            // Unverified signups can retry with a new password.
            return Ok(existing);
        }

        let user_id = UserId::new(Uuid::new_v4().simple().to_string())?;
        state.logins.insert(email, user_id.clone());
        Ok(user_id)
    }

    async fn delete_user(&self, user_id: &UserId) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        state.logins.retain(|_, id| id != user_id);
        state.verified.remove(user_id);
        state.disabled.remove(user_id);
        state.pictures.remove(user_id);
        Ok(())
    }

    async fn enable_user(&self, user_id: &UserId) -> Result<(), DomainError> {
        self.state.write().await.disabled.remove(user_id);
        Ok(())
    }

    async fn disable_user(&self, user_id: &UserId) -> Result<(), DomainError> {
        self.state.write().await.disabled.insert(user_id.clone());
        Ok(())
    }

    async fn user_is_verified(&self, user_id: &UserId) -> Result<bool, DomainError> {
        Ok(self.state.read().await.verified.contains(user_id))
    }

    async fn verify_user(&self, user_id: &UserId) -> Result<(), DomainError> {
        self.state.write().await.verified.insert(user_id.clone());
        Ok(())
    }

    async fn get_user_picture_url(&self, user_id: &UserId) -> Result<String, DomainError> {
        let has_picture = self.state.read().await.pictures.contains(user_id);
        Ok(if has_picture {
            self.url(&picture_object(user_id))
        } else {
            self.url(DEFAULT_PICTURE_OBJECT)
        })
    }

    async fn get_certification_video_url(&self, user_id: &UserId) -> Result<String, DomainError> {
        Ok(self.url(&certification_video_object(user_id)))
    }
}
