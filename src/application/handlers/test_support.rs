//! Shared fixtures for handler tests.

use async_trait::async_trait;
use secrecy::SecretString;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::adapters::memory::{
    InMemoryAdminStore, InMemoryCertificationStore, InMemoryDirectory, InMemoryIdentityProvider,
    InMemoryVerificationPinStore, RecordingMessagingChannel, RecordingMetricsSink,
    RecordingNotificationSink,
};
use crate::domain::certification::CertificationStatus;
use crate::domain::foundation::{DomainError, ErrorCode, Page, Pagination, UserId};
use crate::domain::user::{test_support, Coordinates, User};
use crate::domain::verification::PinCode;
use crate::ports::{
    IdentityProvider, MessagingChannel, NotificationSink, SecretHasher, UserRepository,
    UserSearch,
};

// ════════════════════════════════════════════════════════════════════════════
// In-memory world
// ════════════════════════════════════════════════════════════════════════════

/// Every port backed by an in-memory adapter.
pub(crate) struct World {
    pub directory: Arc<InMemoryDirectory>,
    pub certifications: Arc<InMemoryCertificationStore>,
    pub pins: Arc<InMemoryVerificationPinStore>,
    pub admins: Arc<InMemoryAdminStore>,
    pub identity: Arc<InMemoryIdentityProvider>,
    pub notifications: Arc<RecordingNotificationSink>,
    pub metrics: Arc<RecordingMetricsSink>,
    pub messaging: Arc<RecordingMessagingChannel>,
    pub hasher: Arc<PlainHasher>,
}

impl World {
    pub fn new() -> Self {
        Self {
            directory: Arc::new(InMemoryDirectory::new()),
            certifications: Arc::new(InMemoryCertificationStore::new()),
            pins: Arc::new(InMemoryVerificationPinStore::new()),
            admins: Arc::new(InMemoryAdminStore::new()),
            identity: Arc::new(InMemoryIdentityProvider::new("https://cdn.test")),
            notifications: Arc::new(RecordingNotificationSink::new()),
            metrics: Arc::new(RecordingMetricsSink::new()),
            messaging: Arc::new(RecordingMessagingChannel::new()),
            hasher: Arc::new(PlainHasher),
        }
    }

    /// Stores a valid user and returns it.
    pub async fn with_user(&self, id: &str, nickname: &str) -> User {
        let user = test_support::user(id, nickname);
        self.directory.create(&user).await.unwrap();
        user
    }

    pub async fn user(&self, id: &str) -> User {
        self.directory
            .find_by_id(&user_id(id))
            .await
            .unwrap()
            .expect("user should exist")
    }
}

pub(crate) fn user_id(id: &str) -> UserId {
    UserId::new(id).unwrap()
}

// ════════════════════════════════════════════════════════════════════════════
// Mock Implementations
// ════════════════════════════════════════════════════════════════════════════

/// Reversible "hash" so tests stay fast.
pub(crate) struct PlainHasher;

impl SecretHasher for PlainHasher {
    fn hash(&self, secret: &str) -> Result<String, DomainError> {
        Ok(format!("hashed:{}", secret))
    }

    fn verify(&self, secret: &str, hash: &str) -> Result<bool, DomainError> {
        Ok(hash == format!("hashed:{}", secret))
    }
}

/// Notification sink that always fails, counting attempts.
#[derive(Default)]
pub(crate) struct FailingNotificationSink {
    pub attempts: AtomicUsize,
}

impl FailingNotificationSink {
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NotificationSink for FailingNotificationSink {
    async fn send_follow_notification(&self, _: &User, _: &User) -> Result<(), DomainError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(DomainError::external("notifications", "Simulated outage"))
    }

    async fn send_certification_outcome_notification(
        &self,
        _: &UserId,
        _: CertificationStatus,
    ) -> Result<(), DomainError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(DomainError::external("notifications", "Simulated outage"))
    }
}

/// Notification sink that never answers within a test deadline.
pub(crate) struct HangingNotificationSink;

#[async_trait]
impl NotificationSink for HangingNotificationSink {
    async fn send_follow_notification(&self, _: &User, _: &User) -> Result<(), DomainError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(())
    }

    async fn send_certification_outcome_notification(
        &self,
        _: &UserId,
        _: CertificationStatus,
    ) -> Result<(), DomainError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(())
    }
}

/// Messaging channel that always fails.
pub(crate) struct FailingMessagingChannel;

#[async_trait]
impl MessagingChannel for FailingMessagingChannel {
    async fn send_pin(&self, _: &str, _: &PinCode) -> Result<(), DomainError> {
        Err(DomainError::external("twilio", "Simulated delivery failure"))
    }
}

/// Wraps a directory and fails every field write, recording the target ids.
pub(crate) struct FailingUpdateUserRepository {
    inner: Arc<InMemoryDirectory>,
    pub update_attempts: Mutex<Vec<UserId>>,
}

impl FailingUpdateUserRepository {
    pub fn wrapping(inner: Arc<InMemoryDirectory>) -> Self {
        Self {
            inner,
            update_attempts: Mutex::new(Vec::new()),
        }
    }

    fn fail(&self, id: &UserId) -> Result<(), DomainError> {
        self.update_attempts.lock().unwrap().push(id.clone());
        Err(DomainError::new(
            ErrorCode::DatabaseError,
            "Simulated update failure",
        ))
    }
}

#[async_trait]
impl UserRepository for FailingUpdateUserRepository {
    async fn create(&self, user: &User) -> Result<(), DomainError> {
        self.inner.create(user).await
    }

    async fn update_profile(&self, user: &User) -> Result<(), DomainError> {
        self.fail(&user.id)
    }

    async fn set_verified_trainer(&self, id: &UserId, _: bool) -> Result<(), DomainError> {
        self.fail(id)
    }

    async fn set_disabled(&self, id: &UserId, _: bool) -> Result<(), DomainError> {
        self.fail(id)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_nickname(&self, nickname: &str) -> Result<Option<User>, DomainError> {
        self.inner.find_by_nickname(nickname).await
    }

    async fn search(
        &self,
        filter: &UserSearch,
        pagination: Pagination,
    ) -> Result<Page<User>, DomainError> {
        self.inner.search(filter, pagination).await
    }

    async fn find_closest(
        &self,
        exclude: &UserId,
        origin: Coordinates,
        radius_km: f64,
        pagination: Pagination,
    ) -> Result<Page<User>, DomainError> {
        self.inner
            .find_closest(exclude, origin, radius_km, pagination)
            .await
    }

    async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
        self.inner.delete(id).await
    }

    async fn restore(&self, id: &UserId) -> Result<(), DomainError> {
        self.inner.restore(id).await
    }
}

/// Wraps a directory and approves the user as a trainer right after the
/// first read, the way a concurrent certification review would.
pub(crate) struct ApprovingOnReadRepository {
    inner: Arc<InMemoryDirectory>,
    approved: AtomicBool,
}

impl ApprovingOnReadRepository {
    pub fn wrapping(inner: Arc<InMemoryDirectory>) -> Self {
        Self {
            inner,
            approved: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl UserRepository for ApprovingOnReadRepository {
    async fn create(&self, user: &User) -> Result<(), DomainError> {
        self.inner.create(user).await
    }

    async fn update_profile(&self, user: &User) -> Result<(), DomainError> {
        self.inner.update_profile(user).await
    }

    async fn set_verified_trainer(&self, id: &UserId, verified: bool) -> Result<(), DomainError> {
        self.inner.set_verified_trainer(id, verified).await
    }

    async fn set_disabled(&self, id: &UserId, disabled: bool) -> Result<(), DomainError> {
        self.inner.set_disabled(id, disabled).await
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let found = self.inner.find_by_id(id).await?;
        if found.is_some() && !self.approved.swap(true, Ordering::SeqCst) {
            self.inner.set_verified_trainer(id, true).await?;
        }
        Ok(found)
    }

    async fn find_by_nickname(&self, nickname: &str) -> Result<Option<User>, DomainError> {
        self.inner.find_by_nickname(nickname).await
    }

    async fn search(
        &self,
        filter: &UserSearch,
        pagination: Pagination,
    ) -> Result<Page<User>, DomainError> {
        self.inner.search(filter, pagination).await
    }

    async fn find_closest(
        &self,
        exclude: &UserId,
        origin: Coordinates,
        radius_km: f64,
        pagination: Pagination,
    ) -> Result<Page<User>, DomainError> {
        self.inner
            .find_closest(exclude, origin, radius_km, pagination)
            .await
    }

    async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
        self.inner.delete(id).await
    }

    async fn restore(&self, id: &UserId) -> Result<(), DomainError> {
        self.inner.restore(id).await
    }
}

/// Wraps the in-memory identity provider and fails every account deletion.
pub(crate) struct FailingDeleteIdentityProvider {
    inner: Arc<InMemoryIdentityProvider>,
}

impl FailingDeleteIdentityProvider {
    pub fn wrapping(inner: Arc<InMemoryIdentityProvider>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl IdentityProvider for FailingDeleteIdentityProvider {
    async fn register(&self, email: &str, password: &SecretString) -> Result<UserId, DomainError> {
        self.inner.register(email, password).await
    }

    async fn delete_user(&self, _: &UserId) -> Result<(), DomainError> {
        Err(DomainError::external("identity", "Simulated outage"))
    }

    async fn enable_user(&self, user_id: &UserId) -> Result<(), DomainError> {
        self.inner.enable_user(user_id).await
    }

    async fn disable_user(&self, user_id: &UserId) -> Result<(), DomainError> {
        self.inner.disable_user(user_id).await
    }

    async fn user_is_verified(&self, user_id: &UserId) -> Result<bool, DomainError> {
        self.inner.user_is_verified(user_id).await
    }

    async fn verify_user(&self, user_id: &UserId) -> Result<(), DomainError> {
        self.inner.verify_user(user_id).await
    }

    async fn get_user_picture_url(&self, user_id: &UserId) -> Result<String, DomainError> {
        self.inner.get_user_picture_url(user_id).await
    }

    async fn get_certification_video_url(&self, user_id: &UserId) -> Result<String, DomainError> {
        self.inner.get_certification_video_url(user_id).await
    }
}
