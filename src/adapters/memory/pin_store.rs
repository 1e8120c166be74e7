//! In-memory verification pin store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::verification::VerificationPin;
use crate::ports::VerificationPinRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryVerificationPinStore {
    pins: Arc<RwLock<HashMap<UserId, VerificationPin>>>,
}

impl InMemoryVerificationPinStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VerificationPinRepository for InMemoryVerificationPinStore {
    async fn upsert(&self, pin: &VerificationPin) -> Result<(), DomainError> {
        self.pins
            .write()
            .await
            .insert(pin.user_id.clone(), pin.clone());
        Ok(())
    }

    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<VerificationPin>, DomainError> {
        Ok(self.pins.read().await.get(user_id).cloned())
    }

    async fn delete(&self, user_id: &UserId) -> Result<(), DomainError> {
        self.pins.write().await.remove(user_id);
        Ok(())
    }
}
