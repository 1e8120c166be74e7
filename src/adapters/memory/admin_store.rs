//! In-memory administrator store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::admin::Administrator;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::AdminRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryAdminStore {
    admins: Arc<RwLock<HashMap<String, Administrator>>>,
}

impl InMemoryAdminStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AdminRepository for InMemoryAdminStore {
    async fn create(&self, admin: &Administrator) -> Result<(), DomainError> {
        let mut admins = self.admins.write().await;
        if admins.contains_key(&admin.email) {
            return Err(
                DomainError::new(ErrorCode::AdminAlreadyExists, "Administrator already exists")
                    .with_detail("email", admin.email.clone()),
            );
        }
        admins.insert(admin.email.clone(), admin.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Administrator>, DomainError> {
        Ok(self.admins.read().await.get(email).cloned())
    }
}
