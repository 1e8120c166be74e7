//! AdminRegisterHandler - creates a back-office administrator.

use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;

use crate::domain::admin::{AdminError, Administrator};
use crate::ports::{AdminRepository, SecretHasher};

#[derive(Debug)]
pub struct AdminRegisterCommand {
    pub email: String,
    pub password: SecretString,
}

#[derive(Debug, Clone)]
pub struct AdminRegisterResult {
    pub admin: Administrator,
}

pub struct AdminRegisterHandler {
    admins: Arc<dyn AdminRepository>,
    hasher: Arc<dyn SecretHasher>,
}

impl AdminRegisterHandler {
    pub fn new(admins: Arc<dyn AdminRepository>, hasher: Arc<dyn SecretHasher>) -> Self {
        Self { admins, hasher }
    }

    pub async fn handle(&self, cmd: AdminRegisterCommand) -> Result<AdminRegisterResult, AdminError> {
        let password = cmd.password.expose_secret();
        if password.is_empty() {
            return Err(AdminError::validation("password", "must not be empty"));
        }

        let password_hash = self.hasher.hash(password)?;
        let admin = Administrator::register(&cmd.email, password_hash)?;
        self.admins.create(&admin).await?;

        tracing::info!(admin_id = %admin.id, "Administrator registered");
        Ok(AdminRegisterResult { admin })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::World;

    fn handler(world: &World) -> AdminRegisterHandler {
        AdminRegisterHandler::new(world.admins.clone(), world.hasher.clone())
    }

    fn cmd(email: &str, password: &str) -> AdminRegisterCommand {
        AdminRegisterCommand {
            email: email.to_string(),
            password: SecretString::new(password.to_string()),
        }
    }

    #[tokio::test]
    async fn stores_hashed_password_under_normalized_email() {
        let world = World::new();

        let result = handler(&world).handle(cmd("Boss@FiuFit.com", "pw")).await.unwrap();

        assert_eq!(result.admin.email, "boss@fiufit.com");
        let stored = world.admins.find_by_email("boss@fiufit.com").await.unwrap().unwrap();
        assert_eq!(stored.password_hash, "hashed:pw");
    }

    #[tokio::test]
    async fn duplicate_email_is_conflict() {
        let world = World::new();
        handler(&world).handle(cmd("boss@fiufit.com", "pw")).await.unwrap();

        let result = handler(&world).handle(cmd("BOSS@fiufit.com", "other")).await;

        assert!(matches!(result, Err(AdminError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn empty_password_is_rejected() {
        let world = World::new();
        let result = handler(&world).handle(cmd("boss@fiufit.com", "")).await;
        assert!(matches!(result, Err(AdminError::ValidationFailed { .. })));
    }

    #[tokio::test]
    async fn malformed_email_is_rejected() {
        let world = World::new();
        let result = handler(&world).handle(cmd("boss", "pw")).await;
        assert!(matches!(result, Err(AdminError::ValidationFailed { field, .. }) if field == "email"));
    }
}
