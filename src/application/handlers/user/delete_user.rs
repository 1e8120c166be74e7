//! DeleteUserHandler - removes the profile and the identity account together.
//!
//! The profile is soft-deleted first. If the identity provider then refuses
//! the account deletion, the profile is restored so both stores still agree.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::user::UserError;
use crate::ports::{IdentityProvider, UserRepository};

#[derive(Debug, Clone)]
pub struct DeleteUserCommand {
    pub user_id: UserId,
}

pub struct DeleteUserHandler {
    users: Arc<dyn UserRepository>,
    identity: Arc<dyn IdentityProvider>,
}

impl DeleteUserHandler {
    pub fn new(users: Arc<dyn UserRepository>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self { users, identity }
    }

    pub async fn handle(&self, cmd: DeleteUserCommand) -> Result<(), UserError> {
        self.users.delete(&cmd.user_id).await?;

        if let Err(err) = self.identity.delete_user(&cmd.user_id).await {
            tracing::warn!(
                user_id = %cmd.user_id,
                error = %err,
                "Identity account removal failed, restoring profile"
            );
            if let Err(restore_err) = self.users.restore(&cmd.user_id).await {
                tracing::error!(
                    user_id = %cmd.user_id,
                    error = %restore_err,
                    "Profile deleted but identity account kept"
                );
            }
            return Err(err.into());
        }

        tracing::info!(user_id = %cmd.user_id, "User deleted");
        Ok(())
    }
}
