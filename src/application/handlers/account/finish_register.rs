//! FinishRegisterHandler - creates the directory profile for a registered account.

use std::sync::Arc;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::user::{Coordinates, Interest, NewUserProfile, User, UserError};
use crate::ports::UserRepository;

#[derive(Debug, Clone)]
pub struct FinishRegisterCommand {
    pub user_id: UserId,
    pub nickname: String,
    pub display_name: String,
    pub is_male: bool,
    pub born_at: Timestamp,
    pub height: u32,
    pub weight: u32,
    pub latitude: f64,
    pub longitude: f64,
    pub interests: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct FinishRegisterResult {
    pub user: User,
}

pub struct FinishRegisterHandler {
    users: Arc<dyn UserRepository>,
}

impl FinishRegisterHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, cmd: FinishRegisterCommand) -> Result<FinishRegisterResult, UserError> {
        // 1. One profile per account
        if self.users.find_by_id(&cmd.user_id).await?.is_some() {
            return Err(UserError::already_exists(cmd.user_id.as_str()));
        }

        // 2. Build and validate
        let interests = Interest::parse_all(&cmd.interests)?;
        let coordinates = Coordinates::new(cmd.latitude, cmd.longitude)?;
        let user = User::register(NewUserProfile {
            id: cmd.user_id,
            nickname: cmd.nickname,
            display_name: cmd.display_name,
            is_male: cmd.is_male,
            born_at: cmd.born_at,
            height: cmd.height,
            weight: cmd.weight,
            coordinates,
            interests,
        })?;

        // 3. Nickname must be free
        if self.users.find_by_nickname(&user.nickname).await?.is_some() {
            return Err(UserError::nickname_taken(user.nickname));
        }

        // 4. Persist
        self.users.create(&user).await?;

        tracing::info!(user_id = %user.id, nickname = %user.nickname, "User profile created");

        Ok(FinishRegisterResult { user })
    }
}
