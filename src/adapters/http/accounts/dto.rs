//! HTTP DTOs for account endpoints.

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::domain::admin::Administrator;
use crate::domain::foundation::Timestamp;
use crate::domain::user::User;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Email/password pair used by user signup and both admin endpoints.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: SecretString,
}

/// Profile data that completes a signup.
#[derive(Debug, Clone, Deserialize)]
pub struct FinishRegisterRequest {
    pub nickname: String,
    pub display_name: String,
    pub is_male: bool,
    pub birth_date: DateTime<Utc>,
    pub height: u32,
    pub weight: u32,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub interests: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SendPinRequest {
    pub phone_number: String,
}

/// Pins arrive either as a JSON number or as the digits the user typed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PinInput {
    Number(u32),
    Text(String),
}

impl PinInput {
    pub fn into_string(self) -> String {
        match self {
            PinInput::Number(n) => n.to_string(),
            PinInput::Text(s) => s,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerifyPinRequest {
    pub pin: PinInput,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginQuery {
    pub method: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PinSentResponse {
    pub expires_at: Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifiedResponse {
    pub verified: bool,
}

/// Administrator account without its password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminResponse {
    pub id: String,
    pub email: String,
    pub created_at: Timestamp,
}

impl From<Administrator> for AdminResponse {
    fn from(admin: Administrator) -> Self {
        Self {
            id: admin.id.to_string(),
            email: admin.email,
            created_at: admin.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminLoginResponse {
    pub token: String,
    /// Expiry, unix seconds.
    pub expires_at: i64,
}
