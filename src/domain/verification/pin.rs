//! Verification pin value objects.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{Timestamp, UserId};

/// Largest pin value issued.
pub const MAX_PIN: u16 = 9999;

/// Default pin lifetime in seconds.
pub const DEFAULT_PIN_TTL_SECS: i64 = 300;

/// A freshly generated plaintext pin.
///
/// Only ever held in memory between generation, hashing and delivery.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PinCode(u16);

impl PinCode {
    /// Draws a random pin in `0..=9999`.
    pub fn generate() -> Self {
        Self(rand::thread_rng().gen_range(0..=MAX_PIN))
    }

    pub fn value(&self) -> u16 {
        self.0
    }
}

impl From<u16> for PinCode {
    fn from(value: u16) -> Self {
        Self(value.min(MAX_PIN))
    }
}

impl fmt::Display for PinCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Keep the plaintext out of logs.
impl fmt::Debug for PinCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PinCode(****)")
    }
}

/// The stored pin record. One per user; a new one replaces the old.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationPin {
    pub user_id: UserId,
    #[serde(skip_serializing)]
    pub pin_hash: String,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
}

impl VerificationPin {
    /// Creates a record that expires `ttl_secs` after `issued_at`.
    pub fn issue(user_id: UserId, pin_hash: String, issued_at: Timestamp, ttl_secs: i64) -> Self {
        Self {
            user_id,
            pin_hash,
            expires_at: issued_at.plus_secs(ttl_secs),
            created_at: issued_at,
        }
    }

    /// True when `now` is strictly after the expiry.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        now.is_after(&self.expires_at)
    }
}
