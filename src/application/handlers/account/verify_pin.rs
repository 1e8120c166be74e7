//! VerifyPinHandler - checks a supplied pin and marks the account verified.

use std::sync::Arc;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::verification::{PinCode, VerificationError, MAX_PIN};
use crate::ports::{IdentityProvider, SecretHasher, VerificationPinRepository};

#[derive(Debug, Clone)]
pub struct VerifyPinCommand {
    pub user_id: UserId,
    pub pin: String,
}

/// Pins are single-use.
///
/// The hash is checked before the expiry so a correct but stale pin
/// reports `Expired` while a wrong one always reports `InvalidPin`.
pub struct VerifyPinHandler {
    identity: Arc<dyn IdentityProvider>,
    pins: Arc<dyn VerificationPinRepository>,
    hasher: Arc<dyn SecretHasher>,
}

impl VerifyPinHandler {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        pins: Arc<dyn VerificationPinRepository>,
        hasher: Arc<dyn SecretHasher>,
    ) -> Self {
        Self {
            identity,
            pins,
            hasher,
        }
    }

    pub async fn handle(&self, cmd: VerifyPinCommand) -> Result<(), VerificationError> {
        // 1. Load
        let stored = self
            .pins
            .find_by_user(&cmd.user_id)
            .await?
            .ok_or_else(|| VerificationError::pin_not_found(cmd.user_id.clone()))?;

        // 2. Match
        let supplied = parse_pin(&cmd.pin).ok_or(VerificationError::InvalidPin)?;
        if !self.hasher.verify(&supplied.to_string(), &stored.pin_hash)? {
            tracing::info!(user_id = %cmd.user_id, "Verification pin mismatch");
            return Err(VerificationError::InvalidPin);
        }

        // 3. Expiry
        if stored.is_expired_at(Timestamp::now()) {
            tracing::info!(user_id = %cmd.user_id, "Verification pin expired");
            return Err(VerificationError::Expired);
        }

        // 4. Verify and consume
        self.identity.verify_user(&cmd.user_id).await?;
        if let Err(err) = self.pins.delete(&cmd.user_id).await {
            tracing::warn!(user_id = %cmd.user_id, error = %err, "Failed to delete used pin");
        }

        tracing::info!(user_id = %cmd.user_id, "User verified");
        Ok(())
    }
}

/// Accepts zero-padded input ("0042") for a pin issued as "42".
fn parse_pin(raw: &str) -> Option<PinCode> {
    let raw = raw.trim();
    if raw.is_empty() || raw.len() > 4 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<u16>()
        .ok()
        .filter(|v| *v <= MAX_PIN)
        .map(PinCode::from)
}
