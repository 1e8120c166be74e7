//! Slow one-way hashing for passwords and pins.

use crate::domain::foundation::DomainError;

pub trait SecretHasher: Send + Sync {
    /// Hashes `secret` with a fresh salt.
    fn hash(&self, secret: &str) -> Result<String, DomainError>;

    /// Checks `secret` against a stored hash.
    ///
    /// Returns `Ok(false)` on mismatch; `Err` only for malformed hashes.
    fn verify(&self, secret: &str, hash: &str) -> Result<bool, DomainError>;
}
