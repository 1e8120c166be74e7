//! Argon2id implementation of `SecretHasher`.

use argon2::password_hash::{
    rand_core::OsRng, Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier,
    SaltString,
};
use argon2::Argon2;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::SecretHasher;

/// Hashes secrets into PHC strings (`$argon2id$v=19$...`) with a random salt.
#[derive(Clone, Default)]
pub struct Argon2Hasher {
    argon2: Argon2<'static>,
}

impl Argon2Hasher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SecretHasher for Argon2Hasher {
    fn hash(&self, secret: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(secret.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| DomainError::new(ErrorCode::InternalError, format!("hashing failed: {}", e)))
    }

    fn verify(&self, secret: &str, hash: &str) -> Result<bool, DomainError> {
        let parsed = PasswordHash::new(hash).map_err(|e| {
            DomainError::new(ErrorCode::InternalError, format!("malformed hash: {}", e))
        })?;
        match self.argon2.verify_password(secret.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(PasswordHashError::Password) => Ok(false),
            Err(e) => Err(DomainError::new(
                ErrorCode::InternalError,
                format!("hash verification failed: {}", e),
            )),
        }
    }
}
