//! Administrator aggregate and session token claims.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AdminId, Timestamp, ValidationError};

/// A back-office account. Passwords are only ever held as a slow hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Administrator {
    pub id: AdminId,
    pub email: String,
    pub password_hash: String,
    pub created_at: Timestamp,
}

impl Administrator {
    /// Creates an administrator with a normalized email.
    pub fn register(email: &str, password_hash: String) -> Result<Self, ValidationError> {
        let email = normalize_email(email)?;
        Ok(Self {
            id: AdminId::new(),
            email,
            password_hash,
            created_at: Timestamp::now(),
        })
    }
}

/// Lower-cases and sanity-checks an email address.
pub(crate) fn normalize_email(email: &str) -> Result<String, ValidationError> {
    let email = email.trim().to_lowercase();
    if email.is_empty() {
        return Err(ValidationError::empty_field("email"));
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(ValidationError::invalid_format("email", "not an email address")),
    }
}

/// JWT claims issued on admin login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminClaims {
    /// Administrator id.
    pub sub: String,
    pub is_admin: bool,
    /// Issued-at, unix seconds.
    pub iat: i64,
    /// Expiry, unix seconds.
    pub exp: i64,
}

impl AdminClaims {
    pub fn new(admin_id: AdminId, issued_at: Timestamp, ttl_hours: i64) -> Self {
        Self {
            sub: admin_id.to_string(),
            is_admin: true,
            iat: issued_at.as_unix_secs(),
            exp: issued_at.plus_hours(ttl_hours).as_unix_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_normalizes_email() {
        let admin = Administrator::register("  Boss@FiuFit.com ", "hash".into()).unwrap();
        assert_eq!(admin.email, "boss@fiufit.com");
    }

    #[test]
    fn rejects_malformed_email() {
        assert!(Administrator::register("boss", "hash".into()).is_err());
        assert!(Administrator::register("@fiufit.com", "hash".into()).is_err());
        assert!(Administrator::register("", "hash".into()).is_err());
    }

    #[test]
    fn claims_expire_after_ttl() {
        let now = Timestamp::now();
        let claims = AdminClaims::new(AdminId::new(), now, 24);
        assert!(claims.is_admin);
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }
}
