//! Session token issuing port.

use crate::domain::admin::AdminClaims;
use crate::domain::foundation::DomainError;

pub trait TokenIssuer: Send + Sync {
    /// Signs the claims into a bearer token.
    fn issue(&self, claims: &AdminClaims) -> Result<String, DomainError>;

    /// Validates a token and returns its claims.
    fn decode(&self, token: &str) -> Result<AdminClaims, DomainError>;
}
