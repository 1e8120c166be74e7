//! HS256 JSON Web Token issuer for administrator sessions.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};

use crate::domain::admin::AdminClaims;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::TokenIssuer;

#[derive(Clone)]
pub struct JwtTokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtTokenIssuer {
    pub fn new(secret: &SecretString) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(bytes),
            decoding_key: DecodingKey::from_secret(bytes),
        }
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, claims: &AdminClaims) -> Result<String, DomainError> {
        encode(&Header::default(), claims, &self.encoding_key).map_err(|e| {
            DomainError::new(ErrorCode::InternalError, format!("token signing failed: {}", e))
        })
    }

    fn decode(&self, token: &str) -> Result<AdminClaims, DomainError> {
        decode::<AdminClaims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| DomainError::new(ErrorCode::InvalidPassword, format!("invalid token: {}", e)))
    }
}
