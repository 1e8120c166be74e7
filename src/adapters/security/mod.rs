//! Security adapters: slow hashing and signed session tokens.

mod argon2_hasher;
mod jwt_issuer;

pub use argon2_hasher::Argon2Hasher;
pub use jwt_issuer::JwtTokenIssuer;
