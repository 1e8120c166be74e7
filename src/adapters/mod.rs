//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `postgres` - Repository ports over PostgreSQL
//! - `memory` - In-memory repositories and recording collaborators
//! - `external` - Identity, notification, metrics and Twilio HTTP clients
//! - `security` - Argon2 hashing and JWT signing
//! - `http` - REST API (axum)

pub mod external;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod security;
pub mod storage_objects;
