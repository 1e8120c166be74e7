//! HTTP middleware for axum.
//!
//! - `admin` - Administrator bearer-token middleware and extractor

pub mod admin;

pub use admin::{admin_middleware, AdminAuthState, AdminRejection, RequireAdmin};
