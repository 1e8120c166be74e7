//! HTTP adapter for account endpoints.
//!
//! Signup, phone verification, login metrics and administrator access.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::account_routes;
