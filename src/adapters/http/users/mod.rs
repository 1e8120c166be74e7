//! HTTP adapter for the user directory and follow graph.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::{user_admin_routes, user_routes};
